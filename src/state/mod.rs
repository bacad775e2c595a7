//! Registration state module

mod attachment;
mod forms;
mod submission;
mod verification;

pub use attachment::*;
pub use forms::*;
pub use submission::*;
pub use verification::*;

#[cfg(test)]
pub(crate) use forms::filled_form;
