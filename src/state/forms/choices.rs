//! Fixed option sets for the select inputs

use serde::{Deserialize, Serialize};

/// Common behaviour for select options
pub trait SelectOption: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// Value sent to the backend and carried by change events
    fn wire_value(&self) -> &'static str;

    /// Text shown in the dropdown
    fn label(&self) -> &'static str;

    fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.wire_value() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartnerCollege {
    #[serde(rename = "CDU")]
    Cdu,
    #[serde(rename = "BITSAT")]
    Bitsat,
}

impl SelectOption for PartnerCollege {
    const ALL: &'static [Self] = &[Self::Cdu, Self::Bitsat];

    fn wire_value(&self) -> &'static str {
        match self {
            Self::Cdu => "CDU",
            Self::Bitsat => "BITSAT",
        }
    }

    fn label(&self) -> &'static str {
        self.wire_value()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraduationYear {
    #[serde(rename = "2027")]
    Y2027,
    #[serde(rename = "2028")]
    Y2028,
    #[serde(rename = "2029")]
    Y2029,
}

impl SelectOption for GraduationYear {
    const ALL: &'static [Self] = &[Self::Y2027, Self::Y2028, Self::Y2029];

    fn wire_value(&self) -> &'static str {
        match self {
            Self::Y2027 => "2027",
            Self::Y2028 => "2028",
            Self::Y2029 => "2029",
        }
    }

    fn label(&self) -> &'static str {
        self.wire_value()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "BTECH")]
    BTech,
    #[serde(rename = "BSC")]
    BSc,
}

impl SelectOption for Branch {
    const ALL: &'static [Self] = &[Self::BTech, Self::BSc];

    fn wire_value(&self) -> &'static str {
        match self {
            Self::BTech => "BTECH",
            Self::BSc => "BSC",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::BTech => "B.TECH",
            Self::BSc => "B.SC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrentStatus {
    Student,
    Intern,
}

impl SelectOption for CurrentStatus {
    const ALL: &'static [Self] = &[Self::Student, Self::Intern];

    fn wire_value(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Intern => "Intern",
        }
    }

    fn label(&self) -> &'static str {
        self.wire_value()
    }
}
