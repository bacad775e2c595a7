//! Multipart payload assembly

use super::TransportError;
use crate::state::{Field, IdCardFile, RegistrationForm};
use reqwest::multipart::{Form, Part};

/// Part name of the binary ID card image
pub const ID_CARD_PART: &str = "id_card_image";

/// Snapshot of a complete registration, ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationPayload {
    fields: Vec<(Field, String)>,
    college_email_verified: bool,
    phone_verified: bool,
    id_card: IdCardFile,
}

impl RegistrationPayload {
    pub fn new(
        form: &RegistrationForm,
        id_card: IdCardFile,
        college_email_verified: bool,
        phone_verified: bool,
    ) -> Self {
        let fields = Field::ALL
            .into_iter()
            .map(|f| (f, form.value(f).to_string()))
            .collect();
        Self {
            fields,
            college_email_verified,
            phone_verified,
            id_card,
        }
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn id_card(&self) -> &IdCardFile {
        &self.id_card
    }

    /// Every text part in send order, verification flags last
    pub fn text_parts(&self) -> Vec<(&'static str, String)> {
        let mut parts: Vec<_> = self
            .fields
            .iter()
            .map(|(f, v)| (f.name(), v.clone()))
            .collect();
        parts.push((
            "college_email_verified",
            self.college_email_verified.to_string(),
        ));
        parts.push(("phone_verified", self.phone_verified.to_string()));
        parts
    }

    /// Build the multipart body: text parts followed by the image
    pub fn into_multipart(self) -> Result<Form, TransportError> {
        let form = self
            .text_parts()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        let image = Part::bytes(self.id_card.data().to_vec())
            .file_name(self.id_card.file_name().to_string())
            .mime_str(self.id_card.media_type())
            .map_err(|e| TransportError::InvalidPayload(e.to_string()))?;

        Ok(form.part(ID_CARD_PART, image))
    }
}
