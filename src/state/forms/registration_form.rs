//! The registration field store

use super::choices::{Branch, CurrentStatus, GraduationYear, PartnerCollege, SelectOption};
use super::field::{Field, FormField};
use crate::error::{RegistrationError, RegistrationResult};
use crate::state::IdCardFile;

/// Every value the submitter enters, plus the attached ID card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    // Basic info
    pub full_name: FormField,
    pub call_name: FormField,
    pub college_email: FormField,
    pub personal_email: FormField,
    pub phone: FormField,

    // Academic info
    pub partner_college: Option<PartnerCollege>,
    pub graduation_year: Option<GraduationYear>,
    pub branch: Option<Branch>,
    pub student_id: FormField,
    pub current_status: Option<CurrentStatus>,

    pub id_card: Option<IdCardFile>,

    // Narrative
    pub why_join: FormField,
    pub best_experience: FormField,
    pub advice_to_juniors: FormField,
    pub skills_gained: FormField,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self {
            full_name: FormField::text(Field::FullName),
            call_name: FormField::text(Field::CallName),
            college_email: FormField::text(Field::CollegeEmail),
            personal_email: FormField::text(Field::PersonalEmail),
            phone: FormField::text(Field::Phone),
            partner_college: None,
            graduation_year: None,
            branch: None,
            student_id: FormField::text(Field::StudentId),
            current_status: None,
            id_card: None,
            why_join: FormField::text(Field::WhyJoin),
            best_experience: FormField::text(Field::BestExperience),
            advice_to_juniors: FormField::text(Field::AdviceToJuniors),
            skills_gained: FormField::text(Field::SkillsGained),
        }
    }

    /// The text input backing `field`, `None` for selects
    pub fn text_field(&self, field: Field) -> Option<&FormField> {
        match field {
            Field::FullName => Some(&self.full_name),
            Field::CallName => Some(&self.call_name),
            Field::CollegeEmail => Some(&self.college_email),
            Field::PersonalEmail => Some(&self.personal_email),
            Field::Phone => Some(&self.phone),
            Field::StudentId => Some(&self.student_id),
            Field::WhyJoin => Some(&self.why_join),
            Field::BestExperience => Some(&self.best_experience),
            Field::AdviceToJuniors => Some(&self.advice_to_juniors),
            Field::SkillsGained => Some(&self.skills_gained),
            Field::PartnerCollege
            | Field::GraduationYear
            | Field::Branch
            | Field::CurrentStatus => None,
        }
    }

    fn text_field_mut(&mut self, field: Field) -> Option<&mut FormField> {
        match field {
            Field::FullName => Some(&mut self.full_name),
            Field::CallName => Some(&mut self.call_name),
            Field::CollegeEmail => Some(&mut self.college_email),
            Field::PersonalEmail => Some(&mut self.personal_email),
            Field::Phone => Some(&mut self.phone),
            Field::StudentId => Some(&mut self.student_id),
            Field::WhyJoin => Some(&mut self.why_join),
            Field::BestExperience => Some(&mut self.best_experience),
            Field::AdviceToJuniors => Some(&mut self.advice_to_juniors),
            Field::SkillsGained => Some(&mut self.skills_gained),
            Field::PartnerCollege
            | Field::GraduationYear
            | Field::Branch
            | Field::CurrentStatus => None,
        }
    }

    /// Current value as the backend would receive it; empty when unset
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::PartnerCollege => wire_or_empty(self.partner_college),
            Field::GraduationYear => wire_or_empty(self.graduation_year),
            Field::Branch => wire_or_empty(self.branch),
            Field::CurrentStatus => wire_or_empty(self.current_status),
            _ => self.text_field(field).map(FormField::as_text).unwrap_or_default(),
        }
    }

    /// Replace a field from a raw change event.
    ///
    /// Select fields parse their option value; the empty string clears the
    /// selection. Nothing is written when parsing fails.
    pub fn set(&mut self, field: Field, raw: &str) -> RegistrationResult<()> {
        match field {
            Field::PartnerCollege => self.partner_college = parse_choice(field, raw)?,
            Field::GraduationYear => self.graduation_year = parse_choice(field, raw)?,
            Field::Branch => self.branch = parse_choice(field, raw)?,
            Field::CurrentStatus => self.current_status = parse_choice(field, raw)?,
            _ => {
                if let Some(input) = self.text_field_mut(field) {
                    input.set_text(raw);
                }
            }
        }
        Ok(())
    }

    pub fn set_partner_college(&mut self, value: Option<PartnerCollege>) {
        self.partner_college = value;
    }

    pub fn set_graduation_year(&mut self, value: Option<GraduationYear>) {
        self.graduation_year = value;
    }

    pub fn set_branch(&mut self, value: Option<Branch>) {
        self.branch = value;
    }

    pub fn set_current_status(&mut self, value: Option<CurrentStatus>) {
        self.current_status = value;
    }

    pub fn is_filled(&self, field: Field) -> bool {
        !self.value(field).is_empty()
    }

    /// First required field still empty, in form order
    pub fn first_missing(&self) -> Option<Field> {
        Field::ALL.into_iter().find(|f| !self.is_filled(*f))
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

fn wire_or_empty<T: SelectOption>(value: Option<T>) -> &'static str {
    value.map(|v| v.wire_value()).unwrap_or_default()
}

fn parse_choice<T: SelectOption>(field: Field, raw: &str) -> RegistrationResult<Option<T>> {
    if raw.is_empty() {
        return Ok(None);
    }
    T::from_wire(raw)
        .map(Some)
        .ok_or_else(|| RegistrationError::InvalidChoice {
            field,
            value: raw.to_string(),
        })
}
