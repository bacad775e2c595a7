//! Form field value objects

use crate::state::Channel;

/// Identifies one required input of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    CallName,
    CollegeEmail,
    PersonalEmail,
    Phone,
    PartnerCollege,
    GraduationYear,
    Branch,
    StudentId,
    CurrentStatus,
    WhyJoin,
    BestExperience,
    AdviceToJuniors,
    SkillsGained,
}

impl Field {
    /// Every field, in the order the form presents them
    pub const ALL: [Field; 14] = [
        Field::FullName,
        Field::CallName,
        Field::CollegeEmail,
        Field::PersonalEmail,
        Field::Phone,
        Field::PartnerCollege,
        Field::GraduationYear,
        Field::Branch,
        Field::StudentId,
        Field::CurrentStatus,
        Field::WhyJoin,
        Field::BestExperience,
        Field::AdviceToJuniors,
        Field::SkillsGained,
    ];

    /// Name used for the multipart part
    pub fn name(&self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::CallName => "call_name",
            Self::CollegeEmail => "college_email",
            Self::PersonalEmail => "personal_email",
            Self::Phone => "phone",
            Self::PartnerCollege => "partner_college",
            Self::GraduationYear => "graduation_year",
            Self::Branch => "branch",
            Self::StudentId => "student_id",
            Self::CurrentStatus => "current_status",
            Self::WhyJoin => "why_join",
            Self::BestExperience => "best_experience",
            Self::AdviceToJuniors => "advice_to_juniors",
            Self::SkillsGained => "skills_gained",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::CallName => "What should we call you?",
            Self::CollegeEmail => "College Email",
            Self::PersonalEmail => "Personal Email",
            Self::Phone => "Phone",
            Self::PartnerCollege => "Partner College",
            Self::GraduationYear => "Graduation Year",
            Self::Branch => "Branch",
            Self::StudentId => "Student ID",
            Self::CurrentStatus => "Current Status",
            Self::WhyJoin => "Why do you want to join as a senior mentor?",
            Self::BestExperience => "What was your best experience at NIAT?",
            Self::AdviceToJuniors => "One piece of advice you'd give to juniors",
            Self::SkillsGained => "Key Skills You Gained",
        }
    }

    /// Select fields only accept their fixed option values
    pub fn is_select(&self) -> bool {
        matches!(
            self,
            Self::PartnerCollege | Self::GraduationYear | Self::Branch | Self::CurrentStatus
        )
    }

    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            Self::WhyJoin | Self::BestExperience | Self::AdviceToJuniors | Self::SkillsGained
        )
    }

    /// The verification channel guarding this field, if any
    pub fn channel(&self) -> Option<Channel> {
        match self {
            Self::CollegeEmail => Some(Channel::CollegeEmail),
            Self::Phone => Some(Channel::Phone),
            _ => None,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A free-text input and its current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub field: Field,
    value: String,
}

impl FormField {
    /// Create an empty text field
    pub fn text(field: Field) -> Self {
        Self {
            field,
            value: String::new(),
        }
    }

    /// Create a text field with initial value
    pub fn text_with_value(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Replace the value; last write wins
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_multiline(&self) -> bool {
        self.field.is_multiline()
    }
}
