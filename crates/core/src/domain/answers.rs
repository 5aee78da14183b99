use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Questionnaire answers describing the gift recipient.
///
/// Every field is free text produced by the questionnaire widgets. Drafts are stored as-is
/// after each field change, so any subset of fields may be blank.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizAnswers {
    pub name: String,
    /// Age-group label such as "16-24".
    pub age_group: String,
    pub relationship: String,
    /// Budget-range label such as "2 000 - 5 000".
    pub budget: String,
    /// Comma or whitespace separated interests.
    pub interests: String,
}

impl QuizAnswers {
    pub fn new(
        name: impl Into<String>,
        age_group: impl Into<String>,
        relationship: impl Into<String>,
        budget: impl Into<String>,
        interests: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age_group: age_group.into(),
            relationship: relationship.into(),
            budget: budget.into(),
            interests: interests.into(),
        }
    }

    /// Rejects answers with a blank field, naming the first one in questionnaire order.
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("name", &self.name),
            ("age_group", &self.age_group),
            ("relationship", &self.relationship),
            ("budget", &self.budget),
            ("interests", &self.interests),
        ];

        match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(DomainError::MissingField { field }),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
