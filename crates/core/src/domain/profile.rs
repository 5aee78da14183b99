use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

pub const DEFAULT_PROFILE_NAME: &str = "Друг";
pub const DEFAULT_PROFILE_AVATAR: &str = "🎁";
pub const DEFAULT_PROFILE_LEVEL: &str = "Новичок";

const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub avatar: String,
    pub level: String,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

/// A dated occasion (birthday, anniversary) tied to a gift recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    pub person_name: String,
    pub relationship: String,
}

/// Partial profile update; `None` fields keep their stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub level: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_owned(),
            avatar: DEFAULT_PROFILE_AVATAR.to_owned(),
            level: DEFAULT_PROFILE_LEVEL.to_owned(),
            events: Vec::new(),
        }
    }
}

impl UserProfile {
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
    }

    /// Inserts the event, assigning an id when blank, and keeps events ordered by date.
    pub fn add_event(&mut self, mut event: CalendarEvent) -> Result<&CalendarEvent, DomainError> {
        let date = event.validate()?;
        event.date = date.format(EVENT_DATE_FORMAT).to_string();
        if event.id.trim().is_empty() {
            event.id = uuid::Uuid::new_v4().to_string();
        }
        if self.events.iter().any(|existing| existing.id == event.id) {
            return Err(DomainError::InvariantViolation(format!(
                "calendar event `{}` already exists",
                event.id
            )));
        }

        let id = event.id.clone();
        self.events.push(event);
        self.sort_events();

        self.events
            .iter()
            .find(|existing| existing.id == id)
            .ok_or_else(|| DomainError::InvariantViolation(format!("event `{id}` vanished")))
    }

    /// Returns whether an event was removed.
    pub fn remove_event(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|event| event.id != id);
        self.sort_events();
        self.events.len() != before
    }

    /// Stable ascending sort; normalized ISO dates order lexicographically.
    pub fn sort_events(&mut self) {
        self.events.sort_by(|left, right| left.date.cmp(&right.date));
    }

    pub fn events_sorted(&self) -> bool {
        self.events.windows(2).all(|pair| pair[0].date <= pair[1].date)
    }
}

impl CalendarEvent {
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        person_name: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            date: date.into(),
            person_name: person_name.into(),
            relationship: relationship.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), EVENT_DATE_FORMAT).ok()
    }

    pub fn validate(&self) -> Result<NaiveDate, DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::MissingField { field: "title" });
        }
        self.parsed_date().ok_or_else(|| DomainError::InvalidDate { value: self.date.clone() })
    }
}
