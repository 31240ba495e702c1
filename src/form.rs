//! Browser form payloads and their typed projections.
//!
//! A `FormPayload` keeps the submitted pairs in order so repeated keys
//! (attendee lists) survive. Each action projects the payload into one of the
//! typed forms below before validation; missing fields become empty strings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// First value submitted under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted under `key`, in submission order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Trimmed first value, or an empty string when absent
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(|v| v.trim().to_string()).unwrap_or_default()
    }

    /// Raw first value, untrimmed (passwords keep their whitespace)
    pub fn raw(&self, key: &str) -> String {
        self.get(key).map(str::to_string).unwrap_or_default()
    }

    /// Trimmed first value, `None` when absent or blank
    pub fn optional(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub password: String,
    pub confirm_password: String,
}

impl UserForm {
    pub fn from_payload(form: &FormPayload) -> Self {
        Self {
            full_name: form.text("fullName"),
            email: form.text("email"),
            role: form.text("role"),
            password: form.raw("password"),
            confirm_password: form.raw("confirmPassword"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoomForm {
    pub name: String,
    pub location: String,
    pub capacity: String,
    /// JSON array as submitted by the features picker
    pub features: Option<String>,
}

impl RoomForm {
    pub fn from_payload(form: &FormPayload) -> Self {
        Self {
            name: form.text("name"),
            location: form.text("location"),
            capacity: form.text("capacity"),
            features: form.optional("features"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeetingForm {
    pub title: String,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub room_id: String,
    pub attendee_ids: Vec<String>,
}

impl MeetingForm {
    pub fn from_payload(form: &FormPayload) -> Self {
        Self {
            title: form.text("title"),
            description: form.optional("description"),
            start_time: form.text("startTime"),
            end_time: form.text("endTime"),
            room_id: form.text("roomId"),
            attendee_ids: form
                .get_all("attendeeIds")
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MinutesForm {
    pub meeting_id: String,
    /// Present when an existing record is being edited
    pub mom_id: Option<String>,
    pub discussion: String,
    pub decisions: String,
    pub action_items: Vec<String>,
}

impl MinutesForm {
    pub fn from_payload(form: &FormPayload) -> Self {
        Self {
            meeting_id: form.text("meetingId"),
            mom_id: form.optional("momId"),
            discussion: form.text("discussion"),
            decisions: form.text("decisions"),
            action_items: form
                .get_all("actionItems")
                .into_iter()
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub new_password: Option<String>,
    pub confirm_password: String,
}

impl ProfileForm {
    pub fn from_payload(form: &FormPayload) -> Self {
        Self {
            name: form.text("name"),
            new_password: form.get("newPassword").filter(|p| !p.is_empty()).map(str::to_string),
            confirm_password: form.raw("confirmPassword"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccountRequestForm {
    pub full_name: String,
    pub email: String,
    pub reason: Option<String>,
}

impl AccountRequestForm {
    pub fn from_payload(form: &FormPayload) -> Self {
        Self {
            full_name: form.text("fullName"),
            email: form.text("email"),
            reason: form.optional("reason"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PasswordResetForm {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

impl PasswordResetForm {
    pub fn from_payload(form: &FormPayload) -> Self {
        Self {
            token: form.text("token"),
            password: form.raw("password"),
            confirm_password: form.raw("confirmPassword"),
        }
    }
}
