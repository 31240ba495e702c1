//! Request and response bodies exchanged with the remote API.
//!
//! Responses are decoded leniently (`#[serde(default)]`) since the API owns
//! these records and may add fields at any time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role_id: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub full_name: String,
    pub email: String,
    pub role_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role: Option<String>,
    pub role_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub features: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub features: Vec<Value>,
}

/// Unparsable ids serialise as `null`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub room_id: Option<i64>,
    pub attendee_ids: Vec<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

pub const MEETING_STATUS_SCHEDULED: &str = "Scheduled";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomOption {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserOption {
    pub id: i64,
    pub full_name: String,
    pub email: String,
}

/// Choices needed to render the meeting form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingFormData {
    pub rooms: Vec<RoomOption>,
    pub users: Vec<UserOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingDetails {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub room_id: Option<i64>,
    pub attendee_ids: Vec<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinutesRequest {
    pub meeting_id: Option<i64>,
    pub discussion: String,
    pub decisions: String,
    pub action_items: Vec<String>,
}

/// The password is only sent when the user chose a new one
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResults {
    pub meetings: Vec<Value>,
    pub rooms: Vec<Value>,
    pub users: Vec<Value>,
}

impl SearchResults {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.meetings.len() + self.rooms.len() + self.users.len()
    }
}
