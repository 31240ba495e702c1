//! Field checks that run before any network call.
//!
//! Validators are pure: they either return the parsed values a request needs
//! or the first `ValidationError` to show under the form.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::error::ValidationError;
use crate::form::{
    AccountRequestForm, MeetingForm, MinutesForm, PasswordResetForm, ProfileForm, RoomForm, UserForm,
};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_ROOM_CAPACITY: i32 = 100;

fn require(value: &str, message: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(message));
    }
    Ok(())
}

/// Same shape check as `^[^\s@]+@[^\s@]+\.[^\s@]+$`
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let chars: Vec<char> = domain.chars().collect();
    chars.len() >= 3 && chars[1..chars.len() - 1].contains(&'.')
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    if !is_valid_email(email) {
        return Err(ValidationError::new("Please enter a valid email address."));
    }
    Ok(())
}

/// A mismatch is reported ahead of the length rule.
fn check_password(password: &str, confirm: &str, label: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::new(if label == "Password" {
            "Passwords do not match."
        } else {
            "New passwords do not match."
        }));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError(format!(
            "{} must be at least {} characters long.",
            label, MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_user_create(form: &UserForm) -> Result<(), ValidationError> {
    require(&form.full_name, "Full name is required.")?;
    require(&form.email, "Email is required.")?;
    require(&form.role, "Role is required.")?;
    require(&form.password, "Password is required.")?;
    require(&form.confirm_password, "Please confirm the password.")?;
    check_password(&form.password, &form.confirm_password, "Password")?;
    check_email(&form.email)
}

pub fn validate_user_update(form: &UserForm) -> Result<(), ValidationError> {
    require(&form.full_name, "Full name is required.")?;
    require(&form.email, "Email is required.")?;
    require(&form.role, "Role is required.")?;
    check_email(&form.email)
}

/// Room fields after parsing
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRoom {
    pub capacity: i32,
    pub features: Vec<Value>,
}

/// Capacity is checked first so an out-of-range value is always reported.
pub fn validate_room(form: &RoomForm) -> Result<ValidRoom, ValidationError> {
    let capacity = parse_capacity(&form.capacity)?;
    require(&form.name, "Room name is required.")?;
    require(&form.location, "Location is required.")?;

    let features = match form.features.as_deref() {
        None => Vec::new(),
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => items,
            _ => return Err(ValidationError::new("Invalid features data.")),
        },
    };

    Ok(ValidRoom { capacity, features })
}

fn parse_capacity(raw: &str) -> Result<i32, ValidationError> {
    require(raw, "Capacity is required.")?;
    let capacity: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::new("Capacity must be a whole number."))?;
    if capacity <= 0 {
        return Err(ValidationError::new("Capacity must be greater than 0."));
    }
    if capacity > i64::from(MAX_ROOM_CAPACITY) {
        return Err(ValidationError(format!(
            "Capacity cannot exceed {} people.",
            MAX_ROOM_CAPACITY
        )));
    }
    Ok(capacity as i32)
}

/// Meeting fields after id coercion.
///
/// Ids that do not parse are kept as `None` and go out as JSON `null`, leaving
/// the remote API to reject them, unless strict mode is on.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidMeeting {
    pub room_id: Option<i64>,
    pub attendee_ids: Vec<Option<i64>>,
}

pub fn coerce_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

pub fn validate_meeting(form: &MeetingForm, strict_ids: bool) -> Result<ValidMeeting, ValidationError> {
    require(&form.title, "Title is required.")?;
    require(&form.start_time, "Start time is required.")?;
    require(&form.end_time, "End time is required.")?;
    require(&form.room_id, "Room is required.")?;

    let room_id = coerce_id(&form.room_id);
    let attendee_ids: Vec<Option<i64>> = form.attendee_ids.iter().map(|id| coerce_id(id)).collect();

    if strict_ids {
        if room_id.is_none() {
            return Err(ValidationError::new("Please select a valid room."));
        }
        if attendee_ids.iter().any(Option::is_none) {
            return Err(ValidationError::new("Invalid attendee selection."));
        }
    }

    Ok(ValidMeeting { room_id, attendee_ids })
}

/// Normalise a submitted date/time to ISO-8601 UTC with milliseconds.
///
/// Values without an offset (`datetime-local` inputs) are read as UTC. The
/// form carries no time zone for the user, and the dashboard renders the
/// stored UTC value back unchanged, so an edited meeting keeps the
/// wall-clock time that was typed.
pub fn to_iso8601(raw: &str, field: &str) -> Result<String, ValidationError> {
    let raw = raw.trim();
    let parsed: Option<DateTime<Utc>> = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|naive| Utc.from_utc_datetime(&naive))
        });

    parsed
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
        .ok_or_else(|| ValidationError(format!("Invalid {}.", field)))
}

pub fn validate_minutes(form: &MinutesForm) -> Result<(), ValidationError> {
    require(&form.meeting_id, "Meeting ID is required.")
}

/// The new password is optional; leaving it blank keeps the current one.
pub fn validate_profile(form: &ProfileForm) -> Result<(), ValidationError> {
    require(&form.name, "Name is required.")?;
    if let Some(password) = &form.new_password {
        check_password(password, &form.confirm_password, "New password")?;
    }
    Ok(())
}

pub fn validate_password_reset(form: &PasswordResetForm) -> Result<(), ValidationError> {
    require(&form.token, "Invalid or missing reset token.")?;
    check_password(&form.password, &form.confirm_password, "Password")
}

pub fn validate_account_request(form: &AccountRequestForm) -> Result<(), ValidationError> {
    require(&form.full_name, "Full name is required.")?;
    require(&form.email, "Email is required.")?;
    check_email(&form.email)
}

pub fn validate_reset_request_email(email: &str) -> Result<(), ValidationError> {
    require(email, "Email is required.")?;
    check_email(email)
}
