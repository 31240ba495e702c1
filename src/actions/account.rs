//! Account request and password reset flows.
//!
//! These are placeholders: they validate their input and report success, but
//! no backend endpoint exists for them yet, so nothing is sent anywhere.

use crate::error::{handle_api_error, ActionError, Entity};
use crate::form::{AccountRequestForm, FormPayload, PasswordResetForm};
use crate::types::ActionResult;
use crate::validation;

pub const ACCOUNT_REQUEST_MESSAGE: &str =
    "Your account request has been submitted. An administrator will review it shortly.";
pub const RESET_REQUEST_MESSAGE: &str =
    "If an account exists for that email, a password reset link has been sent.";
pub const PASSWORD_RESET_MESSAGE: &str =
    "Your password has been reset successfully. You can now log in with your new password.";

pub fn request_account(form: &FormPayload) -> ActionResult {
    let form = AccountRequestForm::from_payload(form);
    if let Err(err) = validation::validate_account_request(&form) {
        return handle_api_error(&ActionError::from(err), Entity::User, "request an account");
    }
    tracing::info!(
        "Account requested for {} (reason given: {})",
        form.email,
        form.reason.is_some()
    );
    ActionResult::ok(ACCOUNT_REQUEST_MESSAGE)
}

pub fn request_password_reset(form: &FormPayload) -> ActionResult {
    let email = form.text("email");
    if let Err(err) = validation::validate_reset_request_email(&email) {
        return handle_api_error(&ActionError::from(err), Entity::User, "reset passwords");
    }
    tracing::info!("Password reset requested for {}", email);
    ActionResult::ok(RESET_REQUEST_MESSAGE)
}

pub fn reset_password(form: &FormPayload) -> ActionResult {
    let form = PasswordResetForm::from_payload(form);
    if let Err(err) = validation::validate_password_reset(&form) {
        return handle_api_error(&ActionError::from(err), Entity::User, "reset passwords");
    }
    tracing::info!("Password reset completed");
    ActionResult::ok(PASSWORD_RESET_MESSAGE)
}
