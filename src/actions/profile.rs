use crate::actions::ActionContext;
use crate::error::{handle_api_error, ActionError, Entity};
use crate::form::{FormPayload, ProfileForm};
use crate::models::UpdateProfileRequest;
use crate::revalidate::PROFILE_VIEW;
use crate::types::ActionResult;
use crate::validation;

/// PUT /Users/Profile
///
/// The password is only sent when a new one was typed; leaving it blank keeps
/// the current password.
pub async fn update_profile(ctx: &ActionContext, form: &FormPayload) -> ActionResult {
    let form = ProfileForm::from_payload(form);
    if let Err(err) = validation::validate_profile(&form) {
        return handle_api_error(&ActionError::from(err), Entity::Profile, "update your profile");
    }

    let request = UpdateProfileRequest {
        full_name: form.name,
        password: form.new_password,
    };

    let outcome: Result<(), ActionError> = async {
        let client = ctx.client()?;
        client.put(client.endpoint(&["Users", "Profile"]), &request).await
    }
    .await;

    match outcome {
        Ok(()) => {
            ctx.revalidate(&[PROFILE_VIEW]);
            tracing::info!(
                "Updated profile (password changed: {})",
                request.password.is_some()
            );
            ActionResult::ok("Profile updated successfully!")
        }
        Err(err) => handle_api_error(&err, Entity::Profile, "update your profile"),
    }
}
