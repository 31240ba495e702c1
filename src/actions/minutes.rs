use crate::actions::ActionContext;
use crate::error::{handle_api_error, ActionError, Entity};
use crate::form::{FormPayload, MinutesForm};
use crate::models::MinutesRequest;
use crate::revalidate::MEETINGS_VIEW;
use crate::types::ActionResult;
use crate::validation;

/// Saving minutes navigates away on success instead of rendering a result
#[derive(Debug, Clone, PartialEq)]
pub enum SaveMinutesOutcome {
    Redirect(String),
    Failed(ActionResult),
}

/// POST /Moms for new minutes, PUT /Moms/{id} when `momId` is present
pub async fn save_minutes(ctx: &ActionContext, form: &FormPayload) -> SaveMinutesOutcome {
    let form = MinutesForm::from_payload(form);
    if let Err(err) = validation::validate_minutes(&form) {
        let failed = handle_api_error(&ActionError::from(err), Entity::Minutes, "save meeting minutes");
        return SaveMinutesOutcome::Failed(failed);
    }

    let MinutesForm {
        meeting_id,
        mom_id,
        discussion,
        decisions,
        action_items,
    } = form;
    let request = MinutesRequest {
        meeting_id: validation::coerce_id(&meeting_id),
        discussion,
        decisions,
        action_items,
    };

    let outcome: Result<(), ActionError> = async {
        let client = ctx.client()?;
        match mom_id.as_deref() {
            Some(existing) => client.put(client.endpoint(&["Moms", existing]), &request).await,
            None => client.post(client.endpoint(&["Moms"]), &request).await,
        }
    }
    .await;

    match outcome {
        Ok(()) => {
            ctx.revalidate(&[MEETINGS_VIEW]);
            tracing::info!(
                "Saved minutes for meeting {} ({})",
                meeting_id,
                if mom_id.is_some() { "updated" } else { "created" }
            );
            SaveMinutesOutcome::Redirect(MEETINGS_VIEW.to_string())
        }
        Err(err) => {
            SaveMinutesOutcome::Failed(handle_api_error(&err, Entity::Minutes, "save meeting minutes"))
        }
    }
}
