use crate::actions::{required_id, ActionContext};
use crate::error::{handle_api_error, ActionError, Entity};
use crate::form::{FormPayload, MeetingForm};
use crate::models::{MeetingDetails, MeetingFormData, MeetingRequest, MEETING_STATUS_SCHEDULED};
use crate::revalidate::{meeting_edit_view, CALENDAR_VIEW, MEETINGS_VIEW};
use crate::types::ActionResult;
use crate::validation;

fn meeting_request(ctx: &ActionContext, form: &FormPayload) -> Result<(MeetingForm, MeetingRequest), ActionError> {
    let form = MeetingForm::from_payload(form);
    let valid = validation::validate_meeting(&form, ctx.validation.strict_attendee_ids)?;
    let request = MeetingRequest {
        title: form.title.clone(),
        description: form.description.clone(),
        start_time: form.start_time.clone(),
        end_time: form.end_time.clone(),
        room_id: valid.room_id,
        attendee_ids: valid.attendee_ids,
        status: None,
    };
    Ok((form, request))
}

fn update_request(
    ctx: &ActionContext,
    id: &str,
    form: &FormPayload,
) -> Result<(String, MeetingRequest), ActionError> {
    let id = required_id(id, Entity::Meeting)?;
    let (form, mut request) = meeting_request(ctx, form)?;
    request.start_time = validation::to_iso8601(&form.start_time, "start time")?;
    request.end_time = validation::to_iso8601(&form.end_time, "end time")?;
    request.status = Some(MEETING_STATUS_SCHEDULED.to_string());
    Ok((id, request))
}

/// POST /Meetings
pub async fn create_meeting(ctx: &ActionContext, form: &FormPayload) -> ActionResult {
    let request = match meeting_request(ctx, form) {
        Ok((_, request)) => request,
        Err(err) => return handle_api_error(&err, Entity::Meeting, "create meetings"),
    };

    let outcome: Result<(), ActionError> = async {
        let client = ctx.client()?;
        client.post(client.endpoint(&["Meetings"]), &request).await
    }
    .await;

    match outcome {
        Ok(()) => {
            ctx.revalidate(&[MEETINGS_VIEW, CALENDAR_VIEW]);
            tracing::info!(
                "Created meeting '{}' with {} attendees",
                request.title,
                request.attendee_ids.len()
            );
            ActionResult::ok("Meeting created successfully!")
        }
        Err(err) => handle_api_error(&err, Entity::Meeting, "create meetings"),
    }
}

/// PUT /Meetings/{id}; status is reset to Scheduled and times go out as ISO-8601
pub async fn update_meeting(ctx: &ActionContext, id: &str, form: &FormPayload) -> ActionResult {
    let (id, request) = match update_request(ctx, id, form) {
        Ok(prepared) => prepared,
        Err(err) => return handle_api_error(&err, Entity::Meeting, "update meetings"),
    };

    let outcome: Result<(), ActionError> = async {
        let client = ctx.client()?;
        client.put(client.endpoint(&["Meetings", id.as_str()]), &request).await
    }
    .await;

    match outcome {
        Ok(()) => {
            let edit_view = meeting_edit_view(&id);
            ctx.revalidate(&[MEETINGS_VIEW, CALENDAR_VIEW, edit_view.as_str()]);
            tracing::info!("Updated meeting {}", id);
            ActionResult::ok("Meeting updated successfully!")
        }
        Err(err) => handle_api_error(&err, Entity::Meeting, "update meetings"),
    }
}

/// DELETE /Meetings/{id}
pub async fn delete_meeting(ctx: &ActionContext, id: &str) -> ActionResult {
    let outcome: Result<String, ActionError> = async {
        let id = required_id(id, Entity::Meeting)?;
        let client = ctx.client()?;
        client.delete(client.endpoint(&["Meetings", id.as_str()])).await?;
        Ok(id)
    }
    .await;

    match outcome {
        Ok(id) => {
            ctx.revalidate(&[MEETINGS_VIEW, CALENDAR_VIEW]);
            tracing::info!("Deleted meeting {}", id);
            ActionResult::ok("Meeting deleted successfully!")
        }
        Err(err) => handle_api_error(&err, Entity::Meeting, "delete meetings"),
    }
}

/// GET /Meetings/Form-Data
///
/// Feeds the meeting form rather than handling a submit, so failures are
/// returned to the caller instead of being folded into an `ActionResult`.
pub async fn get_meeting_form_data(ctx: &ActionContext) -> Result<MeetingFormData, ActionError> {
    let client = ctx.client()?;
    client
        .get(client.endpoint(&["Meetings", "Form-Data"]))
        .await
        .map_err(|err| {
            tracing::error!("Failed to load meeting form data: {}", err);
            err
        })
}

/// GET /Meetings/Details/{id}; errors propagate like `get_meeting_form_data`
pub async fn get_meeting_for_edit(ctx: &ActionContext, id: &str) -> Result<MeetingDetails, ActionError> {
    let id = required_id(id, Entity::Meeting)?;
    let client = ctx.client()?;
    client
        .get(client.endpoint(&["Meetings", "Details", id.as_str()]))
        .await
        .map_err(|err| {
            tracing::error!("Failed to load meeting {} for editing: {}", id, err);
            err
        })
}
