use crate::actions::{required_id, ActionContext};
use crate::error::{handle_api_error, ActionError, Entity};
use crate::form::{FormPayload, RoomForm};
use crate::models::{Room, RoomRequest};
use crate::revalidate::{room_edit_view, ROOMS_VIEW};
use crate::types::ActionResult;
use crate::validation;

fn room_request(form: &FormPayload) -> Result<RoomRequest, ActionError> {
    let form = RoomForm::from_payload(form);
    let valid = validation::validate_room(&form)?;
    Ok(RoomRequest {
        name: form.name,
        location: form.location,
        capacity: valid.capacity,
        features: valid.features,
    })
}

/// POST /Rooms
pub async fn create_room(ctx: &ActionContext, form: &FormPayload) -> ActionResult {
    let request = match room_request(form) {
        Ok(request) => request,
        Err(err) => return handle_api_error(&err, Entity::Room, "create rooms"),
    };

    let outcome: Result<(), ActionError> = async {
        let client = ctx.client()?;
        client.post(client.endpoint(&["Rooms"]), &request).await
    }
    .await;

    match outcome {
        Ok(()) => {
            ctx.revalidate(&[ROOMS_VIEW]);
            tracing::info!("Created room {}", request.name);
            ActionResult::ok("Room created successfully!")
        }
        Err(err) => handle_api_error(&err, Entity::Room, "create rooms"),
    }
}

/// GET /Rooms/{id}
pub async fn get_room(ctx: &ActionContext, id: &str) -> ActionResult<Room> {
    let outcome: Result<Room, ActionError> = async {
        let id = required_id(id, Entity::Room)?;
        let client = ctx.client()?;
        client.get(client.endpoint(&["Rooms", id.as_str()])).await
    }
    .await;

    match outcome {
        Ok(room) => ActionResult::ok_with("Room loaded successfully.", room),
        Err(err) => handle_api_error(&err, Entity::Room, "view rooms"),
    }
}

/// PUT /Rooms/{id}; capacity goes out as an integer
pub async fn update_room(ctx: &ActionContext, id: &str, form: &FormPayload) -> ActionResult {
    let prepared = required_id(id, Entity::Room)
        .map_err(ActionError::from)
        .and_then(|id| room_request(form).map(|request| (id, request)));
    let (id, request) = match prepared {
        Ok(prepared) => prepared,
        Err(err) => return handle_api_error(&err, Entity::Room, "update rooms"),
    };

    let outcome: Result<(), ActionError> = async {
        let client = ctx.client()?;
        client.put(client.endpoint(&["Rooms", id.as_str()]), &request).await
    }
    .await;

    match outcome {
        Ok(()) => {
            let edit_view = room_edit_view(&id);
            ctx.revalidate(&[ROOMS_VIEW, edit_view.as_str()]);
            tracing::info!("Updated room {}", id);
            ActionResult::ok("Room updated successfully!")
        }
        Err(err) => handle_api_error(&err, Entity::Room, "update rooms"),
    }
}

/// DELETE /Rooms/{id}
pub async fn delete_room(ctx: &ActionContext, id: &str) -> ActionResult {
    let outcome: Result<String, ActionError> = async {
        let id = required_id(id, Entity::Room)?;
        let client = ctx.client()?;
        client.delete(client.endpoint(&["Rooms", id.as_str()])).await?;
        Ok(id)
    }
    .await;

    match outcome {
        Ok(id) => {
            ctx.revalidate(&[ROOMS_VIEW]);
            tracing::info!("Deleted room {}", id);
            ActionResult::ok("Room deleted successfully!")
        }
        Err(err) => handle_api_error(&err, Entity::Room, "delete rooms"),
    }
}
