use crate::actions::{required_id, ActionContext};
use crate::error::{handle_api_error, ActionError, Entity};
use crate::form::{FormPayload, UserForm};
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::revalidate::USERS_VIEW;
use crate::types::{ActionResult, Role};
use crate::validation;

/// POST /Users
pub async fn create_user(ctx: &ActionContext, form: &FormPayload) -> ActionResult {
    let form = UserForm::from_payload(form);
    if let Err(err) = validation::validate_user_create(&form) {
        return handle_api_error(&ActionError::from(err), Entity::User, "create users");
    }

    let request = CreateUserRequest {
        full_name: form.full_name,
        email: form.email,
        password: form.password,
        role_id: Role::from_name(&form.role).id(),
    };

    let outcome: Result<(), ActionError> = async {
        let client = ctx.client()?;
        client.post(client.endpoint(&["Users"]), &request).await
    }
    .await;

    match outcome {
        Ok(()) => {
            ctx.revalidate(&[USERS_VIEW]);
            tracing::info!("Created user {}", request.email);
            ActionResult::ok("User created successfully!")
        }
        Err(err) => handle_api_error(&err, Entity::User, "create users"),
    }
}

/// GET /Users/{id}
pub async fn get_user(ctx: &ActionContext, id: &str) -> ActionResult<User> {
    let outcome: Result<User, ActionError> = async {
        let id = required_id(id, Entity::User)?;
        let client = ctx.client()?;
        client.get(client.endpoint(&["Users", id.as_str()])).await
    }
    .await;

    match outcome {
        Ok(user) => ActionResult::ok_with("User loaded successfully.", user),
        Err(err) => handle_api_error(&err, Entity::User, "view users"),
    }
}

/// PUT /Users/{id}
pub async fn update_user(ctx: &ActionContext, id: &str, form: &FormPayload) -> ActionResult {
    let id = match required_id(id, Entity::User) {
        Ok(id) => id,
        Err(err) => return handle_api_error(&ActionError::from(err), Entity::User, "update users"),
    };
    let form = UserForm::from_payload(form);
    if let Err(err) = validation::validate_user_update(&form) {
        return handle_api_error(&ActionError::from(err), Entity::User, "update users");
    }

    let request = UpdateUserRequest {
        full_name: form.full_name,
        email: form.email,
        role_id: Role::from_name(&form.role).id(),
    };

    let outcome: Result<(), ActionError> = async {
        let client = ctx.client()?;
        client.put(client.endpoint(&["Users", id.as_str()]), &request).await
    }
    .await;

    match outcome {
        Ok(()) => {
            ctx.revalidate(&[USERS_VIEW]);
            tracing::info!("Updated user {}", id);
            ActionResult::ok("User updated successfully!")
        }
        Err(err) => handle_api_error(&err, Entity::User, "update users"),
    }
}

/// DELETE /Users/{id}
pub async fn delete_user(ctx: &ActionContext, id: &str) -> ActionResult {
    let outcome: Result<String, ActionError> = async {
        let id = required_id(id, Entity::User)?;
        let client = ctx.client()?;
        client.delete(client.endpoint(&["Users", id.as_str()])).await?;
        Ok(id)
    }
    .await;

    match outcome {
        Ok(id) => {
            ctx.revalidate(&[USERS_VIEW]);
            tracing::info!("Deleted user {}", id);
            ActionResult::ok("User deleted successfully!")
        }
        Err(err) => handle_api_error(&err, Entity::User, "delete users"),
    }
}
