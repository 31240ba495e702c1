//! Form actions, one module per entity.
//!
//! Every action follows the same sequence: project and validate the form,
//! build an authenticated client, call the remote API, then either mark the
//! affected views as stale and report success or hand the failure to the
//! error normalizer. Nothing is retried and nothing is kept between calls.

pub mod account;
pub mod meetings;
pub mod minutes;
pub mod profile;
pub mod rooms;
pub mod search;
pub mod users;

use std::sync::Arc;

use crate::api::{create_authenticated_api_client, ApiClient};
use crate::config::{ApiConfig, AppConfig, ValidationConfig};
use crate::error::{ActionError, Entity, ValidationError};
use crate::revalidate::Revalidator;
use crate::types::Session;

/// Everything an action needs from its caller, passed explicitly
#[derive(Clone)]
pub struct ActionContext {
    pub session: Option<Session>,
    pub api: ApiConfig,
    pub validation: ValidationConfig,
    pub revalidator: Arc<dyn Revalidator>,
}

impl ActionContext {
    pub fn new(session: Option<Session>, config: &AppConfig, revalidator: Arc<dyn Revalidator>) -> Self {
        Self {
            session,
            api: config.api.clone(),
            validation: config.validation.clone(),
            revalidator,
        }
    }

    pub fn client(&self) -> Result<ApiClient, ActionError> {
        create_authenticated_api_client(self.session.as_ref(), &self.api)
    }

    pub fn revalidate(&self, paths: &[&str]) {
        for path in paths {
            self.revalidator.revalidate_path(path);
        }
    }
}

/// Trimmed id, or the "{Entity} ID is required." validation failure
pub(crate) fn required_id(id: &str, entity: Entity) -> Result<String, ValidationError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError(entity.id_required_message()));
    }
    Ok(id.to_string())
}
