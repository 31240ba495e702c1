pub mod actions;
pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod revalidate;
pub mod server;
pub mod types;
pub mod validation;

pub use actions::ActionContext;
pub use error::{ActionError, Entity, ValidationError};
pub use form::FormPayload;
pub use types::{ActionResult, Role, Session};
