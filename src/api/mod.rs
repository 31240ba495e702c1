pub mod client;

pub use client::{create_authenticated_api_client, ApiClient};
