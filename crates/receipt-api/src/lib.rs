//! Receipt API Library
//!
//! HTTP handlers, error rendering, and application setup for the receipt service.

mod api_doc;
pub mod constants;
mod handlers;
mod telemetry;

pub mod error;
pub mod setup;
pub mod state;

pub use api_doc::ApiDoc;
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
