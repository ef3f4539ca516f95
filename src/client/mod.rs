//! Browser-side portal logic, expressed as plain state machines over an
//! injected [`PortalApi`]: the session-state store, the route guard, the
//! enrollment page controller, session administration controls and forms.

pub mod admin;
pub mod api;
pub mod auth_store;
pub mod enrollment;
pub mod forms;
pub mod guard;
pub mod storage;

pub use api::{ClientError, HttpPortalApi, PortalApi};
