//! Persona generation: the request sent to the service, the client that
//! sends it, and the view composed from its answer.

pub mod client;
pub mod render;
pub mod types;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub mod stub_http;

pub use client::{HttpPersonaClient, PersonaGenerator};
pub use render::{ResultView, SavedProfile};
pub use types::{PersonaRequest, PersonaResult, ServiceHealth};
