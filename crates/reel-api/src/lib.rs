//! Reel API Library
//!
//! This crate provides the HTTP handlers, the transfer coordinator and the
//! application setup for the video transfer service.

mod handlers;
mod middleware;
mod telemetry;

pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use middleware::RequestId;
pub use services::{ScratchArea, TransferCoordinator, TransferResponse};
pub use state::AppState;
