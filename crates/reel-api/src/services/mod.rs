//! Request-scoped services

pub mod scratch;
pub mod transfer;

pub use scratch::ScratchArea;
pub use transfer::{TransferCoordinator, TransferResponse};
