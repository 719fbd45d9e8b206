//! Domain models

pub mod locator;
pub mod transfer;

pub use locator::ObjectLocator;
pub use transfer::{
    PendingTransfer, RequestValidationError, TransferRequest, TransferResult,
    PROCESSING_FAILED_MESSAGE, SUCCESS_MESSAGE,
};
