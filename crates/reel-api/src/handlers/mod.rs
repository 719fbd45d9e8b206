pub mod health;
pub mod transfer;
