//! Request handlers.

pub mod edit;
pub mod forms;
pub mod health;
pub mod upload;
pub mod videos;

pub use health::*;
