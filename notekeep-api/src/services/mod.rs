//! Service Layer
//!
//! Business logic that spans more than one store call lives here, keeping
//! route handlers thin and response types as pure DTOs.

mod order_service;

pub use order_service::*;
