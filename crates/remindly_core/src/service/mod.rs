//! Core use-case services.
//!
//! # Responsibility
//! - Turn submitted form state into persisted reminder records.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod reminder_service;
