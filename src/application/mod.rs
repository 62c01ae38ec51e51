//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: car command handlers, per-subdomain routing, message delivery
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing and dispatching

pub mod errors;
pub mod services;
pub mod messaging;
