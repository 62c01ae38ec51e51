//! Domain layer - Core business objects and the seams to infrastructure
//!
//! This layer contains:
//! - Entities: Car, routes, messages, replies, command registry
//! - Traits: Abstractions for infrastructure (Bot, CarStore)

pub mod entities;
pub mod traits;
