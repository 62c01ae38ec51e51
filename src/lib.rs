//! insurance-bot: chat command and inline-button dispatcher for the
//! insurance/car record set.
//!
//! Layers:
//! - domain: entities (Car, routes, messages, replies) and the Bot/CarStore traits
//! - application: errors, parsing, dispatching, command handlers
//! - infrastructure: config, in-memory storage, Telegram and console adapters

pub mod application;
pub mod domain;
pub mod infrastructure;
