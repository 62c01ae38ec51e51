//! Message handling - Parsing and routing of inbound events

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{DomainRouter, HandlerResult, MessageDispatcher};
pub use parser::MessageParser;
