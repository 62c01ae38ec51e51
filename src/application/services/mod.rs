//! Application services - Command handling and message delivery

pub mod car_commander;
pub mod command_service;
pub mod message_service;
pub mod pagination;

pub use car_commander::CarCommander;
pub use command_service::CommandService;
pub use message_service::MessageService;
pub use pagination::ListCursor;
