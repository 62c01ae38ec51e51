//! Domain entities - Core business objects with no external dependencies

pub mod car;
pub mod command;
pub mod message;
pub mod reply;
pub mod route;

pub use car::{Car, CarId};
pub use command::{Command, CommandHandler, CommandRegistry};
pub use message::{Content, Message, MessageType};
pub use reply::Reply;
pub use route::{CallbackPath, CommandPath, PATH_SEPARATOR};
