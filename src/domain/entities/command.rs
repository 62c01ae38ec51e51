use std::collections::HashMap;

use crate::application::errors::CommandError;
use crate::domain::entities::Reply;

/// Handler invoked with the raw argument string (command) or payload (callback)
pub type CommandHandler = Box<dyn Fn(&str) -> Result<Reply, CommandError> + Send + Sync>;

/// Represents a bot command or callback route
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub usage: Option<String>,
    pub handler: Option<CommandHandler>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            usage: None,
            handler: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) -> Result<Reply, CommandError> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Run the handler, or report that the route has nothing behind it
    pub fn execute(&self, input: &str) -> Result<Reply, CommandError> {
        match &self.handler {
            Some(handler) => handler(input),
            None => Err(CommandError::UnknownRoute(format!(
                "{} is not implemented",
                self.name
            ))),
        }
    }
}

/// Registry of routes, keyed by name and kept in registration order
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
    order: Vec<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command; a later registration under the same name replaces the earlier one
    pub fn register(&mut self, command: Command) {
        if !self.commands.contains_key(&command.name) {
            self.order.push(command.name.clone());
        }
        self.commands.insert(command.name.clone(), command);
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.order.iter().filter_map(|name| self.commands.get(name))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_keeps_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("help"));
        registry.register(Command::new("get"));
        registry.register(Command::new("list"));
        registry.register(Command::new("get").with_description("replaced"));

        let names: Vec<&str> = registry.all().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["help", "get", "list"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.get("get").and_then(|c| c.description.as_deref()),
            Some("replaced")
        );
    }

    #[test]
    fn test_command_without_handler_is_reported() {
        let cmd = Command::new("edit");
        assert!(matches!(cmd.execute(""), Err(CommandError::UnknownRoute(_))));

        let cmd = Command::new("ping").with_handler(|_| Ok(Reply::text("pong")));
        assert_eq!(cmd.execute("").unwrap().text, "pong");
    }
}
