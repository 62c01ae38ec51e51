use crate::domain::entities::{Command, CommandPath, CommandRegistry, Reply};
use crate::application::errors::CommandError;

/// Routes commands and callbacks of one domain/subdomain pair to their handlers
pub struct CommandService {
    domain: String,
    subdomain: String,
    commands: CommandRegistry,
    callbacks: CommandRegistry,
}

impl CommandService {
    pub fn new(domain: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            subdomain: subdomain.into(),
            commands: CommandRegistry::new(),
            callbacks: CommandRegistry::new(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    pub fn register(&mut self, command: Command) {
        self.commands.register(command);
    }

    pub fn register_callback(&mut self, callback: Command) {
        self.callbacks.register(callback);
    }

    /// Run the command `name` with its raw argument string.
    ///
    /// Argument errors carry the command's usage line when it has one.
    pub fn handle(&self, name: &str, args: &str) -> Result<Reply, CommandError> {
        let cmd = self.commands.get(name).ok_or_else(|| {
            CommandError::UnknownRoute(format!(
                "unknown command: /{}",
                CommandPath::new(name, &self.domain, &self.subdomain)
            ))
        })?;
        tracing::debug!("{}/{}: command {} args {:?}", self.domain, self.subdomain, name, args);
        cmd.execute(args).map_err(|err| match (err, &cmd.usage) {
            (CommandError::InvalidArgs(msg), Some(usage)) => {
                CommandError::InvalidArgs(format!("{}\nUsage: {}", msg, usage))
            }
            (err, _) => err,
        })
    }

    /// Run the callback `name` with its raw payload
    pub fn handle_callback(&self, name: &str, data: &str) -> Result<Reply, CommandError> {
        let callback = self.callbacks.get(name).ok_or_else(|| {
            CommandError::UnknownRoute(format!(
                "unknown callback {} in {}/{}",
                name, self.domain, self.subdomain
            ))
        })?;
        tracing::debug!("{}/{}: callback {} data {:?}", self.domain, self.subdomain, name, data);
        callback.execute(data)
    }

    /// `(route name, description)` of the registered commands, in registration order
    pub fn command_menu(&self) -> Vec<(String, String)> {
        self.commands
            .all()
            .map(|cmd| {
                let path = CommandPath::new(&cmd.name, &self.domain, &self.subdomain).to_string();
                let description = cmd.description.clone().unwrap_or_else(|| cmd.name.clone());
                (path, description)
            })
            .collect()
    }

    pub fn get_help(&self, command: Option<&str>) -> String {
        if let Some(name) = command {
            if let Some(cmd) = self.commands.get(name) {
                let path = CommandPath::new(&cmd.name, &self.domain, &self.subdomain);
                let mut help = format!("/{} — {}", path, cmd.description.as_deref().unwrap_or("No description"));
                if let Some(usage) = &cmd.usage {
                    help.push_str(&format!("\nUsage: {}", usage));
                }
                return help;
            }
            return format!("Command {} not found", name);
        }

        self.commands
            .all()
            .map(|cmd| {
                let path = CommandPath::new(&cmd.name, &self.domain, &self.subdomain);
                format!("/{} — {}", path, cmd.description.as_deref().unwrap_or(""))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CommandService {
        let mut service = CommandService::new("insurance", "car");
        service.register(
            Command::new("echo")
                .with_description("echo the arguments")
                .with_usage("/echo__insurance__car <text>")
                .with_handler(|args| {
                    if args.is_empty() {
                        Err(CommandError::InvalidArgs("nothing to echo".to_string()))
                    } else {
                        Ok(Reply::text(args))
                    }
                }),
        );
        service.register(
            Command::new("fail")
                .with_handler(|_| Err(CommandError::InvalidArgs("always".to_string()))),
        );
        service.register_callback(Command::new("list").with_handler(|data| Ok(Reply::text(format!("page {}", data)))));
        service
    }

    #[test]
    fn test_handle_routes_by_name() {
        let service = service();
        assert_eq!(service.handle("echo", "hi there").unwrap().text, "hi there");
        assert_eq!(service.handle_callback("list", "3").unwrap().text, "page 3");
    }

    #[test]
    fn test_invalid_args_carry_usage() {
        let service = service();
        assert_eq!(
            service.handle("echo", "").unwrap_err(),
            CommandError::InvalidArgs("nothing to echo\nUsage: /echo__insurance__car <text>".to_string())
        );
        assert_eq!(
            service.handle("fail", "x").unwrap_err(),
            CommandError::InvalidArgs("always".to_string())
        );
    }

    #[test]
    fn test_unknown_names_are_reported() {
        let service = service();
        let err = service.handle("launch", "").unwrap_err();
        assert_eq!(err, CommandError::UnknownRoute("unknown command: /launch__insurance__car".to_string()));
        assert!(matches!(service.handle_callback("echo", ""), Err(CommandError::UnknownRoute(_))));
    }

    #[test]
    fn test_help_and_names() {
        let service = service();
        assert_eq!(
            service.command_menu(),
            vec![
                ("echo__insurance__car".to_string(), "echo the arguments".to_string()),
                ("fail__insurance__car".to_string(), "fail".to_string()),
            ]
        );
        assert_eq!(service.get_help(None), "/echo__insurance__car — echo the arguments\n/fail__insurance__car — ");
        assert!(service.get_help(Some("echo")).contains("Usage: /echo__insurance__car <text>"));
        assert_eq!(service.get_help(Some("nope")), "Command nope not found");
    }
}
