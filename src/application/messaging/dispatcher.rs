//! Message dispatcher - Routes commands and callbacks to the service
//! registered for their domain/subdomain

use std::collections::HashMap;

use crate::domain::entities::{CallbackPath, CommandPath, Content, Message, Reply};
use crate::application::errors::CommandError;
use crate::application::services::CommandService;
use super::parser::MessageParser;

/// Dispatch result: a reply to send, nothing to send, or a handler error
pub type HandlerResult = Result<Option<Reply>, CommandError>;

/// Subdomain services of one domain
#[derive(Default)]
pub struct DomainRouter {
    subdomains: HashMap<String, CommandService>,
}

impl DomainRouter {
    pub fn register(&mut self, service: CommandService) {
        self.subdomains.insert(service.subdomain().to_string(), service);
    }

    pub fn get(&self, subdomain: &str) -> Option<&CommandService> {
        self.subdomains.get(subdomain)
    }

    pub fn services(&self) -> impl Iterator<Item = &CommandService> {
        self.subdomains.values()
    }
}

/// Message dispatcher - maps domain → subdomain → command/callback
pub struct MessageDispatcher {
    parser: MessageParser,
    domains: HashMap<String, DomainRouter>,
}

impl MessageDispatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            parser: MessageParser::new(prefix),
            domains: HashMap::new(),
        }
    }

    pub fn parser(&self) -> &MessageParser {
        &self.parser
    }

    /// Register a service under its own domain/subdomain; replaces an earlier one
    pub fn register(&mut self, service: CommandService) {
        tracing::debug!("Registering {}/{}", service.domain(), service.subdomain());
        self.domains
            .entry(service.domain().to_string())
            .or_default()
            .register(service);
    }

    /// Builder-style `register`
    pub fn with_service(mut self, service: CommandService) -> Self {
        self.register(service);
        self
    }

    /// `(route name, description)` of every registered command, sorted by name
    pub fn command_menu(&self) -> Vec<(String, String)> {
        let mut menu: Vec<(String, String)> = self
            .domains
            .values()
            .flat_map(|router| router.services())
            .flat_map(|service| service.command_menu())
            .collect();
        menu.sort();
        menu
    }

    /// Process a raw text message
    pub fn process_text(&self, chat_id: impl Into<String>, text: impl Into<String>) -> HandlerResult {
        let message = self.parser.parse(chat_id, text, None);
        self.dispatch(&message)
    }

    /// Route a message to its handler
    pub fn dispatch(&self, message: &Message) -> HandlerResult {
        match &message.content {
            Content::Command { name, args } => self.dispatch_command(name, args).map(Some),
            Content::CallbackData { data, .. } => self.dispatch_callback(data).map(Some),
            Content::Text(text) => {
                tracing::debug!("[{}] ignoring plain text ({} chars)", message.chat_id, text.len());
                Ok(None)
            }
            Content::Empty => Ok(None),
        }
    }

    fn dispatch_command(&self, name: &str, args: &str) -> Result<Reply, CommandError> {
        if name == "help" {
            return Ok(Reply::text(self.overview()));
        }
        let path = CommandPath::parse(name)?;
        let service = self.service(&path.domain, &path.subdomain)?;
        service.handle(&path.command_name, args)
    }

    fn dispatch_callback(&self, data: &str) -> Result<Reply, CommandError> {
        let path = CallbackPath::parse(data)?;
        let service = self.service(&path.domain, &path.subdomain)?;
        service.handle_callback(&path.callback_name, &path.callback_data)
    }

    fn service(&self, domain: &str, subdomain: &str) -> Result<&CommandService, CommandError> {
        let router = self
            .domains
            .get(domain)
            .ok_or_else(|| CommandError::UnknownRoute(format!("unknown domain: {}", domain)))?;
        router.get(subdomain).ok_or_else(|| {
            CommandError::UnknownRoute(format!("unknown subdomain: {}/{}", domain, subdomain))
        })
    }

    /// Top-level `/help`: every registered command with its description
    fn overview(&self) -> String {
        let mut sections: Vec<String> = self
            .domains
            .values()
            .flat_map(|router| router.services())
            .map(|service| service.get_help(None))
            .collect();
        sections.sort();
        if sections.is_empty() {
            return "No commands registered".to_string();
        }
        format!("Available commands:\n{}", sections.join("\n\n"))
    }
}
