//! Route paths carried by chat commands and inline-button callback data.
//!
//! A command is written as `/name__domain__subdomain`, a callback as
//! `domain__subdomain__name__data`.

use std::fmt;
use crate::application::errors::CommandError;

/// Separator between route segments
pub const PATH_SEPARATOR: &str = "__";

/// Route of a chat command, e.g. `list__insurance__car`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPath {
    pub command_name: String,
    pub domain: String,
    pub subdomain: String,
}

impl CommandPath {
    pub fn new(
        command_name: impl Into<String>,
        domain: impl Into<String>,
        subdomain: impl Into<String>,
    ) -> Self {
        Self {
            command_name: command_name.into(),
            domain: domain.into(),
            subdomain: subdomain.into(),
        }
    }

    /// Parse the command word (without the leading `/`)
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let parts: Vec<&str> = text.split(PATH_SEPARATOR).collect();
        match parts.as_slice() {
            [name, domain, subdomain]
                if !name.is_empty() && !domain.is_empty() && !subdomain.is_empty() =>
            {
                Ok(Self::new(*name, *domain, *subdomain))
            }
            _ => Err(CommandError::UnknownRoute(format!("unknown command: /{}", text))),
        }
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.command_name,
            self.domain,
            self.subdomain,
            sep = PATH_SEPARATOR
        )
    }
}

/// Route of an inline-button callback plus its opaque payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackPath {
    pub domain: String,
    pub subdomain: String,
    pub callback_name: String,
    pub callback_data: String,
}

impl CallbackPath {
    pub fn new(
        domain: impl Into<String>,
        subdomain: impl Into<String>,
        callback_name: impl Into<String>,
        callback_data: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            subdomain: subdomain.into(),
            callback_name: callback_name.into(),
            callback_data: callback_data.into(),
        }
    }

    /// Parse raw callback data. The payload is everything after the third
    /// separator, so it may contain the separator itself.
    pub fn parse(data: &str) -> Result<Self, CommandError> {
        let parts: Vec<&str> = data.splitn(4, PATH_SEPARATOR).collect();
        match parts.as_slice() {
            [domain, subdomain, name, rest @ ..]
                if !domain.is_empty() && !subdomain.is_empty() && !name.is_empty() =>
            {
                let payload = rest.first().copied().unwrap_or_default();
                Ok(Self::new(*domain, *subdomain, *name, payload))
            }
            _ => Err(CommandError::UnknownRoute(format!("unknown callback: {}", data))),
        }
    }
}

impl fmt::Display for CallbackPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}",
            self.domain,
            self.subdomain,
            self.callback_name,
            self.callback_data,
            sep = PATH_SEPARATOR
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_path_parse() {
        let path = CommandPath::parse("list__insurance__car").unwrap();
        assert_eq!(path.command_name, "list");
        assert_eq!(path.domain, "insurance");
        assert_eq!(path.subdomain, "car");
        assert_eq!(path.to_string(), "list__insurance__car");
    }

    #[test]
    fn test_command_path_rejects_short_and_long_forms() {
        assert!(matches!(CommandPath::parse("help"), Err(CommandError::UnknownRoute(_))));
        assert!(CommandPath::parse("list__insurance").is_err());
        assert!(CommandPath::parse("list__insurance__car__extra").is_err());
        assert!(CommandPath::parse("list____car").is_err());
    }

    #[test]
    fn test_callback_path_keeps_payload_intact() {
        let raw = r#"insurance__car__list__{"offset":3,"page_size":3}"#;
        let path = CallbackPath::parse(raw).unwrap();
        assert_eq!(path.domain, "insurance");
        assert_eq!(path.subdomain, "car");
        assert_eq!(path.callback_name, "list");
        assert_eq!(path.callback_data, r#"{"offset":3,"page_size":3}"#);
        assert_eq!(path.to_string(), raw);

        let nested = CallbackPath::parse("insurance__car__list__a__b").unwrap();
        assert_eq!(nested.callback_data, "a__b");
    }

    #[test]
    fn test_callback_path_without_payload() {
        let path = CallbackPath::parse("insurance__car__list").unwrap();
        assert_eq!(path.callback_data, "");
        assert!(CallbackPath::parse("insurance__car").is_err());
    }
}
