//! Insurance/car commands: help, get, list, delete, new, edit and the
//! "Next page" list callback.

use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::application::services::pagination::{ListCursor, MAX_PAGE_SIZE};
use crate::application::services::CommandService;
use crate::domain::entities::{CallbackPath, Car, CarId, Command, Reply};
use crate::domain::traits::{CarStore, KeyboardButton};

pub const DOMAIN: &str = "insurance";
pub const SUBDOMAIN: &str = "car";
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Telegram drops buttons whose callback data is longer than this (bytes)
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

const LIST_CALLBACK: &str = "list";
const NEXT_PAGE_LABEL: &str = "Next page";
const LIST_HEADER: &str = "Here is the paged list of the cars: \n\n";

const HELP_TEXT: &str = "/help__insurance__car — print list of commands\n\
/get__insurance__car — get an entity\n\
/list__insurance__car — get a list of your entity\n\
/delete__insurance__car — delete an existing entity\n\
/new__insurance__car — create a new entity\n\
/edit__insurance__car — edit an entity";

/// Handlers for the car subdomain. Owns its store.
pub struct CarCommander {
    store: Arc<dyn CarStore>,
    default_page_size: usize,
}

impl CarCommander {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self {
            store,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Page size used by `list` without arguments. Zero falls back to the default,
    /// anything above `MAX_PAGE_SIZE` is capped.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = match page_size {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        };
        self
    }

    pub fn help(&self) -> Reply {
        Reply::text(HELP_TEXT)
    }

    pub fn get(&self, args: &str) -> Result<Reply, CommandError> {
        let id = parse_id(args)?;
        let car = self.store.describe(id)?;
        Ok(Reply::text(car.title))
    }

    pub fn list(&self, args: &str) -> Result<Reply, CommandError> {
        let mut parts = args.split_whitespace();
        let page_size = match (parts.next(), parts.next()) {
            (None, _) => {
                tracing::debug!("list page size not provided, use default = {}", self.default_page_size);
                self.default_page_size
            }
            (Some(raw), None) => parse_page_size(raw)?,
            (Some(_), Some(_)) => {
                return Err(CommandError::InvalidArgs(format!(
                    "expected at most one page size, got {:?}",
                    args
                )))
            }
        };
        self.list_page(ListCursor::first_page(page_size))
    }

    pub fn delete(&self, args: &str) -> Result<Reply, CommandError> {
        let id = parse_id(args)?;
        let text = if self.store.remove(id)? {
            tracing::info!("Deleted car {}", id);
            "deleted successfully"
        } else {
            "failed to delete"
        };
        Ok(Reply::text(text))
    }

    /// `new`: the whole argument string becomes the title
    pub fn create(&self, args: &str) -> Result<Reply, CommandError> {
        let title = args.trim();
        if title.is_empty() {
            return Err(CommandError::InvalidArgs("car title is empty".to_string()));
        }
        let id = self.store.create(Car::new(title))?;
        tracing::info!("Created car {}: {}", id, title);
        Ok(Reply::text(format!("Successfully added car with id {}", id)))
    }

    /// `edit <id> <title>`: the title is the rest of the line after the id
    pub fn edit(&self, args: &str) -> Result<Reply, CommandError> {
        let (raw_id, title) = args
            .trim()
            .split_once(char::is_whitespace)
            .map(|(id, rest)| (id, rest.trim()))
            .filter(|(_, rest)| !rest.is_empty())
            .ok_or_else(|| {
                CommandError::InvalidArgs(format!(
                    "wrong args number, should be 2 but passed: {:?}",
                    args
                ))
            })?;
        let id = parse_id(raw_id)?;
        self.store.update(id, Car::new(title))?;
        tracing::info!("Updated car {}: {}", id, title);
        Ok(Reply::text(format!("Successfully updated car with id {}", id)))
    }

    /// `list` callback: resume listing from the cursor in the payload
    pub fn callback_list(&self, data: &str) -> Result<Reply, CommandError> {
        let cursor = ListCursor::decode(data)?;
        self.list_page(cursor)
    }

    /// Render one page plus a "Next page" button pointing past it
    pub fn list_page(&self, cursor: ListCursor) -> Result<Reply, CommandError> {
        let cars = self.store.list(cursor.offset, cursor.page_size)?;
        tracing::debug!(
            "Listing {} cars from {} (store has {})",
            cars.len(),
            cursor.offset,
            self.store.count()?
        );

        let mut text = LIST_HEADER.to_string();
        for car in &cars {
            text.push_str(&car.title);
            text.push('\n');
        }

        let next = CallbackPath::new(DOMAIN, SUBDOMAIN, LIST_CALLBACK, cursor.next().encode()?).to_string();
        if next.len() > MAX_CALLBACK_DATA_LEN {
            return Err(CommandError::InvalidArgs(format!(
                "list offset {} is out of range",
                cursor.offset
            )));
        }
        Ok(Reply::text(text)
            .with_row(vec![KeyboardButton::new(NEXT_PAGE_LABEL).with_callback(next)]))
    }

    /// Register every car route in a `CommandService`
    pub fn into_service(self) -> CommandService {
        let commander = Arc::new(self);
        let mut service = CommandService::new(DOMAIN, SUBDOMAIN);

        let c = Arc::clone(&commander);
        service.register(
            Command::new("help")
                .with_description("print list of commands")
                .with_handler(move |_| Ok(c.help())),
        );

        let c = Arc::clone(&commander);
        service.register(
            Command::new("get")
                .with_description("get an entity")
                .with_usage("/get__insurance__car <id>")
                .with_handler(move |args| c.get(args)),
        );

        let c = Arc::clone(&commander);
        service.register(
            Command::new("list")
                .with_description("get a list of your entity")
                .with_usage("/list__insurance__car [page_size]")
                .with_handler(move |args| c.list(args)),
        );

        let c = Arc::clone(&commander);
        service.register(
            Command::new("delete")
                .with_description("delete an existing entity")
                .with_usage("/delete__insurance__car <id>")
                .with_handler(move |args| c.delete(args)),
        );

        let c = Arc::clone(&commander);
        service.register(
            Command::new("new")
                .with_description("create a new entity")
                .with_usage("/new__insurance__car <title>")
                .with_handler(move |args| c.create(args)),
        );

        let c = Arc::clone(&commander);
        service.register(
            Command::new("edit")
                .with_description("edit an entity")
                .with_usage("/edit__insurance__car <id> <title>")
                .with_handler(move |args| c.edit(args)),
        );

        service.register_callback(
            Command::new(LIST_CALLBACK).with_handler(move |data| commander.callback_list(data)),
        );

        service
    }
}

fn parse_id(raw: &str) -> Result<CarId, CommandError> {
    let raw = raw.trim();
    raw.parse::<CarId>()
        .map_err(|_| CommandError::InvalidArgs(format!("wrong car id: {:?}", raw)))
}

fn parse_page_size(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(n) if (1..=MAX_PAGE_SIZE).contains(&n) => Ok(n),
        Ok(n) => Err(CommandError::InvalidArgs(format!(
            "page size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, n
        ))),
        Err(_) => Err(CommandError::InvalidArgs(format!("wrong page size: {:?}", raw))),
    }
}
