//! Command router: maps command names to handlers that validate arguments,
//! call the [`GroupStore`] and format the reply.
//!
//! Handlers are stateless; every invocation is an independent request/response.
//! Storage errors are returned to the caller untouched (no retry, no reply).

use std::sync::Arc;

use async_trait::async_trait;

use crate::{formatting, ports::GroupStore, Result};

/// Maximum number of entries returned by `/list` and `/search`.
pub const RESULT_LIMIT: u32 = 10;

/// A single chat command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name without the leading slash. Matched exactly.
    fn name(&self) -> &'static str;

    /// Short description for the bot's command menu.
    fn description(&self) -> &'static str;

    /// Run the command with whitespace-split arguments and return the reply.
    async fn handle(&self, args: &[String]) -> Result<String>;
}

pub struct StartCommand;

#[async_trait]
impl CommandHandler for StartCommand {
    fn name(&self) -> &'static str {
        "start"
    }

    fn description(&self) -> &'static str {
        "Show the help message"
    }

    async fn handle(&self, _args: &[String]) -> Result<String> {
        Ok(formatting::HELP_TEXT.to_string())
    }
}

pub struct AddCommand {
    store: Arc<dyn GroupStore>,
}

impl AddCommand {
    pub fn new(store: Arc<dyn GroupStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommandHandler for AddCommand {
    fn name(&self) -> &'static str {
        "add"
    }

    fn description(&self) -> &'static str {
        "Add a group: /add <name> <link>"
    }

    async fn handle(&self, args: &[String]) -> Result<String> {
        let Some((link, name_tokens)) = args.split_last() else {
            return Ok(formatting::ADD_USAGE.to_string());
        };
        if name_tokens.is_empty() {
            return Ok(formatting::ADD_USAGE.to_string());
        }

        let name = name_tokens.join(" ");
        self.store.insert_group(&name, link).await?;
        tracing::info!(name = %name, link = %link, "group added");

        Ok(formatting::group_added(&name, link))
    }
}

pub struct ListCommand {
    store: Arc<dyn GroupStore>,
}

impl ListCommand {
    pub fn new(store: Arc<dyn GroupStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommandHandler for ListCommand {
    fn name(&self) -> &'static str {
        "list"
    }

    fn description(&self) -> &'static str {
        "Show the latest groups"
    }

    async fn handle(&self, _args: &[String]) -> Result<String> {
        let rows = self.store.list_recent(RESULT_LIMIT).await?;
        Ok(formatting::format_entries_or(
            &rows,
            formatting::NO_GROUPS_SAVED,
        ))
    }
}

pub struct SearchCommand {
    store: Arc<dyn GroupStore>,
}

impl SearchCommand {
    pub fn new(store: Arc<dyn GroupStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommandHandler for SearchCommand {
    fn name(&self) -> &'static str {
        "search"
    }

    fn description(&self) -> &'static str {
        "Search groups by name: /search <term>"
    }

    async fn handle(&self, args: &[String]) -> Result<String> {
        if args.is_empty() {
            return Ok(formatting::SEARCH_USAGE.to_string());
        }

        let term = args.join(" ");
        let rows = self.store.search_by_name(&term, RESULT_LIMIT).await?;
        Ok(formatting::format_entries_or(
            &rows,
            formatting::NO_GROUPS_FOUND,
        ))
    }
}

/// Fixed mapping from command name to handler.
pub struct Router {
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl Router {
    /// The bot's standard command set over `store`.
    pub fn new(store: Arc<dyn GroupStore>) -> Self {
        Self::with_handlers(vec![
            Box::new(StartCommand),
            Box::new(AddCommand::new(store.clone())),
            Box::new(ListCommand::new(store.clone())),
            Box::new(SearchCommand::new(store)),
        ])
    }

    pub fn with_handlers(handlers: Vec<Box<dyn CommandHandler>>) -> Self {
        Self { handlers }
    }

    /// `(name, description)` for every registered command, in registration order.
    pub fn commands(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.handlers.iter().map(|h| (h.name(), h.description()))
    }

    /// Run `name` with `args`.
    ///
    /// Returns `None` when no handler is registered under `name`; routing of
    /// unknown commands is left to the transport.
    pub async fn dispatch(&self, name: &str, args: &[String]) -> Option<Result<String>> {
        let handler = self.handlers.iter().find(|h| h.name() == name)?;
        tracing::debug!(command = name, args = args.len(), "dispatching command");
        Some(handler.handle(args).await)
    }
}
