// The `serving` scaffold: CRUD-named subcommands with no state behind them.

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingCommand {
    /// List all items
    List,
    /// Create a new item
    Create,
    /// Update an existing item
    Update,
    /// Delete an existing item
    Delete,
}

impl ServingCommand {
    pub fn message(self) -> &'static str {
        match self {
            ServingCommand::List => "Listing all items",
            ServingCommand::Create => "Creating a new item",
            ServingCommand::Update => "Updating an item",
            ServingCommand::Delete => "Deleting an item",
        }
    }

    pub fn run(self) {
        tracing::debug!(command = ?self, "running serving command");
        println!("{}", self.message());
    }
}
