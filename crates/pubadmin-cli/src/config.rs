use clap::{Parser, Subcommand};

use crate::commands::{add::AddCmd, delete::DeleteCmd, edit::EditCmd, list::ListCmd};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "CLI for pubadmin - lists, adds, edits and deletes publications kept by pubadmin backend."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Shows table of publications
    List(ListCmd),
    /// Adds new publication
    Add(AddCmd),
    /// Changes existing publication
    Edit(EditCmd),
    /// Deletes publication
    Delete(DeleteCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::List(cmd) => cmd.run().await,
            Command::Add(cmd) => cmd.run().await,
            Command::Edit(cmd) => cmd.run().await,
            Command::Delete(cmd) => cmd.run().await,
        }
    }
}
