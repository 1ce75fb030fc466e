use clap::Parser;
use pubadmin_console::{ConsoleError, list::PublicationList};
use pubadmin_types::config::ConsoleConfig;
use tokio::io::{AsyncBufReadExt as _, AsyncWriteExt as _, BufReader};

use crate::commands::{Executor, open_store};

#[derive(Parser, Debug)]
pub struct DeleteCmd {
    #[command(flatten)]
    console: ConsoleConfig,

    #[arg(long, help = "Id of publication to delete")]
    id: i64,

    #[arg(short, long, help = "Do not ask for confirmation")]
    yes: bool,
}

fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

async fn ask(question: &str) -> anyhow::Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{question} [y/N] ").as_bytes()).await?;
    stdout.flush().await?;
    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(is_confirmation(&answer))
}

impl Executor for DeleteCmd {
    async fn run(self) -> anyhow::Result<()> {
        let store = open_store(&self.console).await?;
        let record = store
            .get(self.id)
            .await
            .ok_or(ConsoleError::NotFound(self.id))?;

        let mut list = PublicationList::new();
        list.request_delete(&record)?;
        let confirmed = match list.confirmation() {
            Some(confirmation) if !self.yes => ask(&confirmation.message()).await?,
            _ => true,
        };
        if !confirmed {
            list.cancel_delete()?;
            println!("Nothing deleted");
            return Ok(());
        }

        if let Some(id) = list.delete_confirmed(&store).await? {
            println!("Publication {id} was deleted: {}", record.title);
        }
        Ok(())
    }
}
