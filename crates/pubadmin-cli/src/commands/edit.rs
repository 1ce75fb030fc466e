use std::path::PathBuf;

use clap::Parser;
use pubadmin_console::{ConsoleError, form::PublicationForm, upload::CoverImage};
use pubadmin_types::config::ConsoleConfig;

use crate::commands::{Executor, open_store, uploader};

#[derive(Parser, Debug)]
pub struct EditCmd {
    #[command(flatten)]
    console: ConsoleConfig,

    #[arg(long, help = "Id of publication to change")]
    id: i64,

    #[arg(long, help = "New title")]
    title: Option<String>,

    #[arg(long, help = "New release date in YYYY-MM-DD format")]
    release_date: Option<String>,

    #[arg(long, help = "New description, empty string removes description")]
    description: Option<String>,

    #[arg(long, help = "New cover image file, current cover is kept if not provided")]
    cover: Option<PathBuf>,
}

impl Executor for EditCmd {
    async fn run(self) -> anyhow::Result<()> {
        let store = open_store(&self.console).await?;
        let current = store
            .get(self.id)
            .await
            .ok_or(ConsoleError::NotFound(self.id))?;

        let mut form = PublicationForm::edit(&current);
        if let Some(title) = self.title {
            form.set_title(title)?;
        }
        if let Some(release_date) = self.release_date {
            form.set_release_date(release_date)?;
        }
        if let Some(description) = self.description {
            form.set_description(description)?;
        }
        if let Some(path) = self.cover {
            form.select_cover(Some(CoverImage::from_path(path).await?))?;
        }

        let uploader = uploader(&self.console)?;
        let outcome = form.submit(&store, &uploader).await?;
        println!(
            "{} (id {}): {}",
            outcome.notice, outcome.publication.id, outcome.publication.title
        );
        Ok(())
    }
}
