use std::path::PathBuf;

use clap::Parser;
use pubadmin_console::{form::PublicationForm, upload::CoverImage};
use pubadmin_types::config::ConsoleConfig;

use crate::commands::{Executor, open_store, uploader};

#[derive(Parser, Debug)]
pub struct AddCmd {
    #[command(flatten)]
    console: ConsoleConfig,

    #[arg(long, help = "Title of publication, required")]
    title: String,

    #[arg(long, help = "Release date in YYYY-MM-DD format, required")]
    release_date: String,

    #[arg(long, help = "Optional description")]
    description: Option<String>,

    #[arg(
        long,
        help = "Cover image file, if not provided placeholder with title is used"
    )]
    cover: Option<PathBuf>,
}

impl Executor for AddCmd {
    async fn run(self) -> anyhow::Result<()> {
        let mut form = PublicationForm::new();
        form.set_title(self.title)?;
        form.set_release_date(self.release_date)?;
        if let Some(description) = self.description {
            form.set_description(description)?;
        }
        if let Some(path) = self.cover {
            form.select_cover(Some(CoverImage::from_path(path).await?))?;
        }

        let store = open_store(&self.console).await?;
        let uploader = uploader(&self.console)?;
        let outcome = form.submit(&store, &uploader).await?;
        println!(
            "{} (id {}): {}",
            outcome.notice, outcome.publication.id, outcome.publication.title
        );
        Ok(())
    }
}
