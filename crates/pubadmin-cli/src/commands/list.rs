use clap::Parser;
use pubadmin_console::list::PublicationList;
use pubadmin_types::config::ConsoleConfig;

use crate::{
    commands::{Executor, open_store},
    render::render_list,
};

#[derive(Parser, Debug)]
pub struct ListCmd {
    #[command(flatten)]
    console: ConsoleConfig,

    #[arg(
        long,
        help = "Show whole description of publication with this id, can be used multiple times"
    )]
    pub expand: Vec<i64>,
}

impl Executor for ListCmd {
    async fn run(self) -> anyhow::Result<()> {
        let store = open_store(&self.console).await?;
        let mut list = PublicationList::new();
        for id in self.expand {
            list.toggle_description(id);
        }
        let view = list.view(&store.list().await);
        print!("{}", render_list(&view));
        Ok(())
    }
}
