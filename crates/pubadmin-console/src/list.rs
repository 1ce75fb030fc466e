use std::collections::HashSet;

use pubadmin_types::{Publication, cover::COVER_ERROR_URL};
use tracing::{debug, error};

use crate::{
    backend::PublicationBackend,
    error::{ConsoleError, Result},
    route::Route,
    store::PublicationStore,
};

/// Longer descriptions are collapsed to this many characters
pub const DESCRIPTION_PREVIEW_LEN: usize = 100;
pub const ELLIPSIS: &str = "...";
pub const NO_DESCRIPTION: &str = "No description";
pub const SHOW_MORE: &str = "Show more";
pub const SHOW_LESS: &str = "Show less";
pub const EMPTY_TITLE: &str = "No publications yet";
pub const EMPTY_HINT: &str = "Added publications will be shown here.";

/// First `max_len` characters followed by ellipsis, or whole text if it is short enough
pub fn truncate_text(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionView {
    pub text: String,
    /// Label of expand/collapse control, present only for long descriptions
    pub toggle: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position in the table
    pub position: usize,
    pub id: i64,
    pub title: String,
    pub release_date: String,
    pub description: DescriptionView,
    pub cover_url: String,
    /// delete of this row is in flight, its actions are disabled
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty,
    Table(Vec<Row>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub id: i64,
    pub title: String,
}

impl DeleteConfirmation {
    pub fn message(&self) -> String {
        format!(
            "Are you sure you want to delete publication \"{}\"? Deleted publication cannot be restored.",
            self.title
        )
    }
}

/// Transient state of the publications table
#[derive(Debug, Clone, Default)]
pub struct PublicationList {
    expanded: HashSet<i64>,
    broken_covers: HashSet<i64>,
    confirmation: Option<DeleteConfirmation>,
    deleting: Option<i64>,
    error: Option<String>,
}

impl PublicationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, records: &[Publication]) -> ListView {
        if records.is_empty() {
            return ListView::Empty;
        }
        let rows = records
            .iter()
            .enumerate()
            .map(|(idx, record)| Row {
                position: idx + 1,
                id: record.id,
                title: record.title.clone(),
                release_date: record.release_date.clone(),
                description: self.description_view(record),
                cover_url: if self.broken_covers.contains(&record.id) {
                    COVER_ERROR_URL.to_string()
                } else {
                    record.cover_url.clone()
                },
                busy: self.deleting == Some(record.id),
            })
            .collect();
        ListView::Table(rows)
    }

    fn description_view(&self, record: &Publication) -> DescriptionView {
        let description = record.description.as_deref().unwrap_or_default();
        if description.is_empty() {
            return DescriptionView {
                text: NO_DESCRIPTION.to_string(),
                toggle: None,
            };
        }
        let expanded = self.is_expanded(record.id);
        let long = description.chars().count() > DESCRIPTION_PREVIEW_LEN;
        DescriptionView {
            text: if expanded {
                description.to_string()
            } else {
                truncate_text(description, DESCRIPTION_PREVIEW_LEN)
            },
            toggle: match (long, expanded) {
                (false, _) => None,
                (true, false) => Some(SHOW_MORE),
                (true, true) => Some(SHOW_LESS),
            },
        }
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }

    /// Flips expanded state of one description, returns new state
    pub fn toggle_description(&mut self, id: i64) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    /// Cover image of record failed to load, fallback image will be shown
    pub fn cover_failed(&mut self, id: i64) {
        self.broken_covers.insert(id);
    }

    pub fn deleting(&self) -> Option<i64> {
        self.deleting
    }

    pub fn confirmation(&self) -> Option<&DeleteConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn edit(&self, record: &Publication) -> Result<Route> {
        if self.deleting == Some(record.id) {
            return Err(ConsoleError::Busy);
        }
        Ok(Route::Edit(record.id))
    }

    /// Opens confirmation dialog for deleting the record
    pub fn request_delete(&mut self, record: &Publication) -> Result<()> {
        if self.deleting.is_some() {
            return Err(ConsoleError::Busy);
        }
        self.confirmation = Some(DeleteConfirmation {
            id: record.id,
            title: record.title.clone(),
        });
        Ok(())
    }

    pub fn cancel_delete(&mut self) -> Result<()> {
        if self.deleting.is_some() {
            return Err(ConsoleError::Busy);
        }
        self.confirmation = None;
        Ok(())
    }

    /// Marks confirmed record as busy and hands out the delete to run.
    ///
    /// `None` when no confirmation is open or a delete is already running.
    pub fn confirm_delete(&mut self) -> Option<DeleteRequest> {
        if self.deleting.is_some() {
            return None;
        }
        let id = self.confirmation.as_ref()?.id;
        self.deleting = Some(id);
        self.error = None;
        Some(DeleteRequest { id })
    }

    /// Closes the dialog and clears busy state whatever the outcome was
    pub fn finish_delete(&mut self, outcome: Result<()>) -> Result<()> {
        self.deleting = None;
        self.confirmation = None;
        match outcome {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("Deleting publication failed: {e}");
                self.error = Some(format!("Deleting publication failed: {e}"));
                Err(e)
            }
        }
    }

    /// Runs the confirmed delete, returns id of deleted record or `None` if nothing was confirmed
    pub async fn delete_confirmed<B: PublicationBackend>(
        &mut self,
        store: &PublicationStore<B>,
    ) -> Result<Option<i64>> {
        let Some(request) = self.confirm_delete() else {
            return Ok(None);
        };
        let id = request.id();
        let outcome = request.execute(store).await;
        self.finish_delete(outcome)?;
        self.expanded.remove(&id);
        self.broken_covers.remove(&id);
        Ok(Some(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRequest {
    id: i64,
}

impl DeleteRequest {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub async fn execute<B: PublicationBackend>(self, store: &PublicationStore<B>) -> Result<()> {
        debug!("Deleting publication {}", self.id);
        store.delete(self.id).await
    }
}
