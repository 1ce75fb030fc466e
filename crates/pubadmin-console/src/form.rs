//! Add / edit form.
//!
//! Submission goes `Idle -> Submitting -> Idle | ErrorShown`. It is split into
//! [`PublicationForm::begin_submit`], [`SubmitRequest::execute`] and
//! [`PublicationForm::finish_submit`], so a presentation layer can render the
//! busy state while the request runs; [`PublicationForm::submit`] does all
//! three steps.

use pubadmin_types::{
    Publication, PublicationData,
    cover::{is_placeholder_for, placeholder_cover_url},
    publication::parse_release_date,
};
use tracing::{debug, error};

use crate::{
    backend::PublicationBackend,
    error::{ConsoleError, Result},
    route::Route,
    store::PublicationStore,
    upload::{CoverImage, ImageUploader},
};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Title and release date are required";
pub const INVALID_DATE_MESSAGE: &str = "Release date must be a date in YYYY-MM-DD format";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    ErrorShown(String),
}

/// Values as entered by user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub description: String,
    pub release_date: String,
    pub cover: Option<CoverImage>,
}

#[derive(Debug, Clone)]
pub struct PublicationForm {
    mode: FormMode,
    fields: FormFields,
    existing_cover: Option<String>,
    original_title: Option<String>,
    state: FormState,
}

/// Result of successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub publication: Publication,
    pub notice: String,
    pub navigate: Route,
}

impl Default for PublicationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PublicationForm {
    /// Empty form for a new publication
    pub fn new() -> Self {
        PublicationForm {
            mode: FormMode::Create,
            fields: FormFields::default(),
            existing_cover: None,
            original_title: None,
            state: FormState::Idle,
        }
    }

    /// Form pre-populated with current values of publication
    pub fn edit(publication: &Publication) -> Self {
        PublicationForm {
            mode: FormMode::Edit(publication.id),
            fields: FormFields {
                title: publication.title.clone(),
                description: publication.description.clone().unwrap_or_default(),
                release_date: publication.release_date.clone(),
                cover: None,
            },
            existing_cover: Some(publication.cover_url.clone()),
            original_title: Some(publication.title.clone()),
            state: FormState::Idle,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn existing_cover(&self) -> Option<&str> {
        self.existing_cover.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FormState::ErrorShown(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Inputs, submit and cancel are disabled while submitting
    pub fn controls_disabled(&self) -> bool {
        self.is_submitting()
    }

    fn editable(&mut self) -> Result<&mut FormFields> {
        if self.is_submitting() {
            Err(ConsoleError::Busy)
        } else {
            Ok(&mut self.fields)
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.editable()?.title = title.into();
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        self.editable()?.description = description.into();
        Ok(())
    }

    pub fn set_release_date(&mut self, release_date: impl Into<String>) -> Result<()> {
        self.editable()?.release_date = release_date.into();
        Ok(())
    }

    /// Selecting a file also dismisses displayed error
    pub fn select_cover(&mut self, cover: Option<CoverImage>) -> Result<()> {
        self.editable()?.cover = cover;
        if matches!(self.state, FormState::ErrorShown(_)) {
            self.state = FormState::Idle;
        }
        Ok(())
    }

    /// Leaves the form without saving
    pub fn cancel(&self) -> Result<Route> {
        if self.is_submitting() {
            Err(ConsoleError::Busy)
        } else {
            Ok(Route::List)
        }
    }

    /// Cover kept when no new file is selected. A generated placeholder is
    /// not kept, it is generated again from the current title.
    fn kept_cover(&self) -> Option<String> {
        match (&self.existing_cover, &self.original_title) {
            (Some(url), Some(title)) if is_placeholder_for(url, title) => None,
            (cover, _) => cover.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        let title = self.fields.title.trim();
        let release_date = self.fields.release_date.trim();
        if title.is_empty() || release_date.is_empty() {
            return Err(ConsoleError::Validation(REQUIRED_FIELDS_MESSAGE.into()));
        }
        if parse_release_date(release_date).is_err() {
            return Err(ConsoleError::Validation(INVALID_DATE_MESSAGE.into()));
        }
        Ok(())
    }

    /// Validates fields and enters submitting state.
    ///
    /// No side effects happen here - on invalid input the form just shows the error.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest> {
        if self.is_submitting() {
            return Err(ConsoleError::Busy);
        }
        if let Err(e) = self.validate() {
            debug!("Form not valid: {e}");
            self.state = FormState::ErrorShown(e.to_string());
            return Err(e);
        }

        self.state = FormState::Submitting;
        let description = self.fields.description.trim();
        Ok(SubmitRequest {
            mode: self.mode,
            title: self.fields.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            release_date: self.fields.release_date.trim().to_string(),
            cover: self.fields.cover.clone(),
            existing_cover: self.kept_cover(),
        })
    }

    /// Applies outcome of [`SubmitRequest::execute`].
    ///
    /// Success clears the form, failure keeps entered values and shows the error.
    pub fn finish_submit(&mut self, outcome: Result<Publication>) -> Result<SubmitOutcome> {
        match outcome {
            Ok(publication) => {
                let notice = match self.mode {
                    FormMode::Create => "Publication was added",
                    FormMode::Edit(_) => "Publication was updated",
                };
                self.fields = FormFields::default();
                self.existing_cover = None;
                self.original_title = None;
                self.state = FormState::Idle;
                Ok(SubmitOutcome {
                    publication,
                    notice: notice.to_string(),
                    navigate: Route::List,
                })
            }
            Err(e) => {
                error!("Saving publication failed: {e}");
                self.state = FormState::ErrorShown(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn submit<B, U>(
        &mut self,
        store: &PublicationStore<B>,
        uploader: &U,
    ) -> Result<SubmitOutcome>
    where
        B: PublicationBackend,
        U: ImageUploader,
    {
        let request = self.begin_submit()?;
        let outcome = request.execute(store, uploader).await;
        self.finish_submit(outcome)
    }
}

/// Validated submission, detached from the form while it runs
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    mode: FormMode,
    title: String,
    description: Option<String>,
    release_date: String,
    cover: Option<CoverImage>,
    existing_cover: Option<String>,
}

impl SubmitRequest {
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Uploads cover (if selected) and then saves the record.
    ///
    /// If the upload succeeds and saving fails, the uploaded image stays on the image host.
    pub async fn execute<B, U>(self, store: &PublicationStore<B>, uploader: &U) -> Result<Publication>
    where
        B: PublicationBackend,
        U: ImageUploader,
    {
        let cover_url = match self.cover {
            Some(image) => {
                let url = uploader.upload(image).await?;
                debug!("Cover uploaded to {url}");
                url
            }
            None => self
                .existing_cover
                .unwrap_or_else(|| placeholder_cover_url(&self.title)),
        };

        let data = PublicationData {
            title: self.title,
            description: self.description,
            release_date: self.release_date,
            cover_url,
        };

        match self.mode {
            FormMode::Create => store.add(data).await,
            FormMode::Edit(id) => store.update(id, data).await,
        }
    }
}
