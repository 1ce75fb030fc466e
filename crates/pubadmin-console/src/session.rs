use tracing::{debug, info};

use crate::{
    backend::PublicationBackend,
    error::{ConsoleError, Result},
    form::{PublicationForm, SubmitOutcome},
    list::{ListView, PublicationList},
    route::Route,
    store::PublicationStore,
    upload::ImageUploader,
};

/// One user session of the console: shared store, current page and its state
pub struct Console<B, U> {
    store: PublicationStore<B>,
    uploader: U,
    route: Route,
    list: PublicationList,
    form: Option<PublicationForm>,
    notice: Option<String>,
}

impl<B, U> Console<B, U>
where
    B: PublicationBackend,
    U: ImageUploader,
{
    pub fn new(store: PublicationStore<B>, uploader: U) -> Self {
        Console {
            store,
            uploader,
            route: Route::List,
            list: PublicationList::new(),
            form: None,
            notice: None,
        }
    }

    pub fn store(&self) -> &PublicationStore<B> {
        &self.store
    }

    pub fn uploader(&self) -> &U {
        &self.uploader
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn list(&self) -> &PublicationList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut PublicationList {
        &mut self.list
    }

    pub fn form(&self) -> Option<&PublicationForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut PublicationForm> {
        self.form.as_mut()
    }

    /// Success message of last submission, taken once
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Switches page. Edit page is pre-populated from the store.
    pub async fn navigate(&mut self, route: Route) -> Result<()> {
        if self.form.as_ref().is_some_and(|f| f.is_submitting()) {
            return Err(ConsoleError::Busy);
        }
        self.form = match route {
            Route::List => None,
            Route::Add => Some(PublicationForm::new()),
            Route::Edit(id) => {
                let record = self.store.get(id).await.ok_or(ConsoleError::NotFound(id))?;
                Some(PublicationForm::edit(&record))
            }
        };
        debug!("Navigated to {route}");
        self.route = route;
        Ok(())
    }

    pub async fn list_view(&self) -> ListView {
        self.list.view(&self.store.list().await)
    }

    /// Submits the open form and returns to the list on success
    pub async fn submit_form(&mut self) -> Result<SubmitOutcome> {
        let form = self
            .form
            .as_mut()
            .ok_or_else(|| ConsoleError::Validation("No form is open".into()))?;
        let outcome = form.submit(&self.store, &self.uploader).await?;
        info!("{}: {}", outcome.notice, outcome.publication.title);
        self.notice = Some(outcome.notice.clone());
        self.form = None;
        self.route = outcome.navigate;
        Ok(outcome)
    }

    pub fn cancel_form(&mut self) -> Result<()> {
        if let Some(form) = &self.form {
            self.route = form.cancel()?;
            self.form = None;
        }
        Ok(())
    }

    /// Opens edit page for a row of the list
    pub async fn edit_row(&mut self, id: i64) -> Result<()> {
        let record = self.store.get(id).await.ok_or(ConsoleError::NotFound(id))?;
        let route = self.list.edit(&record)?;
        self.navigate(route).await
    }

    /// Opens delete confirmation for a row of the list
    pub async fn delete_row(&mut self, id: i64) -> Result<()> {
        let record = self.store.get(id).await.ok_or(ConsoleError::NotFound(id))?;
        self.list.request_delete(&record)
    }

    pub async fn delete_confirmed(&mut self) -> Result<Option<i64>> {
        self.list.delete_confirmed(&self.store).await
    }
}
