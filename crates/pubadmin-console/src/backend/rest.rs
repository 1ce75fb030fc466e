use pubadmin_types::{Publication, PublicationData};
use reqwest::{Response, StatusCode};
use tracing::debug;
use url::Url;

use super::{BackendError, PublicationBackend};

const PUBLICATION_API: &str = "api/publication";

/// Backend speaking JSON over HTTP to pubadmin-server (or compatible API)
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    api_url: Url,
}

pub(crate) fn extend_url(url: &Url, segment: impl ToString) -> Url {
    let mut url = url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(&segment.to_string());
    }
    url
}

pub(crate) fn join_base(base_url: &Url, path: &str) -> Url {
    path.split('/')
        .fold(base_url.clone(), |url, segment| extend_url(&url, segment))
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(text) if !text.is_empty() => text,
        _ => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

async fn check_status(response: Response, id: Option<i64>) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(BackendError::NotFound(id));
    }
    let message = error_message(response).await;
    debug!("Backend error {status}: {message}");
    Err(BackendError::Status {
        status: status.as_u16(),
        message,
    })
}

impl RestBackend {
    pub fn new(base_url: &Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &Url) -> Self {
        RestBackend {
            client,
            api_url: join_base(base_url, PUBLICATION_API),
        }
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn record_url(&self, id: i64) -> Url {
        extend_url(&self.api_url, id)
    }
}

impl PublicationBackend for RestBackend {
    async fn list(&self) -> Result<Vec<Publication>, BackendError> {
        let response = self.client.get(self.api_url.clone()).send().await?;
        let records = check_status(response, None).await?.json().await?;
        Ok(records)
    }

    async fn create(&self, data: &PublicationData) -> Result<Publication, BackendError> {
        let response = self
            .client
            .post(self.api_url.clone())
            .json(data)
            .send()
            .await?;
        let record: Publication = check_status(response, None).await?.json().await?;
        debug!("Backend created publication {}", record.id);
        Ok(record)
    }

    async fn update(&self, id: i64, data: &PublicationData) -> Result<Publication, BackendError> {
        let response = self
            .client
            .put(self.record_url(id))
            .json(data)
            .send()
            .await?;
        let record = check_status(response, Some(id)).await?.json().await?;
        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<(), BackendError> {
        let response = self.client.delete(self.record_url(id)).send().await?;
        check_status(response, Some(id)).await?;
        Ok(())
    }
}
