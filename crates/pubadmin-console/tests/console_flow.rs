use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use pubadmin_console::{
    Console, ConsoleError, PublicationStore, Route,
    backend::{BackendError, MemoryBackend, PublicationBackend},
    form::PublicationForm,
    list::{ListView, PublicationList},
    upload::{CoverImage, ImageUploader, UploadError},
};
use pubadmin_types::{Publication, PublicationData, cover::placeholder_cover_url};
use tracing_test::traced_test;

#[derive(Default)]
struct Calls {
    list: AtomicUsize,
    create: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
}

/// Memory backend which counts calls and can be switched to fail writes
struct CountingBackend {
    inner: MemoryBackend,
    calls: Arc<Calls>,
    fail_writes: bool,
}

impl CountingBackend {
    fn new(records: Vec<Publication>) -> (Self, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        (
            CountingBackend {
                inner: MemoryBackend::with_records(records),
                calls: calls.clone(),
                fail_writes: false,
            },
            calls,
        )
    }

    fn failing(records: Vec<Publication>) -> (Self, Arc<Calls>) {
        let (mut backend, calls) = Self::new(records);
        backend.fail_writes = true;
        (backend, calls)
    }

    fn check(&self) -> Result<(), BackendError> {
        if self.fail_writes {
            Err(BackendError::Unavailable("storage is down".into()))
        } else {
            Ok(())
        }
    }
}

impl PublicationBackend for CountingBackend {
    async fn list(&self) -> Result<Vec<Publication>, BackendError> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        self.inner.list().await
    }

    async fn create(&self, data: &PublicationData) -> Result<Publication, BackendError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.create(data).await
    }

    async fn update(&self, id: i64, data: &PublicationData) -> Result<Publication, BackendError> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.update(id, data).await
    }

    async fn delete(&self, id: i64) -> Result<(), BackendError> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.delete(id).await
    }
}

struct FakeUploader {
    result: Result<String, u16>,
    calls: AtomicUsize,
}

impl FakeUploader {
    fn ok(url: &str) -> Self {
        FakeUploader {
            result: Ok(url.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(status: u16) -> Self {
        FakeUploader {
            result: Err(status),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageUploader for FakeUploader {
    async fn upload(&self, _image: CoverImage) -> Result<String, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Ok(url) => Ok(url.clone()),
            Err(status) => Err(UploadError::Rejected {
                status: *status,
                message: "quota exceeded".into(),
            }),
        }
    }
}

fn publication(id: i64, title: &str) -> Publication {
    Publication {
        id,
        title: title.to_string(),
        description: Some(format!("Description of {title}")),
        release_date: "2024-06-01".to_string(),
        cover_url: format!("https://img.example.org/{id}.jpg"),
    }
}

fn cover() -> CoverImage {
    CoverImage::new("cover.png", vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a]).unwrap()
}

async fn loaded_store(
    backend: CountingBackend,
) -> PublicationStore<CountingBackend> {
    let store = PublicationStore::new(backend);
    store.load().await.unwrap();
    store
}

#[tokio::test]
#[traced_test]
async fn test_invalid_form_has_no_side_effects() {
    let (backend, calls) = CountingBackend::new(vec![]);
    let store = loaded_store(backend).await;
    let uploader = FakeUploader::ok("https://img.example.org/new.png");

    let mut form = PublicationForm::new();
    form.set_title("   ").unwrap();
    form.set_release_date("2025-01-01").unwrap();
    form.select_cover(Some(cover())).unwrap();

    let res = form.submit(&store, &uploader).await;
    assert!(matches!(res, Err(ConsoleError::Validation(_))));
    assert_eq!(uploader.calls(), 0);
    assert_eq!(calls.create.load(Ordering::SeqCst), 0);
    assert!(store.list().await.is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_missing_release_date_has_no_side_effects() {
    let (backend, calls) = CountingBackend::new(vec![]);
    let store = loaded_store(backend).await;
    let uploader = FakeUploader::ok("https://img.example.org/new.png");

    let mut form = PublicationForm::new();
    form.set_title("Report 2025").unwrap();
    form.set_release_date("").unwrap();
    form.select_cover(Some(cover())).unwrap();

    let res = form.submit(&store, &uploader).await;
    assert!(matches!(res, Err(ConsoleError::Validation(_))));
    assert_eq!(uploader.calls(), 0);
    assert_eq!(calls.create.load(Ordering::SeqCst), 0);
    assert_eq!(calls.update.load(Ordering::SeqCst), 0);
    assert!(store.list().await.is_empty());
    assert_eq!(form.fields().title, "Report 2025");
}

#[tokio::test]
#[traced_test]
async fn test_add_without_cover_uses_placeholder() {
    let (backend, calls) = CountingBackend::new(vec![]);
    let store = loaded_store(backend).await;
    let uploader = FakeUploader::ok("https://img.example.org/unused.png");

    let mut form = PublicationForm::new();
    form.set_title("Report 2025").unwrap();
    form.set_release_date("2025-01-01").unwrap();

    let outcome = form.submit(&store, &uploader).await.unwrap();
    assert_eq!(outcome.navigate, Route::List);
    assert_eq!(
        outcome.publication.cover_url,
        "https://placehold.co/200x280/7f8c8d/ffffff?text=Report%202025"
    );
    assert_eq!(outcome.publication.description, None);
    assert_eq!(uploader.calls(), 0);
    assert_eq!(calls.create.load(Ordering::SeqCst), 1);

    let records = store.list().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Report 2025");
    // form is reset
    assert_eq!(form.fields().title, "");
}

#[tokio::test]
#[traced_test]
async fn test_add_with_cover_uses_uploaded_url() {
    let (backend, _calls) = CountingBackend::new(vec![publication(1, "Old")]);
    let store = loaded_store(backend).await;
    let uploader = FakeUploader::ok("https://img.example.org/x.png");

    let mut form = PublicationForm::new();
    form.set_title("Census").unwrap();
    form.set_description("Population census results").unwrap();
    form.set_release_date("2025-03-15").unwrap();
    form.select_cover(Some(cover())).unwrap();

    let outcome = form.submit(&store, &uploader).await.unwrap();
    assert_eq!(uploader.calls(), 1);
    assert_eq!(outcome.publication.id, 2);
    assert_eq!(outcome.publication.cover_url, "https://img.example.org/x.png");

    let records = store.list().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[1], outcome.publication);
}

#[tokio::test]
#[traced_test]
async fn test_upload_failure_keeps_form() {
    let (backend, calls) = CountingBackend::new(vec![]);
    let store = loaded_store(backend).await;
    let uploader = FakeUploader::failing(413);

    let mut form = PublicationForm::new();
    form.set_title("Census").unwrap();
    form.set_release_date("2025-03-15").unwrap();
    form.select_cover(Some(cover())).unwrap();

    let res = form.submit(&store, &uploader).await;
    assert!(matches!(res, Err(ConsoleError::Upload(_))));
    assert_eq!(calls.create.load(Ordering::SeqCst), 0);
    assert!(store.list().await.is_empty());

    assert!(form.error().unwrap().contains("quota exceeded"));
    assert_eq!(form.fields().title, "Census");
    assert!(form.fields().cover.is_some());
    assert!(!form.controls_disabled());
}

#[tokio::test]
#[traced_test]
async fn test_persistence_failure_keeps_collection() {
    let existing = vec![publication(1, "First"), publication(2, "Second")];
    let (backend, calls) = CountingBackend::failing(existing.clone());
    let store = loaded_store(backend).await;
    let uploader = FakeUploader::ok("https://img.example.org/x.png");

    let mut form = PublicationForm::new();
    form.set_title("Third").unwrap();
    form.set_release_date("2025-01-01").unwrap();
    let res = form.submit(&store, &uploader).await;
    assert!(matches!(res, Err(ConsoleError::Persistence(_))));
    assert_eq!(calls.create.load(Ordering::SeqCst), 1);
    assert_eq!(store.list().await, existing);

    let mut form = PublicationForm::edit(&existing[0]);
    form.set_title("First, revised").unwrap();
    assert!(form.submit(&store, &uploader).await.is_err());
    assert_eq!(store.list().await, existing);

    let res = store.delete(2).await;
    assert!(matches!(res, Err(ConsoleError::Persistence(_))));
    assert_eq!(store.list().await, existing);
}

#[tokio::test]
#[traced_test]
async fn test_unknown_id_is_not_found() {
    let existing = vec![publication(1, "First")];
    let (backend, calls) = CountingBackend::new(existing.clone());
    let store = loaded_store(backend).await;

    let data = existing[0].data();
    assert!(matches!(
        store.update(42, data).await,
        Err(ConsoleError::NotFound(42))
    ));
    assert!(matches!(
        store.delete(42).await,
        Err(ConsoleError::NotFound(42))
    ));
    assert_eq!(calls.update.load(Ordering::SeqCst), 0);
    assert_eq!(calls.delete.load(Ordering::SeqCst), 0);
    assert_eq!(store.list().await, existing);
}

#[tokio::test]
#[traced_test]
async fn test_list_is_idempotent() {
    let existing = vec![publication(4, "Four"), publication(2, "Two")];
    let (backend, calls) = CountingBackend::new(existing.clone());
    let store = loaded_store(backend).await;

    assert_eq!(store.list().await, store.list().await);
    assert_eq!(store.list().await, existing);
    // reads never go to backend
    assert_eq!(calls.list.load(Ordering::SeqCst), 1);
}

#[tokio::test]
#[traced_test]
async fn test_edit_keeps_existing_cover() {
    let existing = vec![publication(5, "Five")];
    let (backend, calls) = CountingBackend::new(existing.clone());
    let store = loaded_store(backend).await;
    let uploader = FakeUploader::ok("https://img.example.org/new.png");

    let mut form = PublicationForm::edit(&existing[0]);
    form.set_release_date("2025-02-02").unwrap();
    let outcome = form.submit(&store, &uploader).await.unwrap();
    assert_eq!(outcome.notice, "Publication was updated");
    assert_eq!(outcome.publication.id, 5);
    assert_eq!(outcome.publication.cover_url, "https://img.example.org/5.jpg");
    assert_eq!(outcome.publication.release_date, "2025-02-02");
    assert_eq!(uploader.calls(), 0);
    assert_eq!(calls.update.load(Ordering::SeqCst), 1);
    assert_eq!(store.get(5).await.unwrap(), outcome.publication);
}

#[tokio::test]
#[traced_test]
async fn test_retitle_regenerates_placeholder_cover() {
    let generated = Publication {
        cover_url: placeholder_cover_url("Old"),
        ..publication(6, "Old")
    };
    let uploaded = publication(7, "Uploaded");
    let (backend, _calls) = CountingBackend::new(vec![generated.clone(), uploaded.clone()]);
    let store = loaded_store(backend).await;
    let uploader = FakeUploader::ok("https://img.example.org/unused.png");

    let mut form = PublicationForm::edit(&generated);
    form.set_title("New Title").unwrap();
    let outcome = form.submit(&store, &uploader).await.unwrap();
    assert_eq!(
        outcome.publication.cover_url,
        "https://placehold.co/200x280/7f8c8d/ffffff?text=New%20Title"
    );

    // uploaded cover does not depend on the title
    let mut form = PublicationForm::edit(&uploaded);
    form.set_title("Uploaded, renamed").unwrap();
    let outcome = form.submit(&store, &uploader).await.unwrap();
    assert_eq!(outcome.publication.cover_url, "https://img.example.org/7.jpg");
    assert_eq!(uploader.calls(), 0);
}

#[tokio::test]
#[traced_test]
async fn test_delete_confirm_and_cancel() {
    let existing = vec![
        publication(1, "One"),
        publication(3, "Annual Report"),
        publication(4, "Four"),
    ];
    let (backend, calls) = CountingBackend::new(existing.clone());
    let store = loaded_store(backend).await;
    let mut list = PublicationList::new();

    list.request_delete(&existing[1]).unwrap();
    assert!(list.confirmation().unwrap().message().contains("Annual Report"));
    list.cancel_delete().unwrap();
    assert!(list.confirmation().is_none());
    assert_eq!(list.delete_confirmed(&store).await.unwrap(), None);
    assert_eq!(calls.delete.load(Ordering::SeqCst), 0);
    assert_eq!(store.list().await.len(), 3);

    list.request_delete(&existing[1]).unwrap();
    assert_eq!(list.delete_confirmed(&store).await.unwrap(), Some(3));
    assert_eq!(calls.delete.load(Ordering::SeqCst), 1);
    assert!(list.confirmation().is_none());

    let ListView::Table(rows) = list.view(&store.list().await) else {
        panic!("expected table");
    };
    let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 4]);
    assert_eq!(rows[1].position, 2);
}

#[tokio::test]
#[traced_test]
async fn test_failed_delete_shows_error() {
    let existing = vec![publication(1, "One")];
    let (backend, calls) = CountingBackend::failing(existing.clone());
    let store = loaded_store(backend).await;
    let mut list = PublicationList::new();

    list.request_delete(&existing[0]).unwrap();
    assert!(list.delete_confirmed(&store).await.is_err());
    assert_eq!(calls.delete.load(Ordering::SeqCst), 1);
    assert!(list.confirmation().is_none());
    assert_eq!(list.deleting(), None);
    assert!(list.error().is_some());
    assert_eq!(store.list().await, existing);

    list.dismiss_error();
    assert!(list.error().is_none());
}

#[tokio::test]
#[traced_test]
async fn test_console_session() {
    let (backend, _calls) = CountingBackend::new(vec![publication(1, "One")]);
    let store = loaded_store(backend).await;
    let mut console = Console::new(store.clone(), FakeUploader::ok("https://img.example.org/c.png"));

    console.navigate(Route::Add).await.unwrap();
    let form = console.form_mut().unwrap();
    form.set_title("Two").unwrap();
    form.set_release_date("2025-05-05").unwrap();
    form.select_cover(Some(cover())).unwrap();
    let outcome = console.submit_form().await.unwrap();
    assert_eq!(outcome.publication.id, 2);
    assert_eq!(console.route(), Route::List);
    assert_eq!(console.take_notice().as_deref(), Some("Publication was added"));
    assert!(console.take_notice().is_none());

    // other clones of the store see the change
    assert_eq!(store.get(2).await.unwrap().title, "Two");

    console.edit_row(2).await.unwrap();
    assert_eq!(console.route(), Route::Edit(2));
    console.form_mut().unwrap().set_title("Two, revised").unwrap();
    console.submit_form().await.unwrap();
    assert_eq!(store.get(2).await.unwrap().title, "Two, revised");

    console.delete_row(1).await.unwrap();
    assert_eq!(console.delete_confirmed().await.unwrap(), Some(1));
    let ListView::Table(rows) = console.list_view().await else {
        panic!("expected table");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Two, revised");
}
