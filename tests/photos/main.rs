//! Asynchronous photo attachment on the product form.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use stockroom::{
    InMemoryRecordStore, PhotoError, PhotoSource, ProductForm, ProductRepository,
    StoreProductRepository,
};

type Repo = StoreProductRepository<InMemoryRecordStore>;

struct Picked {
    bytes: Vec<u8>,
    delay: Duration,
    fail: bool,
    finished: Arc<AtomicBool>,
}

impl Picked {
    fn new(bytes: &[u8], delay_ms: u64) -> Self {
        Self {
            bytes: bytes.to_vec(),
            delay: Duration::from_millis(delay_ms),
            fail: false,
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    fn failing(delay_ms: u64) -> Self {
        Self {
            fail: true,
            ..Self::new(&[], delay_ms)
        }
    }
}

#[async_trait]
impl PhotoSource for Picked {
    async fn load_blob(&self) -> Result<Vec<u8>, PhotoError> {
        tokio::time::sleep(self.delay).await;
        self.finished.store(true, Ordering::SeqCst);
        if self.fail {
            return Err(PhotoError::Unavailable("not downloadable".into()));
        }
        Ok(self.bytes.clone())
    }
}

fn form() -> (Repo, ProductForm<Repo>) {
    let repo = StoreProductRepository::new(InMemoryRecordStore::new());
    let form = ProductForm::new(repo.clone());
    (repo, form)
}

#[tokio::test]
async fn failed_loads_are_dropped_silently() {
    let (_, mut form) = form();
    form.load_photos(vec![
        Picked::new(b"one", 1),
        Picked::failing(1),
        Picked::new(b"three", 1),
    ]);
    assert_eq!(form.pending_photo_loads(), 3);

    let appended = form.collect_photos().await;

    assert_eq!(appended, 2);
    assert_eq!(form.pending_photo_loads(), 0);
    let loaded: Vec<&[u8]> = form.photos().iter().map(|p| p.as_bytes()).collect();
    assert_eq!(loaded, vec![b"one".as_slice(), b"three".as_slice()]);
}

#[tokio::test]
async fn loads_append_after_existing_photos() {
    let (_, mut form) = form();
    form.attach_photo(vec![0u8]);
    form.load_photos(vec![b"late".to_vec()]);

    form.collect_photos().await;

    assert_eq!(form.photos().len(), 2);
    assert_eq!(form.photos()[0].as_bytes(), &[0u8]);
    assert_eq!(form.photos()[1].as_bytes(), b"late");
}

#[tokio::test]
async fn photos_append_in_pick_order() {
    let (_, mut form) = form();
    form.load_photos(vec![Picked::new(b"slow", 80), Picked::new(b"fast", 1)]);
    form.load_photos(vec![Picked::failing(1), Picked::new(b"last", 20)]);

    assert_eq!(form.collect_photos().await, 3);

    let loaded: Vec<&[u8]> = form.photos().iter().map(|p| p.as_bytes()).collect();
    assert_eq!(
        loaded,
        vec![b"slow".as_slice(), b"fast".as_slice(), b"last".as_slice()]
    );
}

#[tokio::test]
async fn cancel_aborts_in_flight_loads() {
    let (repo, mut form) = form();
    let picked = Picked::new(b"photo", 50);
    let finished = Arc::clone(&picked.finished);
    form.load_photos(vec![picked]);

    form.cancel();
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(!finished.load(Ordering::SeqCst));
    assert!(repo.list_all().unwrap().is_empty());
}

#[tokio::test]
async fn save_commits_only_collected_photos() {
    let (repo, mut form) = form();
    form.set_name("Widget");
    form.attach_photo(vec![1u8]);

    let picked = Picked::new(b"pending", 50);
    let finished = Arc::clone(&picked.finished);
    form.load_photos(vec![picked]);

    let saved = form.save().unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(!finished.load(Ordering::SeqCst));
    assert_eq!(saved.photos().len(), 1);
    assert_eq!(repo.get(saved.id()).unwrap().unwrap().photos().len(), 1);
}

#[tokio::test]
async fn files_can_be_picked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cat.jpg");
    std::fs::write(&path, b"\xff\xd8jpeg").unwrap();

    let (_, mut form) = form();
    form.load_photos(vec![path, dir.path().join("missing.jpg")]);

    assert_eq!(form.collect_photos().await, 1);
    assert_eq!(form.photos()[0].as_bytes(), b"\xff\xd8jpeg");
}
