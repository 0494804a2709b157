//! Product editing session orchestration.

use tienda_core::models::Product;
use tienda_core::{AppError, DraftCommand, DraftEditor, DraftRejection, ProductDraft};

use crate::utils::upload::UploadFile;

use super::traits::{AssetUploader, ProductStore};

/// Where the session is in its submit lifecycle. A session that has
/// navigated away never submits again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
    Navigating,
}

/// Result of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// A submit was already in flight (or the session already navigated);
    /// nothing happened.
    Ignored,
    /// The draft failed validation; no store call was made.
    Rejected(DraftRejection),
    /// A new product was created; the session is navigating to its edit page.
    Created(Product),
    /// The existing product was updated in place.
    Updated(Product),
}

/// Per-file result of an image upload batch.
#[derive(Debug)]
pub struct UploadOutcome {
    pub filename: String,
    pub result: Result<String, AppError>,
}

/// One product editing session: the draft editor plus its collaborators.
pub struct ProductEditorService<S, U> {
    store: S,
    uploader: U,
    editor: DraftEditor,
    phase: SubmitPhase,
}

impl<S: ProductStore, U: AssetUploader> ProductEditorService<S, U> {
    pub fn new(store: S, uploader: U, draft: ProductDraft) -> Self {
        Self {
            store,
            uploader,
            editor: DraftEditor::new(draft),
            phase: SubmitPhase::Idle,
        }
    }

    pub fn draft(&self) -> &ProductDraft {
        self.editor.draft()
    }

    pub fn pending_tag(&self) -> &str {
        self.editor.pending_tag()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Apply a draft edit. Edits are ignored once the session is navigating.
    pub fn apply(&mut self, command: DraftCommand) {
        if self.phase == SubmitPhase::Navigating {
            return;
        }
        self.editor.apply(command);
    }

    /// Upload a batch of image files, appending each successful URL to the
    /// draft's image list. One bad file does not sink the batch: every file
    /// gets its own outcome.
    pub async fn upload_images(&mut self, files: Vec<UploadFile>) -> Vec<UploadOutcome> {
        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            let result = self
                .uploader
                .upload(&file.filename, &file.content_type, file.data)
                .await;
            match &result {
                Ok(url) => self.apply(DraftCommand::AddImage(url.clone())),
                Err(e) => {
                    tracing::warn!(filename = %file.filename, error = %e, "Image upload failed");
                }
            }
            outcomes.push(UploadOutcome {
                filename: file.filename,
                result,
            });
        }
        outcomes
    }

    /// Submit the draft: validate, then create or update depending on
    /// whether the draft carries an id. Validation failures and store errors
    /// leave the draft untouched and the session idle, so the user can fix
    /// and resubmit.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, AppError> {
        if self.phase != SubmitPhase::Idle {
            return Ok(SubmitOutcome::Ignored);
        }

        if let Err(rejection) = self.editor.draft().validate_for_submit() {
            return Ok(SubmitOutcome::Rejected(rejection));
        }

        self.phase = SubmitPhase::Submitting;
        let draft = self.editor.draft().clone();

        let result = match draft.id {
            None => self
                .store
                .create(&draft)
                .await
                .map(|product| (SubmitOutcome::Created(product), SubmitPhase::Navigating)),
            Some(id) => self
                .store
                .update(id, &draft)
                .await
                .map(|product| (SubmitOutcome::Updated(product), SubmitPhase::Idle)),
        };

        match result {
            Ok((outcome, next_phase)) => {
                self.phase = next_phase;
                Ok(outcome)
            }
            Err(e) => {
                self.phase = SubmitPhase::Idle;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use tienda_core::models::{Audience, Product, ProductCategory, ProductSummary, Size};
    use uuid::Uuid;

    use super::*;

    fn product_from(draft: &ProductDraft) -> Product {
        Product {
            id: draft.id.unwrap_or_else(Uuid::new_v4),
            title: draft.title.clone(),
            slug: draft.slug.clone(),
            description: draft.description.clone(),
            in_stock: draft.in_stock,
            price: draft.price,
            category: draft.category,
            audience: draft.audience,
            sizes: draft.sizes.clone(),
            tags: draft.tags.clone(),
            images: draft.images.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[derive(Default)]
    struct MockStore {
        create_calls: AtomicUsize,
        update_calls: AtomicUsize,
        fail_next: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl ProductStore for Arc<MockStore> {
        async fn get_by_slug(&self, _slug: &str) -> Result<Option<Product>, AppError> {
            Ok(None)
        }

        async fn list(&self) -> Result<Vec<ProductSummary>, AppError> {
            Ok(Vec::new())
        }

        async fn create(&self, draft: &ProductDraft) -> Result<Product, AppError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(AppError::Conflict("Slug already in use".to_string()));
            }
            Ok(product_from(draft))
        }

        async fn update(&self, id: Uuid, draft: &ProductDraft) -> Result<Product, AppError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(AppError::Internal("database unavailable".to_string()));
            }
            let mut product = product_from(draft);
            product.id = id;
            Ok(product)
        }
    }

    #[derive(Default)]
    struct MockUploader {
        upload_calls: AtomicUsize,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl AssetUploader for Arc<MockUploader> {
        async fn upload(
            &self,
            filename: &str,
            _content_type: &str,
            _data: Vec<u8>,
        ) -> Result<String, AppError> {
            self.upload_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on.as_deref() == Some(filename) {
                return Err(AppError::Storage("disk full".to_string()));
            }
            Ok(format!("http://assets.local/products/{}", filename))
        }
    }

    fn valid_draft() -> ProductDraft {
        let mut editor = DraftEditor::new(ProductDraft::blank());
        editor.apply(DraftCommand::SetTitle("Cotton Hoodie".to_string()));
        editor.apply(DraftCommand::SetDescription("Warm and heavy.".to_string()));
        editor.apply(DraftCommand::SetStock(5));
        editor.apply(DraftCommand::SetPrice(Decimal::new(3999, 2)));
        editor.apply(DraftCommand::ToggleSize(Size::M));
        editor.draft().clone()
    }

    fn service(
        store: Arc<MockStore>,
        uploader: Arc<MockUploader>,
        draft: ProductDraft,
    ) -> ProductEditorService<Arc<MockStore>, Arc<MockUploader>> {
        ProductEditorService::new(store, uploader, draft)
    }

    #[tokio::test]
    async fn submit_with_too_few_images_makes_no_store_call() {
        let store = Arc::new(MockStore::default());
        let uploader = Arc::new(MockUploader::default());
        let mut draft = valid_draft();
        draft.images = vec!["only-one.jpg".to_string()];
        let mut svc = service(store.clone(), uploader, draft);

        let outcome = svc.submit().await.unwrap();
        match outcome {
            SubmitOutcome::Rejected(rejection) => {
                assert_eq!(
                    rejection.messages(),
                    vec!["at least 2 images required".to_string()]
                );
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.update_calls.load(Ordering::SeqCst), 0);
        assert_eq!(svc.phase(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn submit_without_id_creates_and_navigates() {
        let store = Arc::new(MockStore::default());
        let uploader = Arc::new(MockUploader::default());
        let mut svc = service(store.clone(), uploader, valid_draft());

        let outcome = svc.submit().await.unwrap();
        match outcome {
            SubmitOutcome::Created(product) => assert_eq!(product.slug, "cotton-hoodie"),
            other => panic!("expected Created, got {:?}", other),
        }
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.update_calls.load(Ordering::SeqCst), 0);
        assert_eq!(svc.phase(), SubmitPhase::Navigating);
    }

    #[tokio::test]
    async fn submit_with_id_updates_and_stays_idle() {
        let store = Arc::new(MockStore::default());
        let uploader = Arc::new(MockUploader::default());
        let mut draft = valid_draft();
        let id = Uuid::new_v4();
        draft.id = Some(id);
        let mut svc = service(store.clone(), uploader, draft);

        let outcome = svc.submit().await.unwrap();
        match outcome {
            SubmitOutcome::Updated(product) => assert_eq!(product.id, id),
            other => panic!("expected Updated, got {:?}", other),
        }
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.update_calls.load(Ordering::SeqCst), 1);
        assert_eq!(svc.phase(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn failed_submit_leaves_draft_untouched_and_session_idle() {
        let store = Arc::new(MockStore::default());
        store.fail_next.store(true, Ordering::SeqCst);
        let uploader = Arc::new(MockUploader::default());
        let mut svc = service(store.clone(), uploader, valid_draft());

        let before = svc.draft().clone();
        let err = svc.submit().await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(svc.draft(), &before);
        assert_eq!(svc.phase(), SubmitPhase::Idle);

        // The session can retry after the failure.
        let outcome = svc.submit().await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Created { .. }));
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn submit_after_navigation_is_ignored() {
        let store = Arc::new(MockStore::default());
        let uploader = Arc::new(MockUploader::default());
        let mut svc = service(store.clone(), uploader, valid_draft());

        svc.submit().await.unwrap();
        assert_eq!(svc.phase(), SubmitPhase::Navigating);

        let outcome = svc.submit().await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Ignored));
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn upload_failures_do_not_sink_the_batch() {
        let store = Arc::new(MockStore::default());
        let uploader = Arc::new(MockUploader {
            upload_calls: AtomicUsize::new(0),
            fail_on: Some("bad.png".to_string()),
        });
        let mut svc = service(store, uploader.clone(), valid_draft());
        let images_before = svc.draft().images.len();

        let outcomes = svc
            .upload_images(vec![
                UploadFile {
                    filename: "good.png".to_string(),
                    content_type: "image/png".to_string(),
                    data: vec![1, 2, 3],
                },
                UploadFile {
                    filename: "bad.png".to_string(),
                    content_type: "image/png".to_string(),
                    data: vec![4, 5, 6],
                },
                UploadFile {
                    filename: "also-good.png".to_string(),
                    content_type: "image/png".to_string(),
                    data: vec![7, 8, 9],
                },
            ])
            .await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert!(outcomes[2].result.is_ok());
        assert_eq!(uploader.upload_calls.load(Ordering::SeqCst), 3);
        // Only the two successes were appended, in order.
        assert_eq!(svc.draft().images.len(), images_before + 2);
        assert_eq!(
            svc.draft().images.last().unwrap(),
            "http://assets.local/products/also-good.png"
        );
    }

    #[tokio::test]
    async fn edits_after_navigation_are_ignored() {
        let store = Arc::new(MockStore::default());
        let uploader = Arc::new(MockUploader::default());
        let mut svc = service(store, uploader, valid_draft());

        svc.submit().await.unwrap();
        let before = svc.draft().clone();
        svc.apply(DraftCommand::SetTitle("Changed".to_string()));
        assert_eq!(svc.draft(), &before);
    }
}
