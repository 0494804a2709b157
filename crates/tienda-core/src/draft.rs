//! Editable product draft and its controller.
//!
//! A `ProductDraft` is the in-memory, single-session editable copy of a
//! product. All mutation goes through `DraftEditor::apply`, the single
//! mutation entry point: each command builds the next draft value and
//! replaces the current one wholesale, so there is exactly one place where
//! the draft changes and no sub-collection is mutated behind the editor's
//! back.
//!
//! The slug is derived from the title (see [`crate::slug`]) until the user
//! overrides it with `SetSlug`; from then on title edits leave it alone.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Audience, Product, ProductCategory, Size};
use crate::slug::{is_valid_slug, slugify};

/// Minimum number of image references a submittable draft must carry.
pub const MIN_PRODUCT_IMAGES: usize = 2;

/// Placeholder image references seeded into a blank draft.
pub const PLACEHOLDER_IMAGES: [&str; 2] = ["img1.jpg", "img2.jpg"];

/// Message surfaced when the image invariant fails.
pub const MIN_IMAGES_MESSAGE: &str = "at least 2 images required";

/// The editable draft of a product. `id` absent means new-record mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub in_stock: i32,
    pub price: Decimal,
    pub category: ProductCategory,
    pub audience: Audience,
    pub sizes: Vec<Size>,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

impl ProductDraft {
    /// Blank template for new-record mode, pre-seeded with the two
    /// placeholder image references the edit page expects.
    pub fn blank() -> Self {
        ProductDraft {
            id: None,
            title: String::new(),
            slug: String::new(),
            description: String::new(),
            in_stock: 0,
            price: Decimal::ZERO,
            category: ProductCategory::Shirts,
            audience: Audience::Men,
            sizes: Vec::new(),
            tags: Vec::new(),
            images: PLACEHOLDER_IMAGES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Draft snapshot of a persisted product (update mode).
    pub fn from_product(product: &Product) -> Self {
        ProductDraft {
            id: Some(product.id),
            title: product.title.clone(),
            slug: product.slug.clone(),
            description: product.description.clone(),
            in_stock: product.in_stock,
            price: product.price,
            category: product.category,
            audience: product.audience,
            sizes: product.sizes.clone(),
            tags: product.tags.clone(),
            images: product.images.clone(),
        }
    }

    /// Field-level validation failures, one entry per failing field.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.title.is_empty() {
            errors.push(FieldError::new("title", "This field is required"));
        } else if self.title.chars().count() < 2 {
            errors.push(FieldError::new("title", "Minimum 2 characters"));
        }
        if self.description.is_empty() {
            errors.push(FieldError::new("description", "This field is required"));
        }
        if self.in_stock < 0 {
            errors.push(FieldError::new("in_stock", "Minimum is 0"));
        }
        if self.price < Decimal::ZERO {
            errors.push(FieldError::new("price", "Minimum is 0"));
        }
        if self.slug.trim().is_empty() {
            errors.push(FieldError::new("slug", "This field is required"));
        } else if !is_valid_slug(&self.slug) {
            errors.push(FieldError::new("slug", "Whitespace is not allowed"));
        }
        errors
    }

    /// Full submission check, in the order the form enforces it: the image
    /// invariant short-circuits before any field-level validation runs.
    pub fn validate_for_submit(&self) -> Result<(), DraftRejection> {
        if self.images.len() < MIN_PRODUCT_IMAGES {
            return Err(DraftRejection::NotEnoughImages);
        }
        let errors = self.field_errors();
        if !errors.is_empty() {
            return Err(DraftRejection::InvalidFields(errors));
        }
        Ok(())
    }
}

/// A single failing field and its user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Why a draft was rejected before any store call was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftRejection {
    /// Fewer than [`MIN_PRODUCT_IMAGES`] image references.
    NotEnoughImages,
    /// One or more fields failed validation.
    InvalidFields(Vec<FieldError>),
}

impl DraftRejection {
    /// User-visible messages for this rejection.
    pub fn messages(&self) -> Vec<String> {
        match self {
            DraftRejection::NotEnoughImages => vec![MIN_IMAGES_MESSAGE.to_string()],
            DraftRejection::InvalidFields(errors) => errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect(),
        }
    }
}

/// A rejection surfaces as a validation error carrying the per-field
/// failures, so API clients can attach each message to its field.
impl From<DraftRejection> for crate::error::AppError {
    fn from(rejection: DraftRejection) -> Self {
        match rejection {
            DraftRejection::NotEnoughImages => crate::error::AppError::Validation(vec![
                FieldError::new("images", MIN_IMAGES_MESSAGE),
            ]),
            DraftRejection::InvalidFields(errors) => crate::error::AppError::Validation(errors),
        }
    }
}

/// A mutation of the draft. Every edit the form can make is one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftCommand {
    SetTitle(String),
    SetSlug(String),
    SetDescription(String),
    SetStock(i32),
    SetPrice(Decimal),
    ToggleSize(Size),
    SelectCategory(ProductCategory),
    SelectAudience(Audience),
    StageTag(String),
    CommitTag,
    RemoveTag(String),
    AddImage(String),
    RemoveImage(String),
}

/// Controller for one editing session: the draft, the staged tag text, and
/// the slug-override marker.
#[derive(Debug, Clone)]
pub struct DraftEditor {
    draft: ProductDraft,
    pending_tag: String,
    slug_overridden: bool,
}

impl DraftEditor {
    pub fn new(draft: ProductDraft) -> Self {
        DraftEditor {
            draft,
            pending_tag: String::new(),
            slug_overridden: false,
        }
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn pending_tag(&self) -> &str {
        &self.pending_tag
    }

    /// Apply one command. Builds the next draft value and swaps it in; the
    /// draft is never mutated piecemeal outside this function.
    pub fn apply(&mut self, command: DraftCommand) {
        let mut next = self.draft.clone();
        match command {
            DraftCommand::SetTitle(title) => {
                if !self.slug_overridden {
                    next.slug = slugify(&title);
                }
                next.title = title;
            }
            DraftCommand::SetSlug(slug) => {
                self.slug_overridden = true;
                next.slug = slug;
            }
            DraftCommand::SetDescription(description) => {
                next.description = description;
            }
            DraftCommand::SetStock(in_stock) => {
                next.in_stock = in_stock;
            }
            DraftCommand::SetPrice(price) => {
                next.price = price;
            }
            DraftCommand::ToggleSize(size) => {
                if let Some(pos) = next.sizes.iter().position(|s| *s == size) {
                    next.sizes.remove(pos);
                } else {
                    next.sizes.push(size);
                }
            }
            DraftCommand::SelectCategory(category) => {
                next.category = category;
            }
            DraftCommand::SelectAudience(audience) => {
                next.audience = audience;
            }
            DraftCommand::StageTag(text) => {
                self.pending_tag = text;
            }
            DraftCommand::CommitTag => {
                let tag = std::mem::take(&mut self.pending_tag);
                // Duplicate suppression is a silent no-op; exact match only.
                if !tag.is_empty() && !next.tags.contains(&tag) {
                    next.tags.insert(0, tag);
                }
            }
            DraftCommand::RemoveTag(text) => {
                next.tags.retain(|t| *t != text);
            }
            DraftCommand::AddImage(reference) => {
                next.images.push(reference);
            }
            DraftCommand::RemoveImage(reference) => {
                if let Some(pos) = next.images.iter().position(|i| *i == reference) {
                    next.images.remove(pos);
                }
            }
        }
        self.draft = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> DraftEditor {
        DraftEditor::new(ProductDraft::blank())
    }

    fn valid_editor() -> DraftEditor {
        let mut ed = editor();
        ed.apply(DraftCommand::SetTitle("Cotton Hoodie".to_string()));
        ed.apply(DraftCommand::SetDescription("Warm and heavy.".to_string()));
        ed.apply(DraftCommand::SetStock(5));
        ed.apply(DraftCommand::SetPrice(Decimal::new(3999, 2)));
        ed
    }

    #[test]
    fn test_set_title_derives_slug() {
        let mut ed = editor();
        ed.apply(DraftCommand::SetTitle("Men's  T Shirt".to_string()));
        assert_eq!(ed.draft().title, "Men's  T Shirt");
        assert_eq!(ed.draft().slug, "mens--t-shirt");
    }

    #[test]
    fn test_manual_slug_stops_derivation() {
        let mut ed = editor();
        ed.apply(DraftCommand::SetTitle("First Title".to_string()));
        assert_eq!(ed.draft().slug, "first-title");
        ed.apply(DraftCommand::SetSlug("custom-slug".to_string()));
        ed.apply(DraftCommand::SetTitle("Second Title".to_string()));
        assert_eq!(ed.draft().slug, "custom-slug");
        assert_eq!(ed.draft().title, "Second Title");
    }

    #[test]
    fn test_toggle_size_is_involutive() {
        let mut ed = editor();
        let before = ed.draft().sizes.clone();
        ed.apply(DraftCommand::ToggleSize(Size::M));
        assert!(ed.draft().sizes.contains(&Size::M));
        ed.apply(DraftCommand::ToggleSize(Size::M));
        assert_eq!(ed.draft().sizes, before);
    }

    #[test]
    fn test_toggle_size_never_duplicates() {
        let mut ed = editor();
        ed.apply(DraftCommand::ToggleSize(Size::L));
        ed.apply(DraftCommand::ToggleSize(Size::Xl));
        ed.apply(DraftCommand::ToggleSize(Size::L));
        ed.apply(DraftCommand::ToggleSize(Size::L));
        let count = ed.draft().sizes.iter().filter(|s| **s == Size::L).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_commit_tag_inserts_at_front() {
        let mut ed = editor();
        ed.apply(DraftCommand::StageTag("new".to_string()));
        ed.apply(DraftCommand::CommitTag);
        ed.apply(DraftCommand::StageTag("sale".to_string()));
        ed.apply(DraftCommand::CommitTag);
        assert_eq!(ed.draft().tags, vec!["sale".to_string(), "new".to_string()]);
    }

    #[test]
    fn test_commit_duplicate_tag_is_noop_and_clears_pending() {
        let mut ed = editor();
        ed.apply(DraftCommand::StageTag("new".to_string()));
        ed.apply(DraftCommand::CommitTag);
        ed.apply(DraftCommand::StageTag("new".to_string()));
        ed.apply(DraftCommand::CommitTag);
        assert_eq!(ed.draft().tags, vec!["new".to_string()]);
        assert_eq!(ed.pending_tag(), "");
    }

    #[test]
    fn test_commit_tag_is_case_sensitive() {
        let mut ed = editor();
        ed.apply(DraftCommand::StageTag("Sale".to_string()));
        ed.apply(DraftCommand::CommitTag);
        ed.apply(DraftCommand::StageTag("sale".to_string()));
        ed.apply(DraftCommand::CommitTag);
        assert_eq!(
            ed.draft().tags,
            vec!["sale".to_string(), "Sale".to_string()]
        );
    }

    #[test]
    fn test_remove_tag_removes_all_matches_and_keeps_pending() {
        let mut ed = editor();
        ed.apply(DraftCommand::StageTag("shirt".to_string()));
        ed.apply(DraftCommand::CommitTag);
        ed.apply(DraftCommand::StageTag("shirt".to_string()));
        ed.apply(DraftCommand::RemoveTag("shirt".to_string()));
        assert!(ed.draft().tags.is_empty());
        // Matching pending text is left alone.
        assert_eq!(ed.pending_tag(), "shirt");
    }

    #[test]
    fn test_remove_image_removes_first_match_preserves_order() {
        let mut ed = editor();
        ed.apply(DraftCommand::AddImage("a.jpg".to_string()));
        ed.apply(DraftCommand::AddImage("b.jpg".to_string()));
        ed.apply(DraftCommand::RemoveImage("img1.jpg".to_string()));
        assert_eq!(
            ed.draft().images,
            vec![
                "img2.jpg".to_string(),
                "a.jpg".to_string(),
                "b.jpg".to_string()
            ]
        );
    }

    #[test]
    fn test_blank_draft_is_seeded_with_placeholders() {
        let draft = ProductDraft::blank();
        assert_eq!(draft.images, vec!["img1.jpg", "img2.jpg"]);
        assert!(draft.id.is_none());
    }

    #[test]
    fn test_image_invariant_checked_before_fields() {
        let mut ed = editor();
        // Empty title AND too few images: the image check wins.
        ed.apply(DraftCommand::RemoveImage("img1.jpg".to_string()));
        assert_eq!(
            ed.draft().validate_for_submit(),
            Err(DraftRejection::NotEnoughImages)
        );
    }

    #[test]
    fn test_field_validation_messages() {
        let mut ed = editor();
        ed.apply(DraftCommand::SetTitle("X".to_string()));
        ed.apply(DraftCommand::SetStock(-1));
        let errors = ed.draft().field_errors();
        assert!(errors.contains(&FieldError::new("title", "Minimum 2 characters")));
        assert!(errors.contains(&FieldError::new("description", "This field is required")));
        assert!(errors.contains(&FieldError::new("in_stock", "Minimum is 0")));
    }

    #[test]
    fn test_title_length_counts_characters_not_bytes() {
        let mut ed = editor();
        // One character, two bytes: still below the minimum.
        ed.apply(DraftCommand::SetTitle("é".to_string()));
        let errors = ed.draft().field_errors();
        assert!(errors.contains(&FieldError::new("title", "Minimum 2 characters")));

        ed.apply(DraftCommand::SetTitle("éé".to_string()));
        let errors = ed.draft().field_errors();
        assert!(!errors.iter().any(|e| e.field == "title"));
    }

    #[test]
    fn test_rejection_converts_to_validation_error() {
        use crate::error::AppError;

        let err = AppError::from(DraftRejection::NotEnoughImages);
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors, vec![FieldError::new("images", MIN_IMAGES_MESSAGE)]);
            }
            other => panic!("expected Validation, got {:?}", other),
        }

        let fields = vec![FieldError::new("title", "This field is required")];
        let err = AppError::from(DraftRejection::InvalidFields(fields.clone()));
        match err {
            AppError::Validation(errors) => assert_eq!(errors, fields),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_slug_rejected() {
        let mut ed = valid_editor();
        ed.apply(DraftCommand::SetSlug("two words".to_string()));
        let errors = ed.draft().field_errors();
        assert!(errors.contains(&FieldError::new("slug", "Whitespace is not allowed")));
    }

    #[test]
    fn test_complete_draft_passes() {
        let ed = valid_editor();
        assert_eq!(ed.draft().validate_for_submit(), Ok(()));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut ed = valid_editor();
        ed.apply(DraftCommand::SetPrice(Decimal::new(-1, 0)));
        let errors = ed.draft().field_errors();
        assert!(errors.contains(&FieldError::new("price", "Minimum is 0")));
    }
}
