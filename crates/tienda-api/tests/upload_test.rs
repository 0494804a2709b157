//! Upload API integration tests.
//!
//! Run with: `cargo test -p tienda-api --test upload_test`
//! Files land in a per-test temp directory; no Postgres is needed.

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{api_path, setup_test_app_with_limit};

const PER_FILE_LIMIT: usize = 1024;

fn png_part(name: &str, size: usize) -> Part {
    Part::bytes(vec![0u8; size])
        .file_name(name.to_string())
        .mime_type("image/png")
}

#[tokio::test]
async fn test_batch_of_files_clears_request_body_limit() {
    // Three files near the per-file cap; together the body is well over
    // one file's worth, and the router must still let it through.
    let app = setup_test_app_with_limit(PER_FILE_LIMIT).await;

    let form = MultipartForm::new()
        .add_part("file", png_part("a.png", 800))
        .add_part("file", png_part("b.png", 800))
        .add_part("file", png_part("c.png", 800));

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["images"].as_array().expect("images").len(), 3);
    assert!(body.get("failures").is_none());
}

#[tokio::test]
async fn test_oversized_file_fails_without_sinking_the_batch() {
    let app = setup_test_app_with_limit(PER_FILE_LIMIT).await;

    let form = MultipartForm::new()
        .add_part("file", png_part("small.png", 512))
        .add_part("file", png_part("big.png", PER_FILE_LIMIT * 2));

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["images"].as_array().expect("images").len(), 1);
    let failures = body["failures"].as_array().expect("failures");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["filename"], "big.png");
}

#[tokio::test]
async fn test_disallowed_file_type_fails_alone() {
    let app = setup_test_app_with_limit(PER_FILE_LIMIT).await;

    let gif = Part::bytes(vec![0u8; 256])
        .file_name("anim.gif".to_string())
        .mime_type("image/gif");
    let form = MultipartForm::new()
        .add_part("file", png_part("ok.png", 256))
        .add_part("file", gif);

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["images"].as_array().expect("images").len(), 1);
    let failures = body["failures"].as_array().expect("failures");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["filename"], "anim.gif");
}
