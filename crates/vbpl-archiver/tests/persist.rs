//! Write-once behaviour of the text and binary persisters.

mod common;

use std::time::Duration;

use common::{archive, FakeRenderer};
use vbpl_archiver::{HttpClient, Persister, SaveOutcome};
use vbpl_core::{part_path, Category, ItemId};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn id(s: &str) -> ItemId {
    ItemId::new(s).unwrap()
}

#[tokio::test]
async fn save_text_twice_renders_once() {
    let (_dir, store) = archive();
    let renderer = FakeRenderer::new().page("toanvan", "<html>Toàn văn</html>");
    let http = HttpClient::new(Duration::from_secs(5));
    let persister = Persister::new(&store, &renderer, &http);
    let url = "https://vbpl.vn/TW/Pages/vbpq-toanvan.aspx?ItemID=123&Keyword=";

    let first = persister
        .save_text(url, Category::FullText, &id("123"))
        .await
        .unwrap();
    let target = store.path_for(Category::FullText, &id("123"));
    assert_eq!(first, SaveOutcome::Saved(target.clone()));

    let second = persister
        .save_text(url, Category::FullText, &id("123"))
        .await
        .unwrap();
    assert_eq!(second, SaveOutcome::AlreadyExists(target.clone()));

    assert_eq!(renderer.call_count(), 1);
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "<html>Toàn văn</html>");
}

#[tokio::test]
async fn existing_file_is_never_rewritten() {
    let (_dir, store) = archive();
    let target = store.path_for(Category::Property, &id("5"));
    std::fs::create_dir_all(target.parent().unwrap()).unwrap();
    std::fs::write(&target, "old").unwrap();

    let renderer = FakeRenderer::new();
    let http = HttpClient::new(Duration::from_secs(5));
    let persister = Persister::new(&store, &renderer, &http);

    let outcome = persister
        .save_text("https://vbpl.vn/p", Category::Property, &id("5"))
        .await
        .unwrap();

    assert!(matches!(outcome, SaveOutcome::AlreadyExists(_)));
    assert_eq!(renderer.call_count(), 0);
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "old");
}

#[tokio::test]
async fn render_error_propagates_and_writes_nothing() {
    let (_dir, store) = archive();
    let renderer = FakeRenderer::new().fail_on("lichsu");
    let http = HttpClient::new(Duration::from_secs(5));
    let persister = Persister::new(&store, &renderer, &http);

    let result = persister
        .save_text("https://vbpl.vn/tw/Pages/vbpq-lichsu.aspx", Category::History, &id("8"))
        .await;

    assert!(result.is_err());
    assert!(!store.path_for(Category::History, &id("8")).exists());
}

#[tokio::test]
async fn failed_download_leaves_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/FileData/missing.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, store) = archive();
    let renderer = FakeRenderer::new();
    let http = HttpClient::new(Duration::from_secs(5));
    let persister = Persister::new(&store, &renderer, &http);

    let outcome = persister
        .save_binary(
            &format!("{}/FileData/missing.pdf", server.uri()),
            Category::Pdf,
            &id("404"),
        )
        .await
        .unwrap();

    assert_eq!(outcome, SaveOutcome::DownloadFailed { status: 404 });
    let target = store.path_for(Category::Pdf, &id("404"));
    assert!(!target.exists());
    assert!(!part_path(&target).exists());
}

#[tokio::test]
async fn binary_download_is_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/FileData/doc.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 body".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, store) = archive();
    let renderer = FakeRenderer::new();
    let http = HttpClient::new(Duration::from_secs(5));
    let persister = Persister::new(&store, &renderer, &http);
    let url = format!("{}/FileData/doc.pdf", server.uri());

    let first = persister.save_binary(&url, Category::Pdf, &id("77")).await.unwrap();
    let second = persister.save_binary(&url, Category::Pdf, &id("77")).await.unwrap();

    let target = store.path_for(Category::Pdf, &id("77"));
    assert_eq!(first, SaveOutcome::Saved(target.clone()));
    assert_eq!(second, SaveOutcome::AlreadyExists(target.clone()));
    assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-1.4 body");
}
