use std::time::Duration;

use serde_json::json;
use watch_core::Notification;
use watch_engine::{deliver, LogNotifier, Notifier, NotifyError, WebhookNotifier};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn webhook(server: &MockServer) -> WebhookNotifier {
    WebhookNotifier::new(format!("{}/hook", server.uri()), Duration::from_secs(5))
        .expect("client builds")
}

#[tokio::test]
async fn webhook_posts_text_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "text": "Pledge watch stopping." })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let delivered = deliver(&webhook(&server), &Notification::Stopping).await;
    assert!(delivered);
}

#[tokio::test]
async fn webhook_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = webhook(&server).notify("hello").await.unwrap_err();
    assert_eq!(err, NotifyError::HttpStatus(500));
}

#[tokio::test]
async fn delivery_failure_is_swallowed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(!deliver(&webhook(&server), &Notification::Unavailable).await);
}

#[tokio::test]
async fn unreachable_webhook_is_a_transport_error() {
    let notifier = WebhookNotifier::new("http://127.0.0.1:9/hook", Duration::from_secs(2)).unwrap();
    let err = notifier.notify("hello").await.unwrap_err();
    assert!(matches!(err, NotifyError::Transport(_)));
}

#[tokio::test]
async fn log_notifier_always_succeeds() {
    assert_eq!(LogNotifier.name(), "log");
    assert!(deliver(&LogNotifier, &Notification::Unavailable).await);
}
