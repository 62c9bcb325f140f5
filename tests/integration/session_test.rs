//! Integration tests for share session state.

mod helpers;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::json;

use ats_core::error::{AppError, ErrorKind};
use ats_core::result::AppResult;
use ats_entity::link::{LinkId, LinkScope};
use ats_entity::permission::PermissionLevel;
use ats_service::{Clipboard, LinkError, ShareSession};

use helpers::{FakeBackend, active_global, controller};

const FEEDBACK: Duration = Duration::from_secs(3);

#[derive(Debug, Default)]
struct RecordingClipboard {
    copied: Mutex<Vec<String>>,
}

impl Clipboard for RecordingClipboard {
    fn copy_text(&self, text: &str) -> AppResult<()> {
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn session(backend: Arc<FakeBackend>) -> ShareSession {
    ShareSession::new(controller(backend), LinkScope::Global, FEEDBACK)
}

#[tokio::test]
async fn test_refresh_discovers_active_link() {
    let session = session(FakeBackend::with_list(json!([active_global(3)])));
    assert!(session.current().is_none());

    let found = session.refresh().await.unwrap();
    assert_eq!(found.id, LinkId::from(3));
    assert_eq!(session.current(), Some(found));
}

#[tokio::test]
async fn test_refresh_failure_keeps_displayed_link() {
    let backend = FakeBackend::with_list(json!([active_global(3)]));
    let session = session(backend.clone());
    session.refresh().await;

    backend.set_list(None);
    let still = session.refresh().await;
    assert_eq!(still.map(|l| l.id), Some(LinkId::from(3)));
}

#[tokio::test]
async fn test_generate_displays_new_link() {
    let backend = FakeBackend::with_list(json!([]));
    let session = session(backend.clone());

    let outcome = session.generate(PermissionLevel::Comment).await.unwrap();
    assert!(!outcome.is_duplicate());
    assert_eq!(session.current().as_ref(), Some(outcome.link()));
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_generate_with_existing_link_signals_duplicate() {
    let backend = FakeBackend::with_list(json!([active_global(8)]));
    let session = session(backend.clone());

    let outcome = session.generate(PermissionLevel::Full).await.unwrap();
    assert!(outcome.is_duplicate());
    assert_eq!(session.current().map(|l| l.id), Some(LinkId::from(8)));
    assert_eq!(backend.create_count(), 0);
}

#[tokio::test]
async fn test_second_generate_rejected_while_in_flight() {
    let backend = FakeBackend::with_list(json!([]));
    let gate = backend.gate_creates();
    let session = Arc::new(session(backend.clone()));

    let first = tokio::spawn({
        let session = session.clone();
        async move { session.generate(PermissionLevel::View).await }
    });

    gate.entered.notified().await;
    assert!(session.is_busy());
    let second = session.generate(PermissionLevel::View).await;
    assert!(matches!(second, Err(LinkError::RequestInFlight)));

    gate.release.notify_one();
    let outcome = first.await.unwrap().unwrap();
    assert!(!outcome.is_duplicate());
    assert!(!session.is_busy());
    assert_eq!(backend.create_count(), 1);
}

#[tokio::test]
async fn test_pending_refresh_does_not_override_generate() {
    let backend = FakeBackend::with_list(json!([]));
    let gate = backend.gate_next_list();
    let session = Arc::new(session(backend.clone()));

    let refresh = tokio::spawn({
        let session = session.clone();
        async move { session.refresh().await }
    });
    gate.entered.notified().await;

    let created = session.generate(PermissionLevel::Edit).await.unwrap();
    assert_eq!(session.current().as_ref(), Some(created.link()));

    gate.release.notify_one();
    let shown = refresh.await.unwrap();
    assert_eq!(shown.as_ref(), Some(created.link()));
    assert_eq!(session.current().as_ref(), Some(created.link()));
}

#[tokio::test]
async fn test_pending_refresh_does_not_override_permission_change() {
    let backend = FakeBackend::with_list(json!([active_global(3)]));
    let session = Arc::new(session(backend.clone()));
    session.refresh().await.unwrap();

    let gate = backend.gate_next_list();
    let refresh = tokio::spawn({
        let session = session.clone();
        async move { session.refresh().await }
    });
    gate.entered.notified().await;

    let updated = session.change_permission(PermissionLevel::Full).await.unwrap();
    gate.release.notify_one();
    refresh.await.unwrap();

    assert_eq!(session.current(), Some(updated));
    assert_eq!(
        session.current().map(|l| l.permission_level),
        Some(PermissionLevel::Full)
    );
}

#[tokio::test]
async fn test_change_permission_success() {
    let backend = FakeBackend::with_list(json!([active_global(3)]));
    let session = session(backend);
    let before = session.refresh().await.unwrap();

    let updated = session.change_permission(PermissionLevel::Edit).await.unwrap();
    assert_eq!(updated.permission_level, PermissionLevel::Edit);
    assert_eq!(updated.token, before.token);
    assert_eq!(session.current(), Some(updated));
}

#[tokio::test]
async fn test_change_permission_failure_reverts() {
    let backend = FakeBackend::with_list(json!([active_global(3)]));
    backend.fail_updates(AppError::backend_status(403, "not allowed"));
    let session = session(backend);
    let before = session.refresh().await.unwrap();

    let err = session
        .change_permission(PermissionLevel::Full)
        .await
        .unwrap_err();
    assert_eq!(err.cause().map(|c| c.kind), Some(ErrorKind::Authorization));
    assert_eq!(session.current(), Some(before));
}

#[tokio::test]
async fn test_change_permission_without_link() {
    let session = session(FakeBackend::with_list(json!([])));
    let err = session
        .change_permission(PermissionLevel::Edit)
        .await
        .unwrap_err();
    assert!(matches!(err, LinkError::NoActiveLink(LinkScope::Global)));
}

#[tokio::test]
async fn test_copy_flag_expires() {
    let session = session(FakeBackend::with_list(json!([active_global(3)])));
    let link = session.refresh().await.unwrap();
    let clipboard = RecordingClipboard::default();

    let start = Instant::now();
    let url = session.copy_at(&clipboard, start).unwrap();
    assert_eq!(url, link.full_url);
    assert_eq!(clipboard.copied.lock().unwrap().as_slice(), &[link.full_url.clone()]);

    assert!(session.is_copied_at(start + Duration::from_secs(1)));
    assert!(!session.is_copied_at(start + FEEDBACK));
    assert_eq!(session.open_url(), Some(link.full_url));
}

#[tokio::test]
async fn test_copy_without_link_fails() {
    let session = session(FakeBackend::with_list(json!([])));
    let clipboard = RecordingClipboard::default();
    let err = session.copy(&clipboard).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(clipboard.copied.lock().unwrap().is_empty());
    assert!(!session.is_copied());
}
