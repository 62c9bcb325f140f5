//! Integration tests for the link lifecycle controller.

mod helpers;

use std::sync::atomic::Ordering;

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use ats_core::error::{AppError, ErrorKind};
use ats_entity::link::{CreateLinkRequest, JobId, LinkId, LinkScope};
use ats_entity::permission::PermissionLevel;
use ats_service::{EnsureOutcome, LinkError, ListingStatus};

use helpers::{FakeBackend, ORIGIN, active_global, controller, record};

#[tokio::test]
async fn test_list_shapes_normalize_to_same_links() {
    let records = json!([active_global(1), record(2, json!(42), "EDIT", Utc::now(), None)]);
    let shapes = [
        records.clone(),
        json!({ "count": 2, "results": records.clone() }),
        json!({ "results": { "count": 2, "results": records.clone() } }),
    ];

    let mut listings = Vec::new();
    for body in shapes {
        let listing = controller(FakeBackend::with_list(body)).list_links(None).await;
        assert_eq!(listing.status, ListingStatus::Fresh);
        listings.push(listing.links);
    }
    assert_eq!(listings[0].len(), 2);
    assert_eq!(listings[0], listings[1]);
    assert_eq!(listings[0], listings[2]);
}

#[tokio::test]
async fn test_list_failure_degrades_silently() {
    let listing = controller(FakeBackend::unreachable()).list_links(None).await;
    assert_eq!(listing.status, ListingStatus::Unavailable);
    assert!(listing.links.is_empty());
}

#[tokio::test]
async fn test_list_with_unknown_tier_degrades() {
    let body = json!([record(1, json!("global"), "OWNER", Utc::now(), None)]);
    let listing = controller(FakeBackend::with_list(body)).list_links(None).await;
    assert!(!listing.is_available());
}

#[tokio::test]
async fn test_list_passes_scope_through() {
    let backend = FakeBackend::with_list(json!([]));
    controller(backend.clone())
        .list_links(Some(&LinkScope::Job(JobId(42))))
        .await;
    assert_eq!(
        backend.list_scopes.lock().unwrap().as_slice(),
        &[Some(LinkScope::Job(JobId(42)))]
    );
}

#[tokio::test]
async fn test_ensure_returns_existing_without_creating() {
    let backend = FakeBackend::with_list(json!({ "results": [active_global(7)] }));
    let outcome = controller(backend.clone())
        .ensure_link(LinkScope::Global, PermissionLevel::Full)
        .await
        .unwrap();

    assert!(outcome.is_duplicate());
    assert_eq!(outcome.link().id, LinkId::from(7));
    assert_eq!(outcome.link().permission_level, PermissionLevel::View);
    assert_eq!(backend.create_count(), 0);
}

#[tokio::test]
async fn test_ensure_creates_global_edit_link() {
    let backend = FakeBackend::with_list(json!([]));
    let outcome = controller(backend.clone())
        .ensure_link(LinkScope::Global, PermissionLevel::Edit)
        .await
        .unwrap();

    let creates = backend.creates.lock().unwrap().clone();
    assert_eq!(
        creates,
        vec![CreateLinkRequest {
            scope: LinkScope::Global,
            permission_level: PermissionLevel::Edit,
            expires_in_days: 30,
        }]
    );

    let EnsureOutcome::Created(link) = outcome else {
        panic!("expected a created link");
    };
    assert_eq!(link.permission_level, PermissionLevel::Edit);
    assert_eq!(link.full_url, format!("{ORIGIN}/shared/{}", link.token));
    assert!(link.is_active());
}

#[tokio::test]
async fn test_ensure_ignores_expired_and_other_scopes() {
    let now = Utc::now();
    let body = json!([
        active_global(1),
        record(2, json!(42), "VIEW", now - Duration::days(60), Some(now - Duration::days(30))),
    ]);
    let backend = FakeBackend::with_list(body);
    let outcome = controller(backend.clone())
        .ensure_link(LinkScope::Job(JobId(42)), PermissionLevel::Comment)
        .await
        .unwrap();

    assert!(!outcome.is_duplicate());
    assert_eq!(outcome.link().scope, LinkScope::Job(JobId(42)));
    assert_eq!(backend.create_count(), 1);
}

#[tokio::test]
async fn test_ensure_creates_when_listing_unavailable() {
    let backend = FakeBackend::unreachable();
    let outcome = controller(backend.clone())
        .ensure_link(LinkScope::Global, PermissionLevel::View)
        .await
        .unwrap();
    assert!(matches!(outcome, EnsureOutcome::Created(_)));
}

#[tokio::test]
async fn test_ensure_among_explicit_links() {
    let backend = FakeBackend::with_list(json!([]));
    let ctrl = controller(backend.clone());
    let known = ctrl
        .list_links(None)
        .await
        .into_links();
    assert!(known.is_empty());

    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let stale: Vec<_> = serde_json::from_value::<ats_entity::link::LinkListResponse>(json!([
        record(1, json!("global"), "VIEW", now - Duration::days(400), None),
        record(2, json!(42), "VIEW", now - Duration::days(400), Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())),
    ]))
    .unwrap()
    .into_links(ORIGIN)
    .unwrap();

    let outcome = ctrl
        .ensure_link_among(LinkScope::Job(JobId(42)), PermissionLevel::View, &stale, now)
        .await
        .unwrap();
    assert!(!outcome.is_duplicate());

    let outcome = ctrl
        .ensure_link_among(LinkScope::Global, PermissionLevel::View, &stale, now)
        .await
        .unwrap();
    assert!(outcome.is_duplicate());
    assert_eq!(backend.create_count(), 1);
    assert_eq!(backend.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_create_failure_is_typed() {
    let backend = FakeBackend::with_list(json!([]));
    backend.fail_creates(AppError::backend_status(400, "scope is invalid"));

    let err = controller(backend)
        .ensure_link(LinkScope::Global, PermissionLevel::View)
        .await
        .unwrap_err();

    let LinkError::LinkCreationFailed(cause) = &err else {
        panic!("expected LinkCreationFailed, got {err:?}");
    };
    assert_eq!(cause.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_update_keeps_token_and_created_at() {
    let backend = FakeBackend::with_list(json!([active_global(5)]));
    let ctrl = controller(backend.clone());
    let before = ctrl.list_links(None).await.into_links().remove(0);

    let after = ctrl
        .update_permission(&before, PermissionLevel::Full)
        .await
        .unwrap();

    assert_eq!(after.permission_level, PermissionLevel::Full);
    assert_eq!(after.token, before.token);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.access_count, before.access_count);
    assert_eq!(
        backend.updates.lock().unwrap().as_slice(),
        &[(LinkId::from(5), PermissionLevel::Full)]
    );
}

#[tokio::test]
async fn test_update_applies_backend_values() {
    let backend = FakeBackend::with_list(json!([active_global(5)]));
    backend.set_update_body(json!({
        "id": 5,
        "token": "tok-5",
        "permission_level": "COMMENT",
        "access_count": 9
    }));
    let ctrl = controller(backend);
    let before = ctrl.list_links(None).await.into_links().remove(0);

    let after = ctrl
        .update_permission(&before, PermissionLevel::Comment)
        .await
        .unwrap();
    assert_eq!(after.permission_level, PermissionLevel::Comment);
    assert_eq!(after.access_count, 9);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn test_update_failure_is_typed() {
    let backend = FakeBackend::with_list(json!([active_global(5)]));
    backend.fail_updates(AppError::network("timed out"));
    let ctrl = controller(backend);
    let before = ctrl.list_links(None).await.into_links().remove(0);

    let err = ctrl
        .update_permission(&before, PermissionLevel::Edit)
        .await
        .unwrap_err();
    assert!(matches!(err, LinkError::PermissionUpdateFailed(ref cause) if cause.kind == ErrorKind::Network));
}
