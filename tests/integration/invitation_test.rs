//! Direct and public invitation flows.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use collabhub_entity::grant::{AccessType, ResourceKind};
use collabhub_entity::invitation::InvitationPayload;

use crate::helpers::{TestApp, token_from_link};

const ADD: &str = "/api/collaborators/add-folder-collaborator";
const PUBLIC: &str = "/api/collaborators/generate-public-invitation";

fn redeem_uri(token: &str) -> String {
    format!("/api/collaborators/folder-invitation?token={token}")
}

#[tokio::test]
async fn test_direct_invitation_creates_write_grant_on_redeem() {
    let app = TestApp::new();
    let (alice, bob) = (app.user("alice@example.com"), app.user("bob@example.com"));
    let folder = app.store.add_folder(alice.id, "Reports");
    let token = app.token_for(&alice);

    let (status, body) = app
        .post(
            ADD,
            Some(&token),
            json!({
                "collaboratorEmail": "bob@example.com",
                "accessType": "write",
                "foldersId": [folder],
                "message": "Quarterly numbers"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Invitation sent");

    // Minting writes nothing.
    assert!(app.store.grant(ResourceKind::Folder, folder, bob.id).is_none());
    let sent = app.outbox.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "bob@example.com");

    let (status, body) = app.get(&redeem_uri(&app.last_emailed_token()), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"], "bob@example.com");
    assert_eq!(body["accessType"], "write");
    assert_eq!(body["foldersId"][0], folder.to_string());

    let grant = app.store.grant(ResourceKind::Folder, folder, bob.id).unwrap();
    assert_eq!(grant.access_type, AccessType::Write);
}

#[tokio::test]
async fn test_redeem_upgrades_read_to_write_in_place() {
    let app = TestApp::new();
    let (alice, bob) = (app.user("alice@example.com"), app.user("bob@example.com"));
    let folder = app.store.add_folder(alice.id, "Shared");
    app.store
        .put_grant(ResourceKind::Folder, folder, bob.id, AccessType::Read);

    let token = app.token_for(&alice);
    let (status, _) = app
        .post(
            ADD,
            Some(&token),
            json!({"collaboratorEmail": "bob@example.com", "accessType": "write", "foldersId": [folder]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&redeem_uri(&app.last_emailed_token()), None).await;
    assert_eq!(status, StatusCode::OK);

    let grant = app.store.grant(ResourceKind::Folder, folder, bob.id).unwrap();
    assert_eq!(grant.access_type, AccessType::Write);
    // Owner row plus Bob's single row.
    assert_eq!(app.store.grant_count(ResourceKind::Folder, folder), 2);
}

#[tokio::test]
async fn test_redeem_twice_writes_once() {
    let app = TestApp::new();
    let (alice, _bob) = (app.user("alice@example.com"), app.user("bob@example.com"));
    let folder = app.store.add_folder(alice.id, "F");
    let file = app.store.add_file(alice.id, Some(folder), "a.txt");

    let token = app.token_for(&alice);
    app.post(
        ADD,
        Some(&token),
        json!({
            "collaboratorEmail": "bob@example.com",
            "accessType": "read",
            "foldersId": [folder],
            "filesId": [file]
        }),
    )
    .await;
    let uri = redeem_uri(&app.last_emailed_token());

    let (first, _) = app.get(&uri, None).await;
    let writes = app.store.write_count();
    let (second, body) = app.get(&uri, None).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK, "{body}");
    assert_eq!(app.store.write_count(), writes);
}

#[tokio::test]
async fn test_read_only_inviter_is_forbidden_and_writes_nothing() {
    let app = TestApp::new();
    let (alice, carol) = (app.user("alice@example.com"), app.user("carol@example.com"));
    app.user("dave@example.com");
    let folder = app.store.add_folder(alice.id, "F");
    app.store
        .put_grant(ResourceKind::Folder, folder, carol.id, AccessType::Read);

    let token = app.token_for(&carol);
    let (status, body) = app
        .post(
            ADD,
            Some(&token),
            json!({"collaboratorEmail": "dave@example.com", "accessType": "read", "foldersId": [folder]}),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "insufficient permissions");
    assert!(app.outbox.sent().is_empty());
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_redeem_rechecks_inviter_current_access() {
    let app = TestApp::new();
    let (alice, carol, dave) = (
        app.user("alice@example.com"),
        app.user("carol@example.com"),
        app.user("dave@example.com"),
    );
    let folder = app.store.add_folder(alice.id, "F");
    app.store
        .put_grant(ResourceKind::Folder, folder, carol.id, AccessType::Write);

    let token = app.token_for(&carol);
    let (status, _) = app
        .post(
            ADD,
            Some(&token),
            json!({"collaboratorEmail": "dave@example.com", "accessType": "read", "foldersId": [folder]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Carol loses write access before Dave redeems.
    app.store
        .put_grant(ResourceKind::Folder, folder, carol.id, AccessType::Read);

    let (status, _) = app.get(&redeem_uri(&app.last_emailed_token()), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(app.store.grant(ResourceKind::Folder, folder, dave.id).is_none());
}

#[tokio::test]
async fn test_public_link_grants_the_signed_in_caller() {
    let app = TestApp::new();
    let (alice, erin) = (app.user("alice@example.com"), app.user("erin@example.com"));
    let file = app.store.add_file(alice.id, None, "deck.pdf");

    let (status, body) = app
        .post(
            PUBLIC,
            Some(&app.token_for(&alice)),
            json!({"filesId": [file], "accessType": "read"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let link = body["invitationLink"].as_str().unwrap().to_string();
    assert!(link.starts_with("https://app.test/folder-invitation?token="));
    assert!(app.outbox.sent().is_empty());

    let uri = redeem_uri(&token_from_link(&link));

    let (status, _) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.get(&uri, Some(&app.token_for(&erin))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"], "erin@example.com");
    assert_eq!(
        app.store
            .grant(ResourceKind::File, file, erin.id)
            .unwrap()
            .access_type,
        AccessType::Read
    );
}

#[tokio::test]
async fn test_bad_tokens_share_one_generic_error() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com");
    let folder = app.store.add_folder(alice.id, "F");

    let (_, body) = app
        .post(
            PUBLIC,
            Some(&app.token_for(&alice)),
            json!({"foldersId": [folder], "accessType": "write"}),
        )
        .await;
    let mut token = token_from_link(body["invitationLink"].as_str().unwrap());
    let last = token.pop().unwrap();
    token.push(if last == 'A' { 'B' } else { 'A' });

    let foreign = collabhub_auth::TokenCodec::new("some-other-secret")
        .seal(&json!({"foldersId": [folder]}))
        .unwrap();

    let expired = app
        .codec()
        .seal(&InvitationPayload {
            folders_id: vec![folder],
            files_id: vec![],
            access_type: AccessType::Write,
            sender_email: "alice@example.com".to_string(),
            recipient_email: Some("alice@example.com".to_string()),
            issued_at: (Utc::now() - Duration::days(30)).timestamp(),
        })
        .unwrap();

    for bad in [token.as_str(), "not-a-token", foreign.as_str(), expired.as_str(), ""] {
        let (status, body) = app.get(&redeem_uri(bad), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "token {bad:?}");
        assert_eq!(body["message"], "Invalid or expired token", "token {bad:?}");
    }
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_invitation_input_errors() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com");
    app.user("bob@example.com");
    let folder = app.store.add_folder(alice.id, "F");
    let token = app.token_for(&alice);

    let cases = [
        (
            json!({"collaboratorEmail": "nobody@example.com", "accessType": "read", "foldersId": [folder]}),
            StatusCode::NOT_FOUND,
        ),
        (
            json!({"collaboratorEmail": "bob@example.com", "accessType": "owner", "foldersId": [folder]}),
            StatusCode::CONFLICT,
        ),
        (
            json!({"collaboratorEmail": "bob@example.com", "foldersId": [folder]}),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({"collaboratorEmail": "bob@example.com", "accessType": null, "foldersId": [folder]}),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({"collaboratorEmail": "bob@example.com", "accessType": "read"}),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({"collaboratorEmail": "not an email", "accessType": "read", "foldersId": [folder]}),
            StatusCode::BAD_REQUEST,
        ),
    ];

    for (body, expected) in cases {
        let (status, response) = app.post(ADD, Some(&token), body.clone()).await;
        assert_eq!(status, expected, "{body} -> {response}");
    }
    assert!(app.outbox.sent().is_empty());
}

#[tokio::test]
async fn test_inactive_recipient_is_not_found() {
    let app = TestApp::new();
    let (alice, bob) = (app.user("alice@example.com"), app.user("bob@example.com"));
    app.store.deactivate_user(bob.id);
    let folder = app.store.add_folder(alice.id, "F");

    let (status, _) = app
        .post(
            ADD,
            Some(&app.token_for(&alice)),
            json!({"collaboratorEmail": "bob@example.com", "accessType": "read", "foldersId": [folder]}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_bearer_is_unauthorized() {
    let app = TestApp::new();
    let (status, body) = app
        .post(PUBLIC, None, json!({"foldersId": [], "accessType": "read"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (status, _) = app
        .post(PUBLIC, Some("garbage"), json!({"foldersId": [], "accessType": "read"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
