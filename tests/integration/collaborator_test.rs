//! Removal, access changes, listing and failure mapping.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use collabhub_api::dto::response::DeleteCollaboratorBody;
use collabhub_core::config::AppConfig;
use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_database::{CollaboratorStore, GrantQuery, MemoryStore};
use collabhub_entity::grant::{AccessType, Collaborator, Grant, NewGrant, ResourceKind};
use collabhub_entity::user::User;

use crate::helpers::{INVITATION_SECRET, TestApp};

const DELETE: &str = "/api/collaborators/delete-collaborator";
const UPDATE: &str = "/api/collaborators/update-collaborator";

#[tokio::test]
async fn test_delete_against_owner_conflicts_and_keeps_row() {
    let app = TestApp::new();
    let (alice, carol) = (app.user("alice@example.com"), app.user("carol@example.com"));
    let folder = app.store.add_folder(alice.id, "F");
    app.store
        .put_grant(ResourceKind::Folder, folder, carol.id, AccessType::Write);

    let (status, body) = app
        .post(
            DELETE,
            Some(&app.token_for(&carol)),
            json!({"collaboratorId": alice.id, "foldersId": [folder]}),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "owner can't be removed");
    let row = app.store.grant(ResourceKind::Folder, folder, alice.id).unwrap();
    assert_eq!(row.access_type, AccessType::Owner);
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_delete_returns_sealed_list_of_removed_ids() {
    let app = TestApp::new();
    let (alice, bob) = (app.user("alice@example.com"), app.user("bob@example.com"));
    let folder = app.store.add_folder(alice.id, "F");
    let file = app.store.add_file(alice.id, Some(folder), "a.txt");
    app.store
        .put_grant(ResourceKind::Folder, folder, bob.id, AccessType::Read);

    let (status, body) = app
        .post(
            DELETE,
            Some(&app.token_for(&alice)),
            json!({"collaboratorId": bob.id, "foldersId": [folder], "filesId": [file]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body.get("deleteFoldersId").is_none());

    let sealed = body["payload"].as_str().unwrap();
    let opened: DeleteCollaboratorBody = collabhub_auth::TokenCodec::new(INVITATION_SECRET)
        .open(sealed)
        .unwrap();
    assert_eq!(opened.delete_folders_id, vec![folder]);
    assert!(opened.delete_files_id.is_empty());

    assert!(app.store.grant(ResourceKind::Folder, folder, bob.id).is_none());
    assert!(app.store.grant(ResourceKind::Folder, folder, alice.id).is_some());
}

#[tokio::test]
async fn test_delete_requires_write_access_and_known_collaborator() {
    let app = TestApp::new();
    let (alice, bob, carol) = (
        app.user("alice@example.com"),
        app.user("bob@example.com"),
        app.user("carol@example.com"),
    );
    let folder = app.store.add_folder(alice.id, "F");
    app.store
        .put_grant(ResourceKind::Folder, folder, bob.id, AccessType::Read);
    app.store
        .put_grant(ResourceKind::Folder, folder, carol.id, AccessType::Read);

    let (status, _) = app
        .post(
            DELETE,
            Some(&app.token_for(&carol)),
            json!({"collaboratorId": bob.id, "foldersId": [folder]}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(app.store.grant(ResourceKind::Folder, folder, bob.id).is_some());

    let (status, _) = app
        .post(
            DELETE,
            Some(&app.token_for(&alice)),
            json!({"collaboratorId": Uuid::new_v4(), "foldersId": [folder]}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_changes_level_and_skips_owner_rows() {
    let app = TestApp::new();
    let (alice, bob, carol) = (
        app.user("alice@example.com"),
        app.user("bob@example.com"),
        app.user("carol@example.com"),
    );
    let folder = app.store.add_folder(alice.id, "F");
    app.store
        .put_grant(ResourceKind::Folder, folder, bob.id, AccessType::Read);
    app.store
        .put_grant(ResourceKind::Folder, folder, carol.id, AccessType::Write);

    let (status, body) = app
        .post(
            UPDATE,
            Some(&app.token_for(&alice)),
            json!({"collaboratorId": bob.id, "accessType": "write", "foldersId": [folder]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["accessType"], "write");
    assert_eq!(
        app.store
            .grant(ResourceKind::Folder, folder, bob.id)
            .unwrap()
            .access_type,
        AccessType::Write
    );

    let (status, _) = app
        .post(
            UPDATE,
            Some(&app.token_for(&carol)),
            json!({"collaboratorId": alice.id, "accessType": "read", "foldersId": [folder]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        app.store
            .grant(ResourceKind::Folder, folder, alice.id)
            .unwrap()
            .access_type,
        AccessType::Owner
    );
}

#[tokio::test]
async fn test_update_rejects_owner_and_missing_level() {
    let app = TestApp::new();
    let (alice, bob) = (app.user("alice@example.com"), app.user("bob@example.com"));
    let folder = app.store.add_folder(alice.id, "F");
    app.store
        .put_grant(ResourceKind::Folder, folder, bob.id, AccessType::Read);
    let token = app.token_for(&alice);

    let (status, body) = app
        .post(
            UPDATE,
            Some(&token),
            json!({"collaboratorId": bob.id, "accessType": "owner", "foldersId": [folder]}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "can't be updated to owner");

    let (status, _) = app
        .post(
            UPDATE,
            Some(&token),
            json!({"collaboratorId": bob.id, "accessType": null, "foldersId": [folder]}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_list_collaborators() {
    let app = TestApp::new();
    let (alice, bob, stranger) = (
        app.user("alice@example.com"),
        app.user("bob@example.com"),
        app.user("stranger@example.com"),
    );
    let folder = app.store.add_folder(alice.id, "F");
    app.store
        .put_grant(ResourceKind::Folder, folder, bob.id, AccessType::Read);

    let uri = format!("/api/collaborators/list?folderId={folder}");
    let (status, body) = app.get(&uri, Some(&app.token_for(&bob))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let mut emails: Vec<&str> = body["collaborators"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["email"].as_str().unwrap())
        .collect();
    emails.sort();
    assert_eq!(emails, ["alice@example.com", "bob@example.com"]);

    let (status, _) = app.get(&uri, Some(&app.token_for(&stranger))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .get("/api/collaborators/list", Some(&app.token_for(&alice)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

/// Delegates user lookups to memory and fails every grant query.
#[derive(Debug)]
struct BrokenGrants(MemoryStore);

#[async_trait]
impl CollaboratorStore for BrokenGrants {
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.0.find_user_by_id(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.0.find_user_by_email(email).await
    }

    async fn find_grants(&self, _: ResourceKind, _: &GrantQuery<'_>) -> AppResult<Vec<Grant>> {
        Err(AppError::database("connection reset by peer"))
    }

    async fn create_grants(&self, _: ResourceKind, _: &[NewGrant]) -> AppResult<u64> {
        Err(AppError::database("connection reset by peer"))
    }

    async fn update_access(
        &self,
        _: ResourceKind,
        _: Uuid,
        _: &[Uuid],
        _: AccessType,
    ) -> AppResult<u64> {
        Err(AppError::database("connection reset by peer"))
    }

    async fn delete_grants(&self, _: ResourceKind, _: Uuid, _: &[Uuid]) -> AppResult<u64> {
        Err(AppError::database("connection reset by peer"))
    }

    async fn list_collaborators(&self, _: ResourceKind, _: Uuid) -> AppResult<Vec<Collaborator>> {
        Err(AppError::database("connection reset by peer"))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

#[tokio::test]
async fn test_store_failure_is_opaque_500() {
    let mut config = AppConfig::default();
    config.invitation.token_secret = INVITATION_SECRET.to_string();
    let store = MemoryStore::new();
    let app = TestApp::with_store(config, store.clone(), Arc::new(BrokenGrants(store)));

    let alice = app.user("alice@example.com");
    app.user("bob@example.com");
    let folder = app.store.add_folder(alice.id, "F");

    let (status, body) = app
        .post(
            "/api/collaborators/add-folder-collaborator",
            Some(&app.token_for(&alice)),
            json!({"collaboratorEmail": "bob@example.com", "accessType": "read", "foldersId": [folder]}),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to create invitation");
    assert!(!body.to_string().contains("connection reset"));

    let (_, body) = app.get("/api/health", None).await;
    assert_eq!(body["status"], "degraded");
}
