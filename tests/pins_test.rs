//! Pin CRUD integration tests: the board access policy is the single gate
//! for create, update and delete

mod common;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use common::{seed_board, seed_pin, seed_user, TestDatabase};
use pinboard::backend::boards::db::require_board;
use pinboard::backend::boards::invitations;
use pinboard::backend::error::BackendError;
use pinboard::backend::pins::db::{self, NewPin, PinUpdate};
use pinboard::backend::pins::interactions;
use pinboard::shared::{InvitationAction, Permission, Visibility};

fn new_pin(board_id: &str, title: &str) -> NewPin {
    NewPin {
        board_id: board_id.to_string(),
        title: title.to_string(),
        description: None,
        image_url: "https://img.example/pin.png".to_string(),
        source_url: None,
        visibility: Visibility::Public,
        is_draft: false,
    }
}

async fn grant(db: &TestDatabase, owner_id: &str, board_id: &str, username: &str, permission: Permission) {
    let invitee = pinboard::backend::users::db::find_user_by_username(db.pool(), username)
        .await
        .unwrap()
        .unwrap();
    let invitation = invitations::send_invitation(db.pool(), owner_id, board_id, username, permission, None)
        .await
        .unwrap();
    invitations::respond_to_invitation(db.pool(), &invitation.id, &invitee.id, InvitationAction::Accept)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_pin_increments_board_counter() {
    let db = TestDatabase::new().await;
    let owner = seed_user(db.pool(), "owner").await;
    let board = seed_board(db.pool(), &owner.id, "Art").await;

    let pin = db::create_pin(db.pool(), &owner.id, new_pin(&board.id, "Sunset"))
        .await
        .unwrap();

    assert_eq!(pin.owner_user_id, owner.id);
    assert_eq!(pin.save_count, 0);
    assert_eq!(pin.like_count, 0);
    assert_eq!(require_board(db.pool(), &board.id).await.unwrap().pin_count, 1);
}

#[tokio::test]
async fn test_create_pin_requires_title_and_image() {
    let db = TestDatabase::new().await;
    let owner = seed_user(db.pool(), "owner").await;
    let board = seed_board(db.pool(), &owner.id, "Art").await;

    let missing_title = new_pin(&board.id, "  ");
    assert_matches!(
        db::create_pin(db.pool(), &owner.id, missing_title).await,
        Err(BackendError::MissingInput { field: "title" })
    );

    let mut missing_image = new_pin(&board.id, "Sunset");
    missing_image.image_url = String::new();
    assert_matches!(
        db::create_pin(db.pool(), &owner.id, missing_image).await,
        Err(BackendError::MissingInput { field: "image_url" })
    );
}

#[tokio::test]
async fn test_edit_collaborator_can_create_pins() {
    let db = TestDatabase::new().await;
    let owner = seed_user(db.pool(), "owner").await;
    seed_user(db.pool(), "editor").await;
    let board = seed_board(db.pool(), &owner.id, "Art").await;
    grant(&db, &owner.id, &board.id, "editor", Permission::Edit).await;

    let editor = pinboard::backend::users::db::find_user_by_username(db.pool(), "editor")
        .await
        .unwrap()
        .unwrap();
    let pin = db::create_pin(db.pool(), &editor.id, new_pin(&board.id, "Guest pin"))
        .await
        .unwrap();
    assert_eq!(pin.board_id, board.id);
}

#[tokio::test]
async fn test_view_collaborator_cannot_create_pins() {
    let db = TestDatabase::new().await;
    let owner = seed_user(db.pool(), "owner").await;
    let viewer = seed_user(db.pool(), "viewer").await;
    let board = seed_board(db.pool(), &owner.id, "Art").await;
    grant(&db, &owner.id, &board.id, "viewer", Permission::View).await;

    let result = db::create_pin(db.pool(), &viewer.id, new_pin(&board.id, "Nope")).await;
    assert_matches!(result, Err(BackendError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_outsider_cannot_create_pins() {
    let db = TestDatabase::new().await;
    let owner = seed_user(db.pool(), "owner").await;
    let outsider = seed_user(db.pool(), "outsider").await;
    let board = seed_board(db.pool(), &owner.id, "Art").await;

    let result = db::create_pin(db.pool(), &outsider.id, new_pin(&board.id, "Nope")).await;
    assert_matches!(result, Err(BackendError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_update_pin_fields() {
    let db = TestDatabase::new().await;
    let owner = seed_user(db.pool(), "owner").await;
    let board = seed_board(db.pool(), &owner.id, "Art").await;
    let pin = seed_pin(db.pool(), &owner.id, &board.id, "Sunset").await;

    let updated = db::update_pin(
        db.pool(),
        &owner.id,
        &pin.id,
        PinUpdate {
            title: Some("Sunrise".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.title, "Sunrise");
    assert_eq!(updated.board_id, board.id);
    // Untouched fields keep their values.
    assert_eq!(updated.description.as_deref(), Some("seeded"));
}

#[tokio::test]
async fn test_move_pin_adjusts_both_board_counters() {
    let db = TestDatabase::new().await;
    let owner = seed_user(db.pool(), "owner").await;
    let board_a = seed_board(db.pool(), &owner.id, "Art").await;
    let board_b = seed_board(db.pool(), &owner.id, "Archive").await;
    let pin = seed_pin(db.pool(), &owner.id, &board_a.id, "Sunset").await;

    let moved = db::update_pin(
        db.pool(),
        &owner.id,
        &pin.id,
        PinUpdate {
            board_id: Some(board_b.id.clone()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(moved.board_id, board_b.id);
    assert_eq!(require_board(db.pool(), &board_a.id).await.unwrap().pin_count, 0);
    assert_eq!(require_board(db.pool(), &board_b.id).await.unwrap().pin_count, 1);
}

#[tokio::test]
async fn test_move_pin_requires_edit_on_target_board() {
    let db = TestDatabase::new().await;
    let owner = seed_user(db.pool(), "owner").await;
    let other = seed_user(db.pool(), "other").await;
    let board = seed_board(db.pool(), &owner.id, "Art").await;
    let foreign_board = seed_board(db.pool(), &other.id, "Theirs").await;
    let pin = seed_pin(db.pool(), &owner.id, &board.id, "Sunset").await;

    let result = db::update_pin(
        db.pool(),
        &owner.id,
        &pin.id,
        PinUpdate {
            board_id: Some(foreign_board.id.clone()),
            ..Default::default()
        },
    )
    .await;
    assert_matches!(result, Err(BackendError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_delete_pin_decrements_counter_and_clears_likes() {
    let db = TestDatabase::new().await;
    let owner = seed_user(db.pool(), "owner").await;
    let fan = seed_user(db.pool(), "fan").await;
    let board = seed_board(db.pool(), &owner.id, "Art").await;
    let pin = seed_pin(db.pool(), &owner.id, &board.id, "Sunset").await;

    interactions::like(db.pool(), &fan.id, &pin.id).await.unwrap();
    db::delete_pin(db.pool(), &owner.id, &pin.id).await.unwrap();

    assert!(db::find_pin(db.pool(), &pin.id).await.unwrap().is_none());
    assert_eq!(require_board(db.pool(), &board.id).await.unwrap().pin_count, 0);

    let orphaned_likes =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pin_likes WHERE pin_id = ?")
            .bind(&pin.id)
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(orphaned_likes, 0);
}

#[tokio::test]
async fn test_owner_can_delete_pin_saved_by_others() {
    let db = TestDatabase::new().await;
    let owner = seed_user(db.pool(), "owner").await;
    let saver = seed_user(db.pool(), "saver").await;
    let board = seed_board(db.pool(), &owner.id, "Art").await;
    let saver_board = seed_board(db.pool(), &saver.id, "Favorites").await;
    let pin = seed_pin(db.pool(), &owner.id, &board.id, "Sunset").await;

    let clone = interactions::save(db.pool(), &saver.id, &pin.id, &saver_board.id)
        .await
        .unwrap();

    db::delete_pin(db.pool(), &owner.id, &pin.id).await.unwrap();

    assert!(db::find_pin(db.pool(), &pin.id).await.unwrap().is_none());
    // The saver's save record goes with the original; their clone is an
    // independent pin and stays.
    assert!(!interactions::is_saved(db.pool(), &saver.id, &pin.id).await.unwrap());
    assert!(db::find_pin(db.pool(), &clone.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_pin_requires_edit_permission() {
    let db = TestDatabase::new().await;
    let owner = seed_user(db.pool(), "owner").await;
    let outsider = seed_user(db.pool(), "outsider").await;
    let board = seed_board(db.pool(), &owner.id, "Art").await;
    let pin = seed_pin(db.pool(), &owner.id, &board.id, "Sunset").await;

    let result = db::delete_pin(db.pool(), &outsider.id, &pin.id).await;
    assert_matches!(result, Err(BackendError::Unauthorized { .. }));
    assert!(db::find_pin(db.pool(), &pin.id).await.unwrap().is_some());
}
