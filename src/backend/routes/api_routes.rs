/**
 * API Route Handlers
 *
 * Wires the authenticated API surface onto the per-module handlers.
 *
 * # Routes
 *
 * ## Social Graph
 * - `POST /api/blocks` / `DELETE /api/blocks/{user_id}` /
 *   `GET /api/blocks/{user_id}`
 * - `POST /api/follows` / `DELETE /api/follows/{user_id}` /
 *   `GET /api/follows/{user_id}`
 * - `GET /api/users/{user_id}/follow-stats`
 *
 * ## Boards & Collaboration
 * - `POST /api/boards` / `GET /api/boards/{board_id}`
 * - `GET /api/boards/{board_id}/access`
 * - `GET /api/boards/{board_id}/collaborators`
 * - `POST /api/invitations`, `POST /api/invitations/{id}/respond`,
 *   `DELETE /api/invitations/{id}`, `GET /api/invitations/{id}`,
 *   `GET /api/invitations/received`, `GET /api/invitations/sent`
 *
 * ## Pins & Interactions
 * - `POST /api/pins`, `GET/PATCH/DELETE /api/pins/{pin_id}`
 * - `POST/DELETE/GET /api/pins/{pin_id}/like`
 * - `POST/DELETE/GET /api/pins/{pin_id}/save`
 *
 * ## Notifications
 * - `GET /api/notifications`, `GET /api/notifications/unread-count`,
 *   `POST /api/notifications/{id}/read`, `POST /api/notifications/read-all`,
 *   `DELETE /api/notifications/{id}`
 */

use axum::Router;

use crate::backend::boards::handlers as board_handlers;
use crate::backend::notifications::handlers as notification_handlers;
use crate::backend::pins::handlers as pin_handlers;
use crate::backend::server::state::AppState;
use crate::backend::social::handlers as social_handlers;
use crate::backend::users::handlers as user_handlers;

/// Configure the authenticated API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // User lookup
        .route(
            "/api/users/{user_id}",
            axum::routing::get(user_handlers::get_user),
        )
        // Block registry
        .route("/api/blocks", axum::routing::post(social_handlers::block_user))
        .route(
            "/api/blocks/{user_id}",
            axum::routing::delete(social_handlers::unblock_user)
                .get(social_handlers::block_status),
        )
        // Follow graph
        .route("/api/follows", axum::routing::post(social_handlers::follow_user))
        .route(
            "/api/follows/{user_id}",
            axum::routing::delete(social_handlers::unfollow_user)
                .get(social_handlers::follow_status),
        )
        .route(
            "/api/users/{user_id}/follow-stats",
            axum::routing::get(social_handlers::follow_stats),
        )
        // Boards
        .route("/api/boards", axum::routing::post(board_handlers::create_board))
        .route(
            "/api/boards/{board_id}",
            axum::routing::get(board_handlers::get_board),
        )
        .route(
            "/api/boards/{board_id}/access",
            axum::routing::get(board_handlers::board_access),
        )
        .route(
            "/api/boards/{board_id}/collaborators",
            axum::routing::get(board_handlers::board_collaborators),
        )
        // Invitations
        .route(
            "/api/invitations",
            axum::routing::post(board_handlers::send_invitation),
        )
        .route(
            "/api/invitations/received",
            axum::routing::get(board_handlers::list_received),
        )
        .route(
            "/api/invitations/sent",
            axum::routing::get(board_handlers::list_sent),
        )
        .route(
            "/api/invitations/{invitation_id}",
            axum::routing::get(board_handlers::get_invitation)
                .delete(board_handlers::cancel_invitation),
        )
        .route(
            "/api/invitations/{invitation_id}/respond",
            axum::routing::post(board_handlers::respond_to_invitation),
        )
        // Pins
        .route("/api/pins", axum::routing::post(pin_handlers::create_pin))
        .route(
            "/api/pins/{pin_id}",
            axum::routing::get(pin_handlers::get_pin)
                .patch(pin_handlers::update_pin)
                .delete(pin_handlers::delete_pin),
        )
        // Pin interactions
        .route(
            "/api/pins/{pin_id}/like",
            axum::routing::post(pin_handlers::like_pin)
                .delete(pin_handlers::unlike_pin)
                .get(pin_handlers::like_status),
        )
        .route(
            "/api/pins/{pin_id}/save",
            axum::routing::post(pin_handlers::save_pin)
                .delete(pin_handlers::unsave_pin)
                .get(pin_handlers::save_status),
        )
        // Notifications
        .route(
            "/api/notifications",
            axum::routing::get(notification_handlers::list_notifications),
        )
        .route(
            "/api/notifications/unread-count",
            axum::routing::get(notification_handlers::unread_count),
        )
        .route(
            "/api/notifications/read-all",
            axum::routing::post(notification_handlers::mark_all_read),
        )
        .route(
            "/api/notifications/{notification_id}",
            axum::routing::delete(notification_handlers::delete_notification),
        )
        .route(
            "/api/notifications/{notification_id}/read",
            axum::routing::post(notification_handlers::mark_read),
        )
}
