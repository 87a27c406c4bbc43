/**
 * API Routes
 *
 * This module wires handlers to paths.
 *
 * # Routes
 *
 * ## Authentication (public unless noted)
 * - `POST /auth/register`
 * - `POST /auth/login`
 * - `POST /auth/logout` - requires bearer token
 * - `POST /auth/refresh-token`
 *
 * ## Resources (all require bearer token)
 * - `/user`, `/user/{id}`
 * - `/post`, `/post/{id}`
 * - `/comment/{postId}/comment`, `/comment/{postId}/comment/{commentId}`
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{login, logout, refresh_token, register};
use crate::backend::comments::handlers as comments;
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::posts::handlers as posts;
use crate::backend::server::state::AppState;
use crate::backend::users::handlers as users;

/// Configure `/auth` routes
///
/// Only logout sits behind the auth middleware.
pub fn configure_auth_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/auth/logout", post(logout))
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh-token", post(refresh_token))
        .merge(protected)
}

/// Configure `/user`, `/post` and `/comment` routes, all behind the auth
/// middleware
pub fn configure_resource_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let resources = Router::new()
        .route("/user", get(users::list_users))
        .route(
            "/user/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/post", get(posts::list_posts).post(posts::create_post))
        .route(
            "/post/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/comment/{post_id}/comment",
            get(comments::list_comments)
                .post(comments::create_comment)
                .delete(comments::delete_all_comments),
        )
        .route(
            "/comment/{post_id}/comment/{comment_id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router.merge(resources)
}
