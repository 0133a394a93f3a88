//! Route definitions for the Storefront HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. Protected
//! groups carry the authorization gate as a group-level route layer; each
//! route that needs a permission adds its own gate on top.

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::{MethodRouter, delete, get, patch, post, put};

use crate::handlers;
use crate::middleware;
use crate::middleware::rbac::PermissionGate;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(session_routes())
        .merge(user_routes(&state))
        .merge(role_routes(&state))
        .merge(permission_routes(&state))
        .merge(product_routes(&state))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let api_routes = Router::new()
        .merge(public_routes())
        .merge(protected);

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Route requiring `permission`.
fn gated(
    route: MethodRouter<AppState>,
    state: &AppState,
    permission: &'static str,
) -> MethodRouter<AppState> {
    route.route_layer(axum_middleware::from_fn_with_state(
        PermissionGate::new(state, permission),
        middleware::rbac::require_permission,
    ))
}

/// Route open to the owner of `{id}`, or to holders of `permission`.
fn owner_or_gated(
    route: MethodRouter<AppState>,
    state: &AppState,
    permission: &'static str,
) -> MethodRouter<AppState> {
    route.route_layer(axum_middleware::from_fn_with_state(
        PermissionGate::new(state, permission),
        middleware::rbac::require_owner_or_permission,
    ))
}

/// Unauthenticated endpoints
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// Endpoints acting on the caller's own session
fn session_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auth/change-password",
            put(handlers::auth::change_password),
        )
        .route("/users/me", get(handlers::user::me))
}

/// User administration
fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            gated(get(handlers::user::list_users), state, "users:read"),
        )
        .route(
            "/users/{id}",
            gated(get(handlers::user::get_user), state, "users:read")
                .merge(owner_or_gated(
                    put(handlers::user::update_user),
                    state,
                    "users:update",
                ))
                .merge(owner_or_gated(
                    delete(handlers::user::delete_user),
                    state,
                    "users:delete",
                )),
        )
        .route(
            "/users/{id}/role",
            gated(
                patch(handlers::user::update_user_role),
                state,
                "users:update",
            ),
        )
}

/// Role administration
fn role_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/roles",
            gated(get(handlers::role::list_roles), state, "roles:read").merge(gated(
                post(handlers::role::create_role),
                state,
                "roles:create",
            )),
        )
        .route(
            "/roles/{id}",
            gated(get(handlers::role::get_role), state, "roles:read")
                .merge(gated(
                    put(handlers::role::update_role),
                    state,
                    "roles:update",
                ))
                .merge(gated(
                    delete(handlers::role::delete_role),
                    state,
                    "roles:delete",
                )),
        )
        .route(
            "/roles/{id}/permissions",
            gated(
                put(handlers::role::assign_permissions),
                state,
                "roles:update",
            )
            .merge(gated(
                delete(handlers::role::unassign_permissions),
                state,
                "roles:delete",
            )),
        )
}

/// Permission administration
fn permission_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/permissions",
            gated(
                get(handlers::permission::list_permissions),
                state,
                "permissions:read",
            )
            .merge(gated(
                post(handlers::permission::create_permission),
                state,
                "permissions:create",
            )),
        )
        .route(
            "/permissions/{id}",
            gated(
                get(handlers::permission::get_permission),
                state,
                "permissions:read",
            )
            .merge(gated(
                put(handlers::permission::update_permission),
                state,
                "permissions:update",
            ))
            .merge(gated(
                delete(handlers::permission::delete_permission),
                state,
                "permissions:delete",
            )),
        )
}

/// Product catalog
fn product_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::product::list_products).merge(gated(
                post(handlers::product::create_product),
                state,
                "products:create",
            )),
        )
        .route(
            "/products/{id}",
            get(handlers::product::get_product)
                .merge(gated(
                    put(handlers::product::update_product),
                    state,
                    "products:update",
                ))
                .merge(gated(
                    delete(handlers::product::delete_product),
                    state,
                    "products:delete",
                )),
        )
}
