//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::kernel::{NotificationHub, ServerDeps};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    accounts, announcements, auth, contributions, dashboard, exports, health_handler, loans,
    meetings, notifications, stream_handler, welfare,
};

/// Meeting-note uploads above this size are rejected
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
    pub jwt_service: Arc<JwtService>,
    /// Source for `/notifications/stream` subscriptions
    pub hub: NotificationHub,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(state: AxumAppState, allowed_origins: &[String]) -> Router {
    let jwt_service_for_middleware = state.jwt_service.clone();
    let pool_for_middleware = state.deps.db_pool.clone();
    let media_root = state.deps.media.root().to_path_buf();

    Router::new()
        .route("/health", get(health_handler))
        .route("/auth/login", post(auth::login_handler))
        // Dashboards
        .route("/member-dashboard", get(dashboard::member_dashboard_handler))
        .route("/committee-dashboard", get(dashboard::committee_dashboard_handler))
        // Loans
        .route("/apply-loan", post(loans::apply_handler))
        .route("/loan/status/{id}/{status}", post(loans::set_status_handler))
        .route("/loan/update/{id}/{status}", post(loans::set_repayment_handler))
        // Contributions
        .route("/contributions", post(contributions::record_handler))
        .route(
            "/contribution/update/{id}/{status}",
            post(contributions::set_status_handler),
        )
        // Welfare
        .route("/welfare", post(welfare::record_handler))
        .route("/welfare/update/{id}/{status}", post(welfare::set_status_handler))
        // Announcements and minutes
        .route("/post-announcement", post(announcements::post_handler))
        .route("/announcements/{id}/", get(announcements::detail_handler))
        .route("/post-minutes", post(meetings::post_handler))
        .route("/minutes/{id}/", get(meetings::detail_handler))
        // Exports
        .route("/export/{dataset}/{format}", get(exports::export_handler))
        // Accounts
        .route("/profile", get(accounts::profile_handler))
        .route("/profile/edit", post(accounts::edit_profile_handler))
        .route("/members", post(accounts::register_member_handler))
        // Notifications
        .route("/notifications", get(notifications::list_handler))
        .route("/notifications/fetch", get(notifications::fetch_handler))
        .route("/notifications/read/{id}", post(notifications::mark_read_handler))
        .route("/notifications/stream", get(stream_handler))
        // Attachments
        .nest_service("/media", ServeDir::new(media_root))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(
                jwt_service_for_middleware.clone(),
                pool_for_middleware.clone(),
                req,
                next,
            )
        })) // JWT authentication
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
