use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post};
use fintrack_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;
mod public_auth;

use cors::build_cors_layer;
use public_auth::build_public_auth_routes;

pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/categories",
            get(handlers::categories::list_categories_handler)
                .post(handlers::categories::create_category_handler),
        )
        .route(
            "/api/categories/{category_id}",
            delete(handlers::categories::delete_category_handler),
        )
        .route(
            "/api/transactions",
            get(handlers::transactions::list_transactions_handler)
                .post(handlers::transactions::create_transaction_handler),
        )
        .route(
            "/api/transactions/{transaction_id}",
            get(handlers::transactions::get_transaction_handler)
                .put(handlers::transactions::update_transaction_handler)
                .delete(handlers::transactions::delete_transaction_handler),
        )
        .route(
            "/api/goals",
            get(handlers::goals::list_goals_handler).post(handlers::goals::create_goal_handler),
        )
        .route(
            "/api/goals/{goal_id}",
            get(handlers::goals::get_goal_handler).put(handlers::goals::update_goal_handler),
        )
        .route(
            "/api/goals/{goal_id}/priority",
            post(handlers::goals::set_goal_priority_handler),
        )
        .route(
            "/api/goals/{goal_id}/archive",
            post(handlers::goals::archive_goal_handler),
        )
        .route(
            "/api/goals/{goal_id}/events",
            get(handlers::goals::list_goal_events_handler)
                .post(handlers::goals::record_goal_event_handler),
        )
        .route(
            "/api/metrics/monthly",
            get(handlers::metrics::monthly_metrics_handler),
        )
        .route(
            "/api/metrics/categories",
            get(handlers::metrics::category_breakdown_handler),
        )
        .route(
            "/api/audit-log",
            get(handlers::audit::list_audit_log_handler),
        )
        .route("/auth/me", get(auth::me_handler))
        .route_layer(from_fn(middleware::require_auth));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(build_public_auth_routes())
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(from_fn(middleware::normalize_error_response))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .layer(session_layer)
        .with_state(app_state))
}
