//! Router assembly and HTTP middleware.

use super::error::ServeError;
use super::handlers::{
    activity_log, create_task, delete_task, get_task, health, list_tasks, move_task, not_found,
    update_task,
};
use crate::activity::ports::ActivityRepository;
use crate::task::{ports::TaskRepository, services::TaskBoardService};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, patch};
use mockable::Clock;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the task board router over `service`.
pub fn router<R, A, C>(service: Arc<TaskBoardService<R, A, C>>) -> Router
where
    R: TaskRepository + 'static,
    A: ActivityRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/tasks",
            get(list_tasks::<R, A, C>).post(create_task::<R, A, C>),
        )
        .route("/api/tasks/activity/log", get(activity_log::<R, A, C>))
        .route(
            "/api/tasks/{id}",
            get(get_task::<R, A, C>)
                .put(update_task::<R, A, C>)
                .delete(delete_task::<R, A, C>),
        )
        .route("/api/tasks/{id}/move", patch(move_task::<R, A, C>))
        .fallback(not_found)
        .with_state(service)
}

/// Wraps `app` with request tracing and a CORS policy for `frontend_origin`.
///
/// # Errors
///
/// Returns [`ServeError::InvalidOrigin`] when the origin is not a valid
/// header value.
pub fn with_middleware(app: Router, frontend_origin: &str) -> Result<Router, ServeError> {
    let origin =
        HeaderValue::from_str(frontend_origin).map_err(|source| ServeError::InvalidOrigin {
            origin: frontend_origin.to_owned(),
            source,
        })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(app.layer(cors).layer(TraceLayer::new_for_http()))
}
