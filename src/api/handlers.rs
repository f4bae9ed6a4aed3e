//! Request handlers translating HTTP payloads into service calls.

use super::error::ApiError;
use crate::activity::{domain::ActivityRecord, ports::ActivityRepository};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
    services::{
        CreateTaskRequest, DEFAULT_ACTIVITY_LIMIT, MoveTaskRequest, TaskBoardService,
        UpdateTaskRequest,
    },
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared handler state.
pub type BoardState<R, A, C> = Arc<TaskBoardService<R, A, C>>;

/// Successful response envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    success: bool,
    data: T,
}

impl<T> Envelope<T> {
    const fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskBody {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskBody {
    title: Option<String>,
    description: Option<String>,
}

/// Loosely typed so that each field gets its own validation message.
#[derive(Debug, Default, Deserialize)]
pub struct MoveTaskBody {
    status: Option<Value>,
    position: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivityLogQuery {
    limit: Option<String>,
}

/// Unwraps a JSON body, turning axum's plain-text rejection into a 400 envelope.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(value) = payload?;
    Ok(value)
}

fn move_status(raw: Option<Value>) -> Result<String, ApiError> {
    match raw {
        None | Some(Value::Null) => Err(ApiError::BadRequest("Status is required")),
        Some(Value::String(text)) if text.is_empty() => {
            Err(ApiError::BadRequest("Status is required"))
        }
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(ApiError::BadRequest("Invalid status")),
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::MalformedTaskId(raw.to_owned()))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "Server is running" }))
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": "Route not found" })),
    )
}

pub async fn list_tasks<R, A, C>(
    State(service): State<BoardState<R, A, C>>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Envelope<Vec<Task>>>, ApiError>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    let tasks = service.list_tasks(query.status.as_deref()).await?;
    Ok(Envelope::ok(tasks))
}

pub async fn create_task<R, A, C>(
    State(service): State<BoardState<R, A, C>>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Task>>), ApiError>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    let CreateTaskBody {
        title,
        description,
        status,
    } = json_body(payload)?;
    let mut request = CreateTaskRequest::new(title.unwrap_or_default());
    if let Some(text) = description {
        request = request.with_description(text);
    }
    if let Some(column) = status {
        request = request.with_status(column);
    }
    let task = service.create_task(request).await?;
    Ok((StatusCode::CREATED, Envelope::ok(task)))
}

pub async fn get_task<R, A, C>(
    State(service): State<BoardState<R, A, C>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Task>>, ApiError>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    let task_id = parse_task_id(&id)?;
    let task = service.get_task(task_id).await?;
    Ok(Envelope::ok(task))
}

pub async fn update_task<R, A, C>(
    State(service): State<BoardState<R, A, C>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<Envelope<Task>>, ApiError>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    let task_id = parse_task_id(&id)?;
    let body = json_body(payload)?;
    let mut request = UpdateTaskRequest::new(task_id);
    if let Some(text) = body.title {
        request = request.with_title(text);
    }
    if let Some(text) = body.description {
        request = request.with_description(text);
    }
    let task = service.update_task(request).await?;
    Ok(Envelope::ok(task))
}

pub async fn move_task<R, A, C>(
    State(service): State<BoardState<R, A, C>>,
    Path(id): Path<String>,
    payload: Result<Json<MoveTaskBody>, JsonRejection>,
) -> Result<Json<Envelope<Task>>, ApiError>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    let task_id = parse_task_id(&id)?;
    let body = json_body(payload)?;
    let status = move_status(body.status)?;
    let position = body
        .position
        .as_ref()
        .and_then(Value::as_i64)
        .ok_or(ApiError::BadRequest("Valid position is required"))?;

    let task = service
        .move_task(MoveTaskRequest::new(task_id, status, position))
        .await?;
    Ok(Envelope::ok(task))
}

pub async fn delete_task<R, A, C>(
    State(service): State<BoardState<R, A, C>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    let task_id = parse_task_id(&id)?;
    service.delete_task(task_id).await?;
    Ok(Json(json!({ "success": true, "message": "Task deleted" })))
}

pub async fn activity_log<R, A, C>(
    State(service): State<BoardState<R, A, C>>,
    Query(query): Query<ActivityLogQuery>,
) -> Result<Json<Envelope<Vec<ActivityRecord>>>, ApiError>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    let limit = match query.limit.as_deref() {
        None => DEFAULT_ACTIVITY_LIMIT,
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ApiError::BadRequest("limit must be a non-negative integer"))?,
    };
    let records = service.activity_log(limit).await;
    Ok(Envelope::ok(records))
}
