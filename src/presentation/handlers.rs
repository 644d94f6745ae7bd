// HTTP request handlers
use crate::application::data_manager::NewRoyaltyRecord;
use crate::domain::contract::ContractInput;
use crate::domain::royalty::RoyaltyInput;
use crate::infrastructure::http_response::ApiError;
use crate::presentation::app_state::AppState;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    fn require(self) -> Result<(String, String), ApiError> {
        match (self.username, self.password) {
            (Some(u), Some(p)) if !u.trim().is_empty() && !p.trim().is_empty() => {
                Ok((u.trim().to_string(), p.trim().to_string()))
            }
            _ => Err(ApiError::BadRequest(
                "Username and password are required".to_string(),
            )),
        }
    }
}

pub async fn root() -> &'static str {
    "Mining Royalties Manager backend is running!"
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Backend login against the users table.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let (username, password) = request.require()?;
    match state.repository.find_user(&username, &password).await? {
        Some(user) => Ok(Json(json!({ "message": "Login successful", "user": user }))),
        None => Err(ApiError::Unauthorized("Invalid credentials".to_string())),
    }
}

pub async fn list_royalties(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let royalties = state.repository.list_royalties().await?;
    Ok(Json(json!(royalties)))
}

pub async fn create_royalty(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RoyaltyInput>,
) -> Result<Json<Value>, ApiError> {
    let royalty = state.repository.insert_royalty(&input).await?;
    Ok(Json(json!(royalty)))
}

pub async fn update_royalty(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<RoyaltyInput>,
) -> Result<Json<Value>, ApiError> {
    match state.repository.update_royalty(id, &input).await? {
        Some(royalty) => Ok(Json(json!(royalty))),
        None => Err(ApiError::NotFound(format!("royalty {} not found", id))),
    }
}

pub async fn delete_royalty(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if state.repository.delete_royalty(id).await? {
        Ok(Json(json!({ "message": "Royalty deleted" })))
    } else {
        Err(ApiError::NotFound(format!("royalty {} not found", id)))
    }
}

pub async fn list_contracts(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let contracts = state.repository.list_contracts().await?;
    Ok(Json(json!(contracts)))
}

pub async fn create_contract(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ContractInput>,
) -> Result<Json<Value>, ApiError> {
    let contract = state.repository.insert_contract(&input).await?;
    Ok(Json(json!(contract)))
}

pub async fn update_contract(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<ContractInput>,
) -> Result<Json<Value>, ApiError> {
    match state.repository.update_contract(id, &input).await? {
        Some(contract) => Ok(Json(json!(contract))),
        None => Err(ApiError::NotFound(format!("contract {} not found", id))),
    }
}

pub async fn delete_contract(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if state.repository.delete_contract(id).await? {
        Ok(Json(json!({ "message": "Contract deleted" })))
    } else {
        Err(ApiError::NotFound(format!("contract {} not found", id)))
    }
}

/// Serve a section fragment from the local fragment directory.
pub async fn get_component(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ApiError::BadRequest(format!("invalid component id '{}'", id)));
    }

    let path = std::path::Path::new(&state.fragment_dir).join(format!("{}.html", id));
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Ok(Html(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ApiError::NotFound(format!("component '{}' not found", id)))
        }
        Err(e) => Err(ApiError::Backend(e.into())),
    }
}

/// Shell login against the fixed credential list.
pub async fn app_login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let (username, password) = request.require()?;
    let user = state.auth_service.authenticate(&username, &password)?;
    Ok(Json(json!({ "message": "Login successful", "user": user })))
}

pub async fn app_logout(State(state): State<Arc<AppState>>) -> Json<Value> {
    match state.auth_service.logout() {
        Some(user) => Json(json!({ "message": format!("Goodbye, {}", user.username) })),
        None => Json(json!({ "message": "No active session" })),
    }
}

pub async fn list_sections(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "current": state.navigation.current().await,
        "sections": state.navigation.sections(),
    }))
}

/// Perform a section transition and return what the client should render.
pub async fn navigate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.auth_service.is_authenticated() {
        return Err(ApiError::Unauthorized("Login required".to_string()));
    }

    let outcome = state.navigation.navigate(&id).await?;
    Ok(Json(json!(outcome)))
}

/// Drop one section's cached fragment so its next navigation refetches.
pub async fn invalidate_section(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.auth_service.is_authenticated() {
        return Err(ApiError::Unauthorized("Login required".to_string()));
    }

    state.navigation.invalidate(&id).await;
    Ok(Json(json!({ "message": format!("Cache cleared for '{}'", id) })))
}

/// Drop every cached fragment.
pub async fn invalidate_cache(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    if !state.auth_service.is_authenticated() {
        return Err(ApiError::Unauthorized("Login required".to_string()));
    }

    state.navigation.invalidate_all().await;
    Ok(Json(json!({ "message": "Cache cleared" })))
}

/// Append a dashboard royalty record and return it with the computed amount.
pub async fn submit_royalty_record(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewRoyaltyRecord>,
) -> Result<Json<Value>, ApiError> {
    if !state.auth_service.is_authenticated() {
        return Err(ApiError::Unauthorized("Login required".to_string()));
    }
    if input.volume <= 0.0 || input.tariff < 0.0 {
        return Err(ApiError::BadRequest(
            "Volume must be positive and tariff non-negative".to_string(),
        ));
    }

    let record = state.data_manager.add_record(input);
    Ok(Json(json!(record)))
}

/// Dashboard records as the charts see them.
pub async fn list_royalty_records(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!(state.data_manager.records()))
}
