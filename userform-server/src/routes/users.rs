//! Submission endpoints: create, list, delete, update
//!
//! Request bodies keep the original form field names (`userFirstName`
//! and friends) so existing clients keep working unchanged.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use userform_core::{RawUser, UserPatch};

use crate::error::ApiError;
use crate::server::AppState;

/// Age arrives as a JSON number from some clients and a string from
/// others; both validate as a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AgeInput {
    Number(i64),
    Text(String),
}

impl AgeInput {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// POST /api/submit body. Missing fields fall through to validation
/// as empty values rather than failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    #[serde(rename = "userFirstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "userLastName", default)]
    pub last_name: Option<String>,
    #[serde(rename = "userEmail", default)]
    pub email: Option<String>,
    #[serde(rename = "userAge", default)]
    pub age: Option<AgeInput>,
    #[serde(rename = "userEducation", default)]
    pub education: Option<String>,
}

impl SubmitRequest {
    fn into_raw(self) -> RawUser {
        RawUser {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            age: self.age.map(AgeInput::into_string).unwrap_or_default(),
            education: self.education.unwrap_or_default(),
        }
    }
}

/// PUT /api/submissions/{id} body. Absent or empty fields keep the
/// stored values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    #[serde(rename = "userFirstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "userLastName", default)]
    pub last_name: Option<String>,
    #[serde(rename = "userEmail", default)]
    pub email: Option<String>,
    #[serde(rename = "userAge", default)]
    pub age: Option<AgeInput>,
    #[serde(rename = "userEducation", default)]
    pub education: Option<String>,
}

impl UpdateRequest {
    fn into_patch(self) -> UserPatch {
        UserPatch {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            age: self.age.map(AgeInput::into_string),
            education: self.education,
        }
    }
}

/// POST /api/submit - validate and insert a submission
async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<Value>, ApiError> {
    state.service.create(req.into_raw()).await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Form submitted successfully!"
    })))
}

/// GET /api/submissions - list all submissions ordered by id
async fn list_submissions(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let results = state.service.list().await?;
    Ok(Json(json!({ "status": "success", "results": results })))
}

/// DELETE /api/submissions/{id}
async fn delete_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let first_name = state.service.delete(id).await?;
    let message = match first_name {
        Some(name) => format!("User deleted successfully! Bye {name}"),
        None => "User deleted successfully!".to_owned(),
    };
    Ok(Json(json!({ "status": "success", "message": message })))
}

/// PUT /api/submissions/{id} - partial update with merge-then-validate
async fn update_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Value>, ApiError> {
    state.service.update(id, req.into_patch()).await?;
    Ok(Json(json!({
        "status": "success",
        "message": "User updated successfully!"
    })))
}

/// Submission routes under /api
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/submit", post(submit))
        .route("/api/submissions", get(list_submissions))
        .route(
            "/api/submissions/{id}",
            delete(delete_submission).put(update_submission),
        )
}
