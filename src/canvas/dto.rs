use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{ListedCourse, RejectedCourse, SourceCourse};

/// The subset of `GET /users/{id}` this job reads.
#[derive(Debug, Deserialize)]
pub struct CanvasUser {
    pub id: u64,
    #[serde(default)]
    pub sis_user_id: Option<String>,
}

impl CanvasUser {
    /// The user's SIS id; blank counts as missing.
    pub fn sis_id(self) -> Result<String, AppError> {
        self.sis_user_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(AppError::MissingIdentity(self.id))
    }
}

/// Reads a `GET /users/{id}` response down to the user's SIS id.
pub fn read_user(user_id: u64, status: StatusCode, body: &str) -> Result<String, AppError> {
    if !status.is_success() {
        return Err(AppError::Transport {
            status,
            body: body.to_string(),
        });
    }

    let user: CanvasUser = serde_json::from_str(body)
        .map_err(|e| AppError::MalformedResponse(format!("Canvas user {}: {}", user_id, e)))?;
    user.sis_id()
}

/// Reads one entry of a course page, keeping the best code available when it is unreadable.
pub fn parse_course(value: serde_json::Value) -> ListedCourse {
    let code = value
        .get("sis_course_id")
        .and_then(|v| v.as_str())
        .filter(|code| !code.trim().is_empty())
        .map(str::to_string)
        .or_else(|| value.get("id").map(|id| format!("canvas:{}", id)))
        .unwrap_or_else(|| "canvas:unknown".to_string());

    serde_json::from_value::<SourceCourse>(value).map_err(|e| RejectedCourse {
        code,
        error: AppError::MalformedResponse(format!("Canvas course: {}", e)),
    })
}
