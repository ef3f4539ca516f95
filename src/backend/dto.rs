use serde::{Deserialize, Serialize};

use crate::models::User;

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Serialize)]
pub struct EnrollClientRequest {
    pub client_id: i64,
    pub session_id: i64,
    pub status: String,
}

impl EnrollClientRequest {
    pub fn active(session_id: i64, client_id: i64) -> Self {
        Self {
            client_id,
            session_id,
            status: "active".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateInstanceRequest {
    pub title: String,
    pub questionnaire_id: i64,
    pub session_id: i64,
    pub is_active: bool,
}
