use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub client_id: i64,
    pub session_id: i64,
    #[serde(default)]
    pub enrolled_at: Option<NaiveDateTime>,
    /// active, completed or dropped
    pub status: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub session_title: Option<String>,
}
