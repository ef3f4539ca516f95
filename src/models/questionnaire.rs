use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Activation of a questionnaire template inside one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireInstance {
    pub id: i64,
    pub title: String,
    pub questionnaire_id: i64,
    pub session_id: i64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub questionnaire_title: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInstance {
    pub title: String,
    pub questionnaire_id: i64,
    pub session_id: i64,
    #[serde(default)]
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_listing_tolerates_missing_optionals() {
        let raw = r#"[{"id":1,"title":"Pre-Test","questionnaire_id":4,"session_id":12}]"#;
        let instances: Vec<QuestionnaireInstance> = serde_json::from_str(raw).unwrap();
        assert!(!instances[0].is_active);
        assert_eq!(instances[0].questionnaire_title, None);
    }
}
