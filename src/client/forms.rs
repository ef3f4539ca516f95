use std::fmt;

use chrono::NaiveDate;

use crate::client::api::{ClientError, PortalApi};
use crate::models::{NewInstance, NewSession, Session, SignupRequest};

pub const END_BEFORE_START: &str = "End date must be after start date";

/// Per-field messages, in the order the fields appear on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: Vec<(&'static str, String)>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push((field, message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.fields.iter().map(|(_, m)| m.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Default)]
pub struct SessionForm {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub trainer_id: Option<i64>,
    pub is_public: bool,
}

impl SessionForm {
    pub fn validate(&self) -> Result<NewSession, FormErrors> {
        let mut errors = FormErrors::default();

        if self.title.trim().is_empty() {
            errors.add("title", "Title is required");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "Description is required");
        }
        let start = parse_date(&self.start_date);
        if start.is_none() {
            errors.add("start_date", "Start date is required");
        }
        let end = parse_date(&self.end_date);
        if end.is_none() {
            errors.add("end_date", "End date is required");
        }
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.add("end_date", END_BEFORE_START);
            }
        }
        if self.trainer_id.is_none() {
            errors.add("trainer_id", "Please select a trainer");
        }

        match (start, end, self.trainer_id) {
            (Some(start_date), Some(end_date), Some(trainer_id)) => errors.into_result(|| NewSession {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                start_date,
                end_date,
                trainer_id,
                is_public: self.is_public,
            }),
            _ => Err(errors),
        }
    }

    /// Invalid forms never reach the create endpoint.
    pub async fn submit(&self, api: &dyn PortalApi) -> Result<Session, ClientError> {
        let session = self.validate().map_err(ClientError::Validation)?;
        api.create_session(&session).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
}

pub const MIN_PASSWORD_LENGTH: usize = 8;

impl SignupForm {
    pub fn validate(&self) -> Result<SignupRequest, FormErrors> {
        let mut errors = FormErrors::default();

        if !self.email.contains('@') {
            errors.add("email", "Please enter a valid email address");
        }
        if self.password.len() < MIN_PASSWORD_LENGTH {
            errors.add(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
            );
        }
        if self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords do not match");
        }
        if self.first_name.trim().is_empty() {
            errors.add("first_name", "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.add("last_name", "Last name is required");
        }
        let dob = if self.dob.trim().is_empty() {
            None
        } else {
            let parsed = parse_date(&self.dob);
            if parsed.is_none() {
                errors.add("dob", "Date of birth must be YYYY-MM-DD");
            }
            parsed
        };

        errors.into_result(|| SignupRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            dob,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct InstanceForm {
    pub title: String,
    pub questionnaire_id: Option<i64>,
    pub is_active: bool,
}

impl InstanceForm {
    pub fn validate(&self, session_id: i64) -> Result<NewInstance, FormErrors> {
        let mut errors = FormErrors::default();
        if self.title.trim().is_empty() {
            errors.add("title", "Title is required");
        }
        let Some(questionnaire_id) = self.questionnaire_id else {
            errors.add("questionnaire_id", "Please select a questionnaire");
            return Err(errors);
        };
        errors.into_result(|| NewInstance {
            title: self.title.trim().to_string(),
            questionnaire_id,
            session_id,
            is_active: self.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_form(start: &str, end: &str) -> SessionForm {
        SessionForm {
            title: "Spring intake".into(),
            description: "Two week onboarding".into(),
            start_date: start.into(),
            end_date: end.into(),
            trainer_id: Some(4),
            is_public: true,
        }
    }

    #[test]
    fn end_before_start_is_rejected() {
        let errors = session_form("2025-01-10", "2025-01-09").validate().unwrap_err();
        assert_eq!(errors.get("end_date"), Some(END_BEFORE_START));
    }

    #[test]
    fn same_day_is_rejected() {
        let errors = session_form("2025-01-10", "2025-01-10").validate().unwrap_err();
        assert_eq!(errors.get("end_date"), Some(END_BEFORE_START));
    }

    #[test]
    fn valid_session_form_builds_request() {
        let session = session_form("2025-01-10", "2025-01-20").validate().unwrap();
        assert_eq!(session.trainer_id, 4);
        assert_eq!(session.start_date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
    }

    #[test]
    fn missing_trainer_and_title_reported_together() {
        let form = SessionForm {
            title: "  ".into(),
            trainer_id: None,
            ..session_form("2025-01-10", "2025-01-20")
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("title").is_some());
        assert!(errors.get("trainer_id").is_some());
        assert!(errors.get("end_date").is_none());
    }

    #[test]
    fn signup_checks_password_confirmation() {
        let form = SignupForm {
            email: "sam@example.com".into(),
            password: "longenough".into(),
            confirm_password: "different1".into(),
            first_name: "Sam".into(),
            last_name: "Reed".into(),
            dob: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
    }

    #[test]
    fn instance_form_requires_questionnaire() {
        let form = InstanceForm {
            title: "Pre-Test".into(),
            questionnaire_id: None,
            is_active: false,
        };
        assert!(form.validate(7).unwrap_err().get("questionnaire_id").is_some());
    }
}
