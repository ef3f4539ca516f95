#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Response, StatusCode};
use chrono::NaiveDate;
use serde_json::Value;

use portal::backend::{Backend, BackendReply, BackendRequest};
use portal::client::{ClientError, PortalApi};
use portal::error::AppError;
use portal::models::{Enrollment, NewSession, Role, Session, SessionUpdate, SignupRequest, User};

pub enum Scripted {
    Reply(StatusCode, Value),
    Unreachable,
}

/// Backend double that records every request and answers from a script.
#[derive(Default)]
pub struct MockBackend {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<BackendRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: StatusCode, body: Value) -> Self {
        self.script.lock().unwrap().push_back(Scripted::Reply(status, body));
        self
    }

    pub fn unreachable(self) -> Self {
        self.script.lock().unwrap().push_back(Scripted::Unreachable);
        self
    }

    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn send(&self, request: BackendRequest) -> Result<BackendReply, AppError> {
        self.requests.lock().unwrap().push(request);
        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Reply(status, body)) => Ok(BackendReply::new(status, body)),
            Some(Scripted::Unreachable) => Err(AppError::Internal("connection refused".into())),
            None => Ok(BackendReply::new(StatusCode::OK, serde_json::json!({}))),
        }
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

pub fn user(id: i64, role: Role) -> User {
    User {
        id,
        email: format!("user{}@example.com", id),
        first_name: "Robin".into(),
        last_name: "Hale".into(),
        role,
        dob: None,
    }
}

pub fn session(id: i64, code: Option<&str>, is_public: bool) -> Session {
    Session {
        id,
        title: "Leadership basics".into(),
        description: "Four week program".into(),
        start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 3, 28).unwrap(),
        trainer_id: 2,
        trainer_name: Some("Jo Park".into()),
        is_public,
        session_code: code.map(str::to_string),
        created_by_id: Some(1),
        created_at: None,
        updated_at: None,
    }
}

pub fn enrollment(session_id: i64, client_id: i64) -> Enrollment {
    Enrollment {
        id: 90,
        client_id,
        session_id,
        enrolled_at: None,
        status: "active".into(),
        client_name: None,
        session_title: None,
    }
}

pub fn api_error(status: u16, message: &str) -> ClientError {
    ClientError::Api {
        status,
        message: message.to_string(),
    }
}

/// Portal API double: each operation pops its next scripted answer and logs the call.
#[derive(Default)]
pub struct MockPortalApi {
    pub calls: Mutex<Vec<String>>,
    pub login_replies: Mutex<VecDeque<Result<User, ClientError>>>,
    pub validate_replies: Mutex<VecDeque<Result<bool, ClientError>>>,
    pub enroll_replies: Mutex<VecDeque<Result<Enrollment, ClientError>>>,
    pub session_replies: Mutex<VecDeque<Result<Session, ClientError>>>,
    pub update_replies: Mutex<VecDeque<Result<Session, ClientError>>>,
    pub code_replies: Mutex<VecDeque<Result<Session, ClientError>>>,
    pub create_replies: Mutex<VecDeque<Result<Session, ClientError>>>,
}

impl MockPortalApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn next<T>(queue: &Mutex<VecDeque<Result<T, ClientError>>>) -> Result<T, ClientError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted reply".into())))
    }
}

#[async_trait]
impl PortalApi for MockPortalApi {
    async fn login(&self, email: &str, _password: &str) -> Result<User, ClientError> {
        self.log(format!("login {}", email));
        Self::next(&self.login_replies)
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.log("logout".into());
        Ok(())
    }

    async fn validate(&self) -> Result<bool, ClientError> {
        self.log("validate".into());
        Self::next(&self.validate_replies)
    }

    async fn signup(&self, request: &SignupRequest) -> Result<(), ClientError> {
        self.log(format!("signup {}", request.email));
        Ok(())
    }

    async fn enroll_by_code(&self, code: &str) -> Result<Enrollment, ClientError> {
        self.log(format!("enroll {}", code));
        Self::next(&self.enroll_replies)
    }

    async fn get_session(&self, session_id: i64) -> Result<Session, ClientError> {
        self.log(format!("get_session {}", session_id));
        Self::next(&self.session_replies)
    }

    async fn create_session(&self, session: &NewSession) -> Result<Session, ClientError> {
        self.log(format!("create_session {}", session.title));
        Self::next(&self.create_replies)
    }

    async fn update_session(&self, session_id: i64, update: &SessionUpdate) -> Result<Session, ClientError> {
        self.log(format!("update_session {} {:?}", session_id, update.is_public));
        Self::next(&self.update_replies)
    }

    async fn generate_code(&self, session_id: i64) -> Result<Session, ClientError> {
        self.log(format!("generate_code {}", session_id));
        Self::next(&self.code_replies)
    }
}

pub fn push<T>(queue: &Mutex<VecDeque<Result<T, ClientError>>>, reply: Result<T, ClientError>) {
    queue.lock().unwrap().push_back(reply);
}
