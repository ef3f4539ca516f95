use std::sync::Arc;

use tracing::{info, warn};

use crate::client::api::PortalApi;
use crate::client::auth_store::AuthPhase;
use crate::client::guard::login_location;
use crate::client::storage::{LocalStorage, PENDING_CODE_KEY};
use crate::models::Session;

pub const ENROLL_PATH: &str = "/enroll";
pub const MISSING_CODE: &str = "No session code provided";

/// Shown while auth re-resolves after an attempt; the settled outcome stays in `view`.
static LOADING: EnrollmentView = EnrollmentView::Loading;

#[derive(Debug, Clone, PartialEq)]
pub enum EnrollmentView {
    Loading,
    RedirectToLogin { location: String },
    Success {
        /// Detail fetched after enrolling; `None` when that second call failed.
        session: Option<Session>,
        already_enrolled: bool,
    },
    Error(String),
}

/// Drives the enrollment page: waits for auth, redirects anonymous visitors,
/// and redeems a code once per code value.
pub struct EnrollmentController {
    api: Arc<dyn PortalApi>,
    storage: Arc<dyn LocalStorage>,
    code: Option<String>,
    attempted: Option<String>,
    view: EnrollmentView,
}

impl EnrollmentController {
    /// Falls back to a code parked before a login redirect when the URL has none.
    pub fn new(api: Arc<dyn PortalApi>, storage: Arc<dyn LocalStorage>, url_code: Option<String>) -> Self {
        let code = url_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .or_else(|| storage.get(PENDING_CODE_KEY));
        Self {
            api,
            storage,
            code,
            attempted: None,
            view: EnrollmentView::Loading,
        }
    }

    /// Extracts `code` from a raw query string such as `code=abc&x=1`.
    pub fn code_from_query(query: &str) -> Option<String> {
        url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .find(|(key, _)| key == "code")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }

    pub fn view(&self) -> &EnrollmentView {
        &self.view
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The address bar: the code is stripped once enrollment succeeded.
    pub fn location(&self) -> String {
        match (&self.view, &self.code) {
            (EnrollmentView::Success { .. }, _) | (_, None) => ENROLL_PATH.to_string(),
            (_, Some(code)) => {
                let encoded: String = url::form_urlencoded::byte_serialize(code.as_bytes()).collect();
                format!("{}?code={}", ENROLL_PATH, encoded)
            }
        }
    }

    /// Re-run on every render with the current auth phase. `view()` keeps the
    /// last settled outcome across later loading passes.
    pub async fn drive(&mut self, phase: &AuthPhase) -> &EnrollmentView {
        if phase.is_loading() {
            if self.attempted.is_some() {
                return &LOADING;
            }
            self.view = EnrollmentView::Loading;
            return &self.view;
        }

        if phase.user().is_none() {
            if let Some(code) = &self.code {
                self.storage.set(PENDING_CODE_KEY, code);
            }
            self.view = EnrollmentView::RedirectToLogin {
                location: login_location(&self.location()),
            };
            return &self.view;
        }

        let Some(code) = self.code.clone() else {
            self.view = EnrollmentView::Error(MISSING_CODE.to_string());
            return &self.view;
        };

        if self.attempted.as_deref() == Some(code.as_str()) {
            return &self.view;
        }
        self.attempted = Some(code.clone());
        self.view = EnrollmentView::Loading;

        let (session_id, already_enrolled) = match self.api.enroll_by_code(&code).await {
            Ok(enrollment) => {
                info!("enrolled in session {}", enrollment.session_id);
                (Some(enrollment.session_id), false)
            }
            Err(e) if e.is_already_enrolled() => {
                info!("already enrolled with code {}", code);
                (None, true)
            }
            Err(e) => {
                warn!("enrollment with code {} failed: {}", code, e);
                self.view = EnrollmentView::Error(e.to_string());
                return &self.view;
            }
        };

        self.storage.remove(PENDING_CODE_KEY);

        let session = match session_id {
            Some(id) => match self.api.get_session(id).await {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!("enrolled but could not load session {}: {}", id, e);
                    None
                }
            },
            None => None,
        };

        self.view = EnrollmentView::Success {
            session,
            already_enrolled,
        };
        &self.view
    }
}
