use std::sync::Arc;

use tracing::{info, warn};

use crate::client::api::{ClientError, PortalApi};
use crate::client::enrollment::ENROLL_PATH;
use crate::models::{Session, SessionUpdate};

/// Visibility and code controls on the session administration page.
///
/// `confirmed` is the last state the backend acknowledged; `displayed_public`
/// may run ahead of it only while one toggle is in flight.
pub struct SessionAdmin {
    api: Arc<dyn PortalApi>,
    base_url: String,
    confirmed: Session,
    displayed_public: bool,
    pending_toggle: Option<bool>,
    error: Option<String>,
    notice: Option<String>,
}

impl SessionAdmin {
    pub fn new(api: Arc<dyn PortalApi>, base_url: &str, session: Session) -> Self {
        Self {
            api,
            base_url: base_url.trim_end_matches('/').to_string(),
            displayed_public: session.is_public,
            confirmed: session,
            pending_toggle: None,
            error: None,
            notice: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.confirmed
    }

    pub fn displayed_public(&self) -> bool {
        self.displayed_public
    }

    pub fn displayed_code(&self) -> Option<&str> {
        self.confirmed.session_code.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_toggling(&self) -> bool {
        self.pending_toggle.is_some()
    }

    /// Shareable link carrying the current code.
    pub fn enrollment_url(&self) -> Option<String> {
        let code = self.displayed_code()?;
        let encoded: String = url::form_urlencoded::byte_serialize(code.as_bytes()).collect();
        Some(format!("{}{}?code={}", self.base_url, ENROLL_PATH, encoded))
    }

    /// Flips the switch before the backend answers. Returns `None` while
    /// another toggle is still in flight.
    pub fn begin_toggle(&mut self) -> Option<SessionUpdate> {
        if self.pending_toggle.is_some() {
            return None;
        }
        let previous = self.displayed_public;
        self.pending_toggle = Some(previous);
        self.displayed_public = !previous;
        self.error = None;
        Some(SessionUpdate::visibility(self.displayed_public))
    }

    pub fn finish_toggle(&mut self, result: Result<Session, ClientError>) {
        let Some(previous) = self.pending_toggle.take() else {
            return;
        };
        match result {
            Ok(session) => {
                self.displayed_public = session.is_public;
                self.notice = Some(if session.is_public {
                    "Session is now public".to_string()
                } else {
                    "Session is now private".to_string()
                });
                self.confirmed = session;
            }
            Err(e) => {
                warn!("visibility update for session {} failed: {}", self.confirmed.id, e);
                self.displayed_public = previous;
                self.error = Some(format!("Failed to update visibility: {}", e));
            }
        }
    }

    pub async fn toggle_visibility(&mut self) {
        let Some(update) = self.begin_toggle() else {
            return;
        };
        let result = self.api.update_session(self.confirmed.id, &update).await;
        self.finish_toggle(result);
    }

    /// On failure the old code stays on screen; it is still the valid one.
    pub async fn regenerate_code(&mut self) {
        self.error = None;
        match self.api.generate_code(self.confirmed.id).await {
            Ok(session) => {
                info!("session {} received a new code", session.id);
                self.displayed_public = if self.pending_toggle.is_some() {
                    self.displayed_public
                } else {
                    session.is_public
                };
                self.confirmed = session;
                self.notice = Some("New session code generated".to_string());
            }
            Err(e) => {
                warn!("code regeneration for session {} failed: {}", self.confirmed.id, e);
                self.error = Some(format!("Failed to generate a new code: {}", e));
            }
        }
    }
}
