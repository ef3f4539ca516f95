mod common;

use std::sync::Arc;

use common::{MockPortalApi, api_error, push, session};
use portal::client::admin::SessionAdmin;
use portal::config::Config;
use portal::models::SessionUpdate;

fn base() -> String {
    format!("{}/", Config::default().public_base_url)
}

#[tokio::test]
async fn failed_toggle_rolls_back_and_reports() {
    let api = Arc::new(MockPortalApi::new());
    push(&api.update_replies, Err(api_error(500, "Database unavailable")));
    let mut admin = SessionAdmin::new(api.clone(), &base(), session(7, Some("ab12cd"), true));

    admin.toggle_visibility().await;

    assert!(admin.displayed_public());
    assert!(!admin.is_toggling());
    assert_eq!(admin.error(), Some("Failed to update visibility: Database unavailable"));
    assert_eq!(api.calls(), vec!["update_session 7 Some(false)"]);
}

#[tokio::test]
async fn toggle_flips_before_backend_answers() {
    let api = Arc::new(MockPortalApi::new());
    let mut admin = SessionAdmin::new(api, &base(), session(7, Some("ab12cd"), false));

    let update = admin.begin_toggle();
    assert_eq!(update, Some(SessionUpdate::visibility(true)));
    assert!(admin.displayed_public());
    assert!(admin.is_toggling());
    assert_eq!(admin.begin_toggle(), None);

    admin.finish_toggle(Ok(session(7, Some("ab12cd"), true)));
    assert!(admin.displayed_public());
    assert!(admin.session().is_public);
    assert_eq!(admin.notice(), Some("Session is now public"));
    assert_eq!(admin.error(), None);
}

#[tokio::test]
async fn regenerate_replaces_code_and_link() {
    let api = Arc::new(MockPortalApi::new());
    push(&api.code_replies, Ok(session(7, Some("new456"), true)));
    let mut admin = SessionAdmin::new(api, &base(), session(7, Some("old123"), true));
    assert_eq!(
        admin.enrollment_url().as_deref(),
        Some("http://localhost:3000/enroll?code=old123")
    );

    admin.regenerate_code().await;

    assert_eq!(admin.displayed_code(), Some("new456"));
    assert_eq!(
        admin.enrollment_url().as_deref(),
        Some("http://localhost:3000/enroll?code=new456")
    );
    assert_eq!(admin.error(), None);
}

#[tokio::test]
async fn failed_regenerate_keeps_old_code() {
    let api = Arc::new(MockPortalApi::new());
    push(&api.code_replies, Err(api_error(403, "Not enough permissions")));
    let mut admin = SessionAdmin::new(api, &base(), session(7, Some("old123"), true));

    admin.regenerate_code().await;

    assert_eq!(admin.displayed_code(), Some("old123"));
    assert!(admin.error().unwrap().contains("Not enough permissions"));
    admin.dismiss_error();
    assert_eq!(admin.error(), None);
}

#[tokio::test]
async fn session_without_code_has_no_link() {
    let api = Arc::new(MockPortalApi::new());
    let admin = SessionAdmin::new(api, &base(), session(7, None, true));
    assert_eq!(admin.enrollment_url(), None);
}
