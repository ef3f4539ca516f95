use crate::client::auth_store::AuthPhase;
use crate::models::Role;

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access<'a> {
    Authenticated,
    Roles(&'a [Role]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Checking,
    Redirect { to: String },
    Allow,
}

/// Route gate for one page. `current_path` becomes the login return target.
pub fn guard(phase: &AuthPhase, access: Access<'_>, current_path: &str) -> GuardDecision {
    match phase {
        AuthPhase::Init | AuthPhase::Resolving => GuardDecision::Checking,
        AuthPhase::Anonymous => GuardDecision::Redirect {
            to: login_location(current_path),
        },
        AuthPhase::Authenticated(user) => match access {
            Access::Authenticated => GuardDecision::Allow,
            Access::Roles(roles) if roles.contains(&user.role) => GuardDecision::Allow,
            Access::Roles(_) => GuardDecision::Redirect {
                to: UNAUTHORIZED_PATH.to_string(),
            },
        },
    }
}

pub fn login_location(return_to: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(return_to.as_bytes()).collect();
    format!("{}?returnUrl={}", LOGIN_PATH, encoded)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub path: &'static str,
    pub roles: &'static [Role],
}

const STAFF: &[Role] = &[Role::Administrator, Role::Trainer];
const EVERYONE: &[Role] = &[Role::Administrator, Role::Trainer, Role::Client];

pub const NAV: &[NavEntry] = &[
    NavEntry { label: "Dashboard", path: "/dashboard", roles: EVERYONE },
    NavEntry { label: "My Sessions", path: "/my-sessions", roles: EVERYONE },
    NavEntry { label: "Sessions", path: "/sessions", roles: STAFF },
    NavEntry { label: "Questionnaires", path: "/questionnaires", roles: STAFF },
    NavEntry { label: "Responses", path: "/responses", roles: STAFF },
    NavEntry { label: "Users", path: "/users", roles: &[Role::Administrator] },
    NavEntry { label: "Profile", path: "/profile", roles: EVERYONE },
];

/// Navigation entries shown to a role; the rest are hidden rather than disabled.
pub fn visible_nav(role: Role) -> Vec<&'static NavEntry> {
    NAV.iter().filter(|entry| entry.roles.contains(&role)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn user(role: Role) -> User {
        User {
            id: 1,
            email: "t@example.com".into(),
            first_name: "Tess".into(),
            last_name: "Ng".into(),
            role,
            dob: None,
        }
    }

    #[test]
    fn loading_never_redirects() {
        assert_eq!(guard(&AuthPhase::Init, Access::Authenticated, "/sessions"), GuardDecision::Checking);
        assert_eq!(
            guard(&AuthPhase::Resolving, Access::Roles(STAFF), "/sessions"),
            GuardDecision::Checking
        );
    }

    #[test]
    fn anonymous_goes_to_login_with_return_path() {
        let decision = guard(&AuthPhase::Anonymous, Access::Authenticated, "/enroll?code=abcdef");
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                to: "/login?returnUrl=%2Fenroll%3Fcode%3Dabcdef".to_string()
            }
        );
    }

    #[test]
    fn role_mismatch_is_sent_to_unauthorized() {
        let phase = AuthPhase::Authenticated(user(Role::Client));
        assert_eq!(
            guard(&phase, Access::Roles(STAFF), "/sessions"),
            GuardDecision::Redirect { to: UNAUTHORIZED_PATH.to_string() }
        );
        assert_eq!(guard(&phase, Access::Authenticated, "/profile"), GuardDecision::Allow);
    }

    #[test]
    fn clients_do_not_see_staff_navigation() {
        let paths: Vec<_> = visible_nav(Role::Client).iter().map(|e| e.path).collect();
        assert!(paths.contains(&"/my-sessions"));
        assert!(!paths.contains(&"/sessions"));
        assert!(!paths.contains(&"/users"));

        let admin: Vec<_> = visible_nav(Role::Administrator).iter().map(|e| e.path).collect();
        assert_eq!(admin.len(), NAV.len());
    }
}
