use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use cookie::time::Duration as CookieDuration;
use cookie::{Cookie, SameSite};

use crate::config::Config;
use crate::error::AppError;

/// Lifetime of the access-token cookie, matching the backend token expiry.
pub const AUTH_COOKIE_MAX_AGE_HOURS: i64 = 24;

pub fn auth_cookie(config: &Config, token: &str) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token.to_string()))
        .http_only(true)
        .secure(config.production)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(CookieDuration::hours(AUTH_COOKIE_MAX_AGE_HOURS))
        .build()
}

pub fn expired_auth_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), ""))
        .http_only(true)
        .secure(config.production)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(CookieDuration::seconds(0))
        .build()
}

pub fn header_value(cookie: &Cookie<'_>) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| AppError::Internal(format!("Invalid cookie header: {}", e)))
}

pub fn cookie_token(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|part| Cookie::parse(part.trim().to_string()).ok())
        .find(|parsed| parsed.name() == name && !parsed.value().is_empty())
        .map(|parsed| parsed.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_cookie_flags() {
        let rendered = auth_cookie(&Config::default(), "abc").to_string();
        assert!(rendered.starts_with("token=abc"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Strict"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=86400"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn production_cookie_is_secure() {
        let config = Config {
            production: true,
            ..Config::default()
        };
        assert!(auth_cookie(&config, "abc").to_string().contains("Secure"));
    }

    #[test]
    fn reads_named_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; token=xyz; lang=en"));
        assert_eq!(cookie_token(&headers, "token").as_deref(), Some("xyz"));
        assert_eq!(cookie_token(&headers, "missing"), None);
    }

    #[test]
    fn empty_cookie_value_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("token="));
        assert_eq!(cookie_token(&headers, "token"), None);
    }
}
