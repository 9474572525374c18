//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Provider name used for email + password flows
pub const DEFAULT_PROVIDER_NAME: &str = "password";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Cookie lifetime with "Remember Me" (30 days)
    pub remember_me_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Provider name passed with every sign-in/sign-up
    pub provider_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "portal_session".to_string(),
            remember_me_ttl: Duration::from_secs(30 * 24 * 3600), // 30 days
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            provider_name: DEFAULT_PROVIDER_NAME.to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::default()
        }
    }

    /// Attributes for the session cookie
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            ..CookieConfig::default()
        }
    }

    /// Persistent lifetime with "Remember Me", browser-session cookie otherwise
    pub fn cookie_max_age(&self, remember_me: bool) -> Option<Duration> {
        remember_me.then_some(self.remember_me_ttl)
    }

    /// Set-Cookie value carrying a provider token
    pub fn session_cookie(&self, token: &str, remember_me: bool) -> String {
        self.cookie()
            .build_set_cookie(token, self.cookie_max_age(remember_me))
    }

    /// Set-Cookie value that removes the session cookie
    pub fn clear_session_cookie(&self) -> String {
        self.cookie().build_delete_cookie()
    }
}
