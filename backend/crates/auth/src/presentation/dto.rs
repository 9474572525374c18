//! API DTOs (Data Transfer Objects)
//!
//! JSON bodies use camelCase. HTML form posts use the same field names, so
//! one set of request types serves both.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::navigation::Route;
use crate::domain::entity::user::User;
use crate::domain::form::{SignInForm, SignUpForm};

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
///
/// Missing fields default to empty so they surface as validation messages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    #[serde(deserialize_with = "checkbox")]
    pub remember_me: bool,
}

impl From<SignInRequest> for SignInForm {
    fn from(req: SignInRequest) -> Self {
        SignInForm::new(req.email, req.password, req.remember_me)
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(deserialize_with = "checkbox")]
    pub terms: bool,
}

impl From<SignUpRequest> for SignUpForm {
    fn from(req: SignUpRequest) -> Self {
        SignUpForm::new(
            req.name,
            req.email,
            req.password,
            req.confirm_password,
            req.terms,
        )
    }
}

/// Accepts JSON booleans and HTML checkbox values (`on`, `true`, `1`)
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Bool(value) => value,
        Raw::Text(text) => matches!(text.as_str(), "on" | "true" | "1" | "yes"),
    })
}

// ============================================================================
// Redirects
// ============================================================================

/// Where the client should navigate after a successful action
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectResponse {
    pub redirect_to: String,
}

impl From<Route> for RedirectResponse {
    fn from(route: Route) -> Self {
        Self {
            redirect_to: route.path().to_string(),
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// Current user response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.name,
            email: user.email.into_db(),
        }
    }
}

/// Email existence query
#[derive(Debug, Clone, Deserialize)]
pub struct EmailExistsQuery {
    pub email: Option<String>,
}

/// Email existence response; `null` when the check was skipped
#[derive(Debug, Clone, Serialize)]
pub struct EmailExistsResponse {
    pub exists: Option<bool>,
}
