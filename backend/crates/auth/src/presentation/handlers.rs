//! HTTP Handlers (JSON API)

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckEmailExistsUseCase, CheckSessionUseCase, GetCurrentUserUseCase, InFlightSubmissions,
    SessionIdentity, SignInUseCase, SignOutUseCase, SignUpUseCase,
};
use crate::domain::provider::AuthProvider;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    CurrentUserResponse, EmailExistsQuery, EmailExistsResponse, RedirectResponse, SignInRequest,
    SignUpRequest,
};
use crate::presentation::extract::{Client, CurrentIdentity};

/// Shared state for auth handlers
///
/// Everything a request needs is reached through this context; there is no
/// global auth state.
pub struct AuthContext<R, P>
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub provider: Arc<P>,
    pub config: Arc<AuthConfig>,
    pub in_flight: Arc<InFlightSubmissions>,
}

impl<R, P> Clone for AuthContext<R, P>
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            provider: Arc::clone(&self.provider),
            config: Arc::clone(&self.config),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<R, P> AuthContext<R, P>
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, provider: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            provider,
            config,
            in_flight: Arc::new(InFlightSubmissions::new()),
        }
    }

    /// Session token from the request cookie
    pub fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.config.session_cookie_name)
    }

    /// Resolve the caller identity from the session cookie
    pub async fn identify(&self, headers: &HeaderMap) -> Option<SessionIdentity> {
        let token = self.session_token(headers)?;
        CheckSessionUseCase::new(self.provider.clone())
            .execute(Some(token.as_str()))
            .await
    }

    pub(crate) fn sign_in_use_case(&self) -> SignInUseCase<P> {
        SignInUseCase::new(
            self.provider.clone(),
            self.in_flight.clone(),
            self.config.clone(),
        )
    }

    pub(crate) fn sign_up_use_case(&self) -> SignUpUseCase<R, P> {
        SignUpUseCase::new(
            self.repo.clone(),
            self.provider.clone(),
            self.in_flight.clone(),
            self.config.clone(),
        )
    }
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/users/me
pub async fn current_user<R, P>(
    State(ctx): State<AuthContext<R, P>>,
    identity: CurrentIdentity,
) -> AuthResult<Json<Option<CurrentUserResponse>>>
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    let user_id = identity.0.map(|identity| identity.user_id);

    let user = GetCurrentUserUseCase::new(ctx.repo.clone())
        .execute(user_id.as_ref())
        .await?;

    Ok(Json(user.map(CurrentUserResponse::from)))
}

/// GET /api/users/email-exists?email=
pub async fn email_exists<R, P>(
    State(ctx): State<AuthContext<R, P>>,
    Query(query): Query<EmailExistsQuery>,
) -> AuthResult<Json<EmailExistsResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    let exists = CheckEmailExistsUseCase::new(ctx.repo.clone())
        .execute(query.email.as_deref())
        .await?;

    Ok(Json(EmailExistsResponse { exists }))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R, P>(
    State(ctx): State<AuthContext<R, P>>,
    Client(client): Client,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    let output = ctx.sign_in_use_case().execute(req.into(), &client).await?;

    let cookie = ctx
        .config
        .session_cookie(&output.session.token, output.remember_me);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(RedirectResponse::from(output.redirect_to)),
    ))
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R, P>(
    State(ctx): State<AuthContext<R, P>>,
    Client(client): Client,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    let output = ctx.sign_up_use_case().execute(req.into(), &client).await?;

    let cookie = ctx.config.session_cookie(&output.session.token, false);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(RedirectResponse::from(output.redirect_to)),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
pub async fn sign_out<R, P>(
    State(ctx): State<AuthContext<R, P>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    let token = ctx.session_token(&headers);
    let route = SignOutUseCase::new(ctx.provider.clone())
        .execute(token.as_deref())
        .await;

    (
        [(header::SET_COOKIE, ctx.config.clear_session_cookie())],
        Json(RedirectResponse::from(route)),
    )
}
