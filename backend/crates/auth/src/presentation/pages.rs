//! Page Handlers
//!
//! Form posts answer with `303 See Other` on success. Failures re-render the
//! form with inline field messages and an error banner.

use axum::extract::{Form, State};
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Extension;

use crate::application::check_session::SessionIdentity;
use crate::application::GetCurrentUserUseCase;
use crate::application::SignOutUseCase;
use crate::domain::provider::AuthProvider;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{SignInRequest, SignUpRequest};
use crate::presentation::extract::{Client, CurrentIdentity};
use crate::presentation::handlers::AuthContext;
use crate::presentation::views::{self, SignInView, SignUpView};

/// Banner text for a failed submission; field problems are shown inline only
fn banner_for(error: &AuthError) -> Option<String> {
    match error {
        AuthError::Validation(_) => None,
        other => Some(other.to_app_error().message().to_string()),
    }
}

/// GET /
pub async fn landing(identity: CurrentIdentity) -> Html<String> {
    Html(views::landing_page(identity.0.is_some()))
}

// ============================================================================
// Sign In
// ============================================================================

/// GET /signIn
pub async fn sign_in_page() -> Html<String> {
    Html(views::sign_in_page(&SignInView::default()))
}

/// POST /signIn
pub async fn sign_in_submit<R, P>(
    State(ctx): State<AuthContext<R, P>>,
    Client(client): Client,
    Form(req): Form<SignInRequest>,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    let email = req.email.clone();
    let remember_me = req.remember_me;

    match ctx.sign_in_use_case().execute(req.into(), &client).await {
        Ok(output) => {
            let cookie = ctx
                .config
                .session_cookie(&output.session.token, output.remember_me);
            (
                [(header::SET_COOKIE, cookie)],
                Redirect::to(output.redirect_to.path()),
            )
                .into_response()
        }
        Err(e) => {
            e.log();
            let banner = banner_for(&e);
            let page = views::sign_in_page(&SignInView {
                email: &email,
                remember_me,
                errors: e.field_errors(),
                banner: banner.as_deref(),
            });
            (e.status_code(), Html(page)).into_response()
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// GET /signUp
pub async fn sign_up_page() -> Html<String> {
    Html(views::sign_up_page(&SignUpView::default()))
}

/// POST /signUp
pub async fn sign_up_submit<R, P>(
    State(ctx): State<AuthContext<R, P>>,
    Client(client): Client,
    Form(req): Form<SignUpRequest>,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    let name = req.name.clone();
    let email = req.email.clone();
    let terms = req.terms;

    match ctx.sign_up_use_case().execute(req.into(), &client).await {
        Ok(output) => {
            let cookie = ctx.config.session_cookie(&output.session.token, false);
            (
                [(header::SET_COOKIE, cookie)],
                Redirect::to(output.redirect_to.path()),
            )
                .into_response()
        }
        Err(e) => {
            e.log();
            let banner = banner_for(&e);
            let suggest_sign_in = matches!(
                e,
                AuthError::EmailTaken
                    | AuthError::SignUpFailed(crate::application::SignUpFailure::EmailInUse)
            );
            let page = views::sign_up_page(&SignUpView {
                name: &name,
                email: &email,
                terms,
                errors: e.field_errors(),
                banner: banner.as_deref(),
                suggest_sign_in,
            });
            (e.status_code(), Html(page)).into_response()
        }
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /dashboard (behind `require_identity`)
pub async fn dashboard<R, P>(
    State(ctx): State<AuthContext<R, P>>,
    Extension(identity): Extension<SessionIdentity>,
) -> AuthResult<Html<String>>
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    let user = GetCurrentUserUseCase::new(ctx.repo.clone())
        .execute(Some(&identity.user_id))
        .await?;

    Ok(Html(views::dashboard_page(user.as_ref())))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /signOut
pub async fn sign_out_submit<R, P>(
    State(ctx): State<AuthContext<R, P>>,
    headers: HeaderMap,
) -> Response
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
        Redirect::to(route.path()),
    )
        .into_response()
}
