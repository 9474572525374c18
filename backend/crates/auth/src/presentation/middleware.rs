//! Auth Middleware
//!
//! Resolves the session cookie into a caller identity via the provider.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::application::navigation::Route;
use crate::domain::provider::AuthProvider;
use crate::domain::repository::UserRepository;
use crate::presentation::extract::CurrentIdentity;
use crate::presentation::handlers::AuthContext;

/// Middleware that requires a signed-in caller
///
/// Callers without a usable session are redirected to the sign-in page.
/// On success both [`CurrentIdentity`] and the bare `SessionIdentity` are
/// placed in the request extensions.
pub async fn require_identity<R, P>(
    State(ctx): State<AuthContext<R, P>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    let Some(identity) = ctx.identify(req.headers()).await else {
        tracing::debug!(path = %req.uri().path(), "Protected page requested without a session");
        return Redirect::to(Route::SignIn.path()).into_response();
    };

    req.extensions_mut()
        .insert(CurrentIdentity(Some(identity.clone())));
    req.extensions_mut().insert(identity);

    next.run(req).await
}

/// Middleware that resolves the caller identity but doesn't require it
pub async fn resolve_identity<R, P>(
    State(ctx): State<AuthContext<R, P>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    let identity = ctx.identify(req.headers()).await;

    // Store identity in request extensions
    req.extensions_mut().insert(CurrentIdentity(identity));

    next.run(req).await
}
