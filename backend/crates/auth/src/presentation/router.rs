//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::navigation::EMAIL_EXISTS_PATH;
use crate::domain::provider::AuthProvider;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::infra::provider_http::HttpAuthProvider;
use crate::presentation::handlers::{self, AuthContext};
use crate::presentation::middleware::{require_identity, resolve_identity};
use crate::presentation::pages;

/// Create the Auth router with PostgreSQL repository and HTTP provider
pub fn auth_router(repo: PgUserRepository, provider: HttpAuthProvider, config: AuthConfig) -> Router {
    auth_router_generic(repo, provider, config)
}

/// Create a generic Auth router for any repository/provider implementation
pub fn auth_router_generic<R, P>(repo: R, provider: P, config: AuthConfig) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    router_with_context(AuthContext::new(
        Arc::new(repo),
        Arc::new(provider),
        Arc::new(config),
    ))
}

/// Build the router over an existing context
pub fn router_with_context<R, P>(ctx: AuthContext<R, P>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    P: AuthProvider + Send + Sync + 'static,
{
    // Pages and endpoints that read the caller identity
    let identified = Router::new()
        .route("/", get(pages::landing))
        .route("/api/users/me", get(handlers::current_user::<R, P>))
        .route_layer(from_fn_with_state(ctx.clone(), resolve_identity::<R, P>));

    let protected = Router::new()
        .route("/dashboard", get(pages::dashboard::<R, P>))
        .route_layer(from_fn_with_state(ctx.clone(), require_identity::<R, P>));

    let public = Router::new()
        .route(
            "/signIn",
            get(pages::sign_in_page).post(pages::sign_in_submit::<R, P>),
        )
        .route(
            "/signUp",
            get(pages::sign_up_page).post(pages::sign_up_submit::<R, P>),
        )
        .route("/signOut", post(pages::sign_out_submit::<R, P>))
        .route(EMAIL_EXISTS_PATH, get(handlers::email_exists::<R, P>))
        .route("/api/auth/signin", post(handlers::sign_in::<R, P>))
        .route("/api/auth/signup", post(handlers::sign_up::<R, P>))
        .route("/api/auth/signout", post(handlers::sign_out::<R, P>));

    identified.merge(protected).merge(public).with_state(ctx)
}
