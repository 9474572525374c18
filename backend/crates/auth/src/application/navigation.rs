//! Navigation targets

/// Existence lookup the sign-up page calls while the email field changes
pub const EMAIL_EXISTS_PATH: &str = "/api/users/email-exists";

/// Pages the portal redirects to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    SignIn,
    SignUp,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::SignIn => "/signIn",
            Route::SignUp => "/signUp",
            Route::Dashboard => "/dashboard",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
