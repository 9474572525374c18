//! Sign-in form

use secrecy::SecretString;

use super::field_errors::{FieldErrors, FormField};
use crate::domain::value_object::{Email, Password};

/// Raw sign-in input
#[derive(Debug)]
pub struct SignInForm {
    pub email: String,
    pub password: SecretString,
    pub remember_me: bool,
}

/// Sign-in input that passed every rule
#[derive(Debug)]
pub struct SignInCredentials {
    pub email: Email,
    pub password: Password,
    pub remember_me: bool,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>, remember_me: bool) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
            remember_me,
        }
    }

    /// Run every rule and report the failures per field
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if let Err(e) = Email::new(self.email.as_str()) {
            errors.add(FormField::Email, e.message());
        }
        if let Err(e) = Password::check(&self.password) {
            errors.add(FormField::Password, e.message());
        }

        errors
    }

    pub fn validate(self) -> Result<SignInCredentials, FieldErrors> {
        self.check().into_result()?;

        let mut errors = FieldErrors::new();
        let email = Email::new(self.email).map_err(|e| {
            errors.add(FormField::Email, e.message());
        });
        let password = Password::new(self.password).map_err(|e| {
            errors.add(FormField::Password, e.message());
        });

        match (email, password) {
            (Ok(email), Ok(password)) => Ok(SignInCredentials {
                email,
                password,
                remember_me: self.remember_me,
            }),
            _ => Err(errors),
        }
    }
}
