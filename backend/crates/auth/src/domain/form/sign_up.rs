//! Sign-up form

use secrecy::SecretString;

use super::field_errors::{FieldErrors, FormField};
use crate::domain::value_object::password::secrets_match;
use crate::domain::value_object::{DisplayName, Email, Password};

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords don't match";
pub const TERMS_REQUIRED_MESSAGE: &str = "You must accept the terms and conditions";

/// Raw sign-up input
#[derive(Debug)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub terms: bool,
}

/// Sign-up input that passed every rule
#[derive(Debug)]
pub struct SignUpDetails {
    pub name: DisplayName,
    pub email: Email,
    pub password: Password,
}

impl SignUpForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
        terms: bool,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
            confirm_password: SecretString::from(confirm_password.into()),
            terms,
        }
    }

    /// Run every rule and report the failures per field
    ///
    /// The confirmation is compared even when the password itself is too
    /// short, so both messages can show at once.
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if let Err(e) = DisplayName::new(&self.name) {
            errors.add(FormField::Name, e.message());
        }
        if let Err(e) = Email::new(self.email.as_str()) {
            errors.add(FormField::Email, e.message());
        }
        if let Err(e) = Password::check(&self.password) {
            errors.add(FormField::Password, e.message());
        }
        if !secrets_match(&self.password, &self.confirm_password) {
            errors.add(FormField::ConfirmPassword, PASSWORD_MISMATCH_MESSAGE);
        }
        if !self.terms {
            errors.add(FormField::Terms, TERMS_REQUIRED_MESSAGE);
        }

        errors
    }

    pub fn validate(self) -> Result<SignUpDetails, FieldErrors> {
        self.check().into_result()?;

        let mut errors = FieldErrors::new();
        let name = DisplayName::new(&self.name).map_err(|e| {
            errors.add(FormField::Name, e.message());
        });
        let email = Email::new(self.email).map_err(|e| {
            errors.add(FormField::Email, e.message());
        });
        let password = Password::new(self.password).map_err(|e| {
            errors.add(FormField::Password, e.message());
        });

        match (name, email, password) {
            (Ok(name), Ok(email), Ok(password)) => Ok(SignUpDetails {
                name,
                email,
                password,
            }),
            _ => Err(errors),
        }
    }
}
