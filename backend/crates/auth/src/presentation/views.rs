//! Server-rendered pages
//!
//! Plain HTML with every user-supplied value escaped.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::application::navigation::{EMAIL_EXISTS_PATH, Route};
use crate::domain::entity::user::User;
use crate::domain::form::{FieldErrors, FormField};

/// Values to put back into the sign-in form
#[derive(Debug, Default)]
pub struct SignInView<'a> {
    pub email: &'a str,
    pub remember_me: bool,
    pub errors: Option<&'a FieldErrors>,
    pub banner: Option<&'a str>,
}

/// Values to put back into the sign-up form
#[derive(Debug, Default)]
pub struct SignUpView<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub terms: bool,
    pub errors: Option<&'a FieldErrors>,
    pub banner: Option<&'a str>,
    /// Offer a link to the sign-in page (email already registered)
    pub suggest_sign_in: bool,
}

/// Shown under the email field once the live check finds the address
pub const EMAIL_IN_USE_HINT: &str = "This email is already in use. Try another or sign in.";

// Re-checks the email on every change. Submit stays disabled while a lookup
// is outstanding; answers for an older value are ignored.
const EMAIL_CHECK_SCRIPT: &str = r#"(() => {
  const email = document.getElementById("email");
  const hint = document.getElementById("email-in-use");
  const submit = document.getElementById("sign-up-submit");
  let latest = 0;
  const check = async () => {
    const value = email.value;
    const ticket = ++latest;
    if (!value) {
      hint.hidden = true;
      submit.disabled = false;
      return;
    }
    submit.disabled = true;
    let exists = null;
    try {
      const response = await fetch(email.dataset.check + "?email=" + encodeURIComponent(value));
      if (response.ok) exists = (await response.json()).exists;
    } catch (_) {}
    if (ticket !== latest) return;
    hint.hidden = exists !== true;
    submit.disabled = false;
  };
  email.addEventListener("input", check);
  check();
})();"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n<main>\n{}</main>\n</body>\n</html>\n",
        encode_text(title),
        body
    )
}

fn banner(message: Option<&str>) -> String {
    message
        .map(|m| format!("<p class=\"banner error\" role=\"alert\">{}</p>\n", encode_text(m)))
        .unwrap_or_default()
}

fn field_messages(errors: Option<&FieldErrors>, field: FormField) -> String {
    errors
        .map(|errors| errors.get(field))
        .unwrap_or_default()
        .iter()
        .map(|message| {
            format!(
                "<p class=\"field-error\" id=\"{}-error\">{}</p>\n",
                field.as_str(),
                encode_text(message)
            )
        })
        .collect()
}

fn input(
    label: &str,
    field: FormField,
    kind: &str,
    value: &str,
    errors: Option<&FieldErrors>,
) -> String {
    input_with(label, field, kind, value, errors, "")
}

/// `extra` is inserted verbatim into the tag and must already be escaped
fn input_with(
    label: &str,
    field: FormField,
    kind: &str,
    value: &str,
    errors: Option<&FieldErrors>,
    extra: &str,
) -> String {
    let invalid = errors.is_some_and(|errors| errors.contains(field));
    format!(
        "<label for=\"{name}\">{label}</label>\n\
         <input id=\"{name}\" name=\"{name}\" type=\"{kind}\" value=\"{value}\"{extra}{invalid}>\n{messages}",
        name = field.as_str(),
        label = encode_text(label),
        kind = kind,
        value = encode_double_quoted_attribute(value),
        invalid = if invalid { " aria-invalid=\"true\"" } else { "" },
        messages = field_messages(errors, field),
    )
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        "<label><input name=\"{name}\" type=\"checkbox\"{checked}> {label}</label>\n",
        checked = if checked { " checked" } else { "" },
        label = encode_text(label),
    )
}

pub fn landing_page(signed_in: bool) -> String {
    let links = if signed_in {
        format!("<a href=\"{}\">Go to dashboard</a>\n", Route::Dashboard)
    } else {
        format!(
            "<a href=\"{}\">Get started</a>\n<a href=\"{}\">Sign in</a>\n",
            Route::SignUp,
            Route::SignIn
        )
    };

    layout("Welcome", &format!("<h1>Welcome</h1>\n<nav>\n{links}</nav>\n"))
}

pub fn sign_in_page(view: &SignInView<'_>) -> String {
    let body = format!(
        "<h1>Sign in</h1>\n{banner}<form method=\"post\" action=\"{action}\" novalidate>\n\
         {email}{password}{remember}<button type=\"submit\">Sign in</button>\n</form>\n\
         <p>Don't have an account? <a href=\"{sign_up}\">Sign up</a></p>\n",
        banner = banner(view.banner),
        action = Route::SignIn,
        email = input("Email", FormField::Email, "email", view.email, view.errors),
        password = input("Password", FormField::Password, "password", "", view.errors),
        remember = checkbox("rememberMe", "Remember me", view.remember_me),
        sign_up = Route::SignUp,
    );

    layout("Sign in", &body)
}

pub fn sign_up_page(view: &SignUpView<'_>) -> String {
    let hint = if view.suggest_sign_in {
        format!("<p><a href=\"{}\">Sign in instead</a></p>\n", Route::SignIn)
    } else {
        String::new()
    };

    let email = input_with(
        "Email",
        FormField::Email,
        "email",
        view.email,
        view.errors,
        &format!(" data-check=\"{EMAIL_EXISTS_PATH}\""),
    );

    let body = format!(
        "<h1>Create an account</h1>\n{banner}{hint}<form method=\"post\" action=\"{action}\" novalidate>\n\
         {name}{email}<p class=\"field-hint\" id=\"email-in-use\" role=\"status\"{in_use_hidden}>{in_use}</p>\n\
         {password}{confirm}{terms}{terms_errors}\
         <button id=\"sign-up-submit\" type=\"submit\">Sign up</button>\n</form>\n\
         <p>Already have an account? <a href=\"{sign_in}\">Sign in</a></p>\n\
         <script>\n{script}\n</script>\n",
        banner = banner(view.banner),
        action = Route::SignUp,
        name = input("Name", FormField::Name, "text", view.name, view.errors),
        in_use_hidden = if view.suggest_sign_in { "" } else { " hidden" },
        in_use = encode_text(EMAIL_IN_USE_HINT),
        script = EMAIL_CHECK_SCRIPT,
        password = input("Password", FormField::Password, "password", "", view.errors),
        confirm = input(
            "Confirm password",
            FormField::ConfirmPassword,
            "password",
            "",
            view.errors
        ),
        terms = checkbox("terms", "I accept the terms and conditions", view.terms),
        terms_errors = field_messages(view.errors, FormField::Terms),
        sign_in = Route::SignIn,
    );

    layout("Sign up", &body)
}

pub fn dashboard_page(user: Option<&User>) -> String {
    let greeting = match user {
        Some(user) => format!(
            "<h1>Welcome, {}</h1>\n<p>Signed in as {}</p>\n",
            encode_text(user.display_name()),
            encode_text(user.email.as_str())
        ),
        // Provider knows the session but the user table has no row yet
        None => "<h1>Welcome</h1>\n<p>Your account is being set up.</p>\n".to_string(),
    };

    let body = format!(
        "{greeting}<form method=\"post\" action=\"/signOut\">\n\
         <button type=\"submit\">Sign out</button>\n</form>\n"
    );

    layout("Dashboard", &body)
}
