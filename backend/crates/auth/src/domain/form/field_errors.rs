//! Per-field validation messages

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Form fields that can carry a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Terms,
}

impl FormField {
    /// Key used in JSON bodies and HTML `name` attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirmPassword",
            FormField::Terms => "terms",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every failing rule, grouped by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: FormField, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages for one field (empty when the field is valid)
    pub fn get(&self, field: FormField) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    /// `Err(self)` when any field failed
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, messages) in &self.0 {
            map.serialize_entry(field.as_str(), messages)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collects_multiple_messages_per_field() {
        let mut errors = FieldErrors::new();
        errors.add(FormField::Password, "first");
        errors.add(FormField::Password, "second");

        assert_eq!(errors.get(FormField::Password), ["first", "second"]);
        assert!(errors.get(FormField::Email).is_empty());
    }

    #[test]
    fn test_serializes_with_form_keys() {
        let mut errors = FieldErrors::new();
        errors.add(FormField::ConfirmPassword, "Passwords don't match");
        errors.add(FormField::Email, "Invalid email address");

        assert_eq!(
            errors.to_json(),
            json!({
                "email": ["Invalid email address"],
                "confirmPassword": ["Passwords don't match"],
            })
        );
    }

    #[test]
    fn test_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.add(FormField::Terms, "x");
        assert!(errors.into_result().is_err());
    }
}
