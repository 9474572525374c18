//! Display Name Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Minimum display name length, in UTF-16 code units
pub const NAME_MIN_LENGTH: usize = 2;

pub const NAME_TOO_SHORT_MESSAGE: &str = "Name must be at least 2 characters";

/// Name shown on the dashboard
///
/// Kept as entered. Length is counted in UTF-16 code units, the same way a
/// browser counts `minlength`, and whitespace counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl AsRef<str>) -> AppResult<Self> {
        let name = name.as_ref();

        if name.encode_utf16().count() < NAME_MIN_LENGTH {
            return Err(AppError::bad_request(NAME_TOO_SHORT_MESSAGE));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_valid() {
        assert_eq!(DisplayName::new("Al").unwrap().as_str(), "Al");
        assert_eq!(DisplayName::new(" A").unwrap().as_str(), " A");
        assert!(DisplayName::new("李雷").is_ok());
        // One emoji is two UTF-16 code units
        assert!(DisplayName::new("😀").is_ok());
    }

    #[test]
    fn test_display_name_too_short() {
        assert!(DisplayName::new("").is_err());
        assert!(DisplayName::new("A").is_err());
        assert!(DisplayName::new(" ").is_err());
        assert!(DisplayName::new("é").is_err());
        assert_eq!(
            DisplayName::new("A").unwrap_err().message(),
            NAME_TOO_SHORT_MESSAGE
        );
    }
}
