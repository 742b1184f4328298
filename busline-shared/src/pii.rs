use serde::{Serialize, Deserialize, Serializer};
use std::fmt;

/// A wrapper for passenger contact details that masks its value in Debug and Display output.
///
/// Serialization writes the real value: API responses and the rendered ticket need it,
/// log macros like `tracing::info!("{:?}", passenger)` must not.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the unmasked value. Callers take responsibility for where it ends up.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl From<String> for Masked<String> {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_hide_value() {
        let contact = Masked::new("9990001111".to_string());
        assert_eq!(format!("{:?}", contact), "********");
        assert_eq!(format!("{}", contact), "********");
        assert_eq!(contact.expose(), "9990001111");
    }

    #[test]
    fn test_serialization_keeps_value() {
        let contact: Masked<String> = "asha@example.com".into();
        let json = serde_json::to_string(&contact).unwrap();
        assert_eq!(json, "\"asha@example.com\"");

        let back: Masked<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, contact);
    }
}
