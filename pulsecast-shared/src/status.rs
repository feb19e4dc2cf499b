//! Telemetry status discriminator.

use crate::FormatError;
use serde::de::{Deserializer, Error as _, Unexpected};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Device status carried in every telemetry message.
///
/// One table maps each variant to both its binary code and its JSON
/// label, so the two encodings cannot drift apart:
///
/// | Variant  | Code | Label      |
/// |----------|------|------------|
/// | `Active` | 0    | `"active"` |
/// | `Idle`   | 1    | `"idle"`   |
/// | `Error`  | 2    | `"error"`  |
///
/// The serde impls go through [`Status::as_label`] /
/// [`Status::from_label`], so the JSON encoding uses the same table as
/// everything else.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Device is sending live readings
    Active = 0,
    /// Device is up but not measuring
    Idle = 1,
    /// Device reported a fault
    Error = 2,
}

impl Status {
    /// Binary wire code for this status.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert from a binary wire code.
    ///
    /// Returns `None` for unmapped codes; decoders reject those.
    #[inline]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Active),
            1 => Some(Self::Idle),
            2 => Some(Self::Error),
            _ => None,
        }
    }

    /// JSON label for this status.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Idle => "idle",
            Self::Error => "error",
        }
    }

    /// Convert from a JSON label, rejecting unknown labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "active" => Some(Self::Active),
            "idle" => Some(Self::Idle),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_label())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label).ok_or_else(|| {
            D::Error::invalid_value(
                Unexpected::Str(&label),
                &"one of \"active\", \"idle\", \"error\"",
            )
        })
    }
}

impl TryFrom<u8> for Status {
    type Error = FormatError;

    #[inline]
    fn try_from(value: u8) -> Result<Self, FormatError> {
        Self::from_u8(value).ok_or(FormatError::UnknownStatusCode(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Active as u8, 0);
        assert_eq!(Status::Idle as u8, 1);
        assert_eq!(Status::Error as u8, 2);
    }

    #[test]
    fn test_from_u8() {
        assert_eq!(Status::from_u8(0), Some(Status::Active));
        assert_eq!(Status::from_u8(2), Some(Status::Error));
        assert_eq!(Status::from_u8(3), None);
        assert_eq!(Status::from_u8(255), None);
    }

    #[test]
    fn test_try_from_rejects_unmapped() {
        assert!(Status::try_from(1u8).is_ok());
        assert!(Status::try_from(200u8).is_err());
    }

    #[test]
    fn test_code_label_agreement() {
        // The byte code and the label must round-trip through the same table.
        for status in [Status::Active, Status::Idle, Status::Error] {
            assert_eq!(Status::from_u8(status.as_u8()), Some(status));
            assert_eq!(Status::from_label(status.as_label()), Some(status));
        }
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(serde_json::to_string(&Status::Idle).unwrap(), "\"idle\"");
        let parsed: Status = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, Status::Error);
    }

    #[test]
    fn test_serde_rejects_unknown_label_with_context() {
        let err = serde_json::from_str::<Status>("\"offline\"").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("offline"), "error should name the bad label: {text}");
        assert!(text.contains("active"), "error should list known labels: {text}");
    }

    #[test]
    fn test_serde_rejects_non_string_status() {
        assert!(serde_json::from_str::<Status>("1").is_err());
    }
}
