//! Historian point and service identifiers.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TagpullError;

/// Strip every character the historian does not accept in identifiers.
///
/// Kept: ASCII letters and digits, `.`, `_`, `:`, `/`, `-` and space.
/// Everything else is removed; nothing is ever rejected here.
#[must_use]
pub fn normalize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '/' | '-' | ' '))
        .collect()
}

/// Fully qualified `site.service.point` identifier.
///
/// Construction normalizes the input with [`normalize_identifier`]. Only an
/// input that normalizes to the empty string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PointId(String);

impl PointId {
    /// Build a point id from raw text.
    ///
    /// # Errors
    /// Returns `TagpullError::InvalidArg` if nothing survives normalization.
    pub fn new(raw: &str) -> Result<Self, TagpullError> {
        let cleaned = normalize_identifier(raw);
        if cleaned.trim().is_empty() {
            return Err(TagpullError::InvalidArg(format!(
                "point id '{raw}' is empty after normalization"
            )));
        }
        Ok(Self(cleaned))
    }

    /// The normalized identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parts(&self) -> Option<(&str, &str, &str)> {
        let (site, rest) = self.0.split_once('.')?;
        let (service, tag) = rest.split_once('.')?;
        if site.is_empty() || service.is_empty() || tag.is_empty() {
            return None;
        }
        Some((site, service, tag))
    }

    /// Site component, when the id has the `site.service.point` shape.
    #[must_use]
    pub fn site(&self) -> Option<&str> {
        self.parts().map(|(s, _, _)| s)
    }

    /// Service component, when the id has the `site.service.point` shape.
    #[must_use]
    pub fn service(&self) -> Option<&str> {
        self.parts().map(|(_, s, _)| s)
    }

    /// Point (tag) component, when the id has the `site.service.point` shape.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.parts().map(|(_, _, t)| t)
    }

    /// The `site.service` prefix as a [`ServiceId`].
    #[must_use]
    pub fn site_service(&self) -> Option<ServiceId> {
        self.parts()
            .map(|(site, service, _)| ServiceId(format!("{site}.{service}")))
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PointId {
    type Err = TagpullError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PointId {
    type Error = TagpullError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<PointId> for String {
    fn from(value: PointId) -> Self {
        value.0
    }
}

impl AsRef<str> for PointId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `site.service` identifier of a historian service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceId(String);

impl ServiceId {
    /// Build a service id from raw text, normalized like [`PointId`].
    ///
    /// # Errors
    /// Returns `TagpullError::InvalidArg` if nothing survives normalization.
    pub fn new(raw: &str) -> Result<Self, TagpullError> {
        let cleaned = normalize_identifier(raw);
        if cleaned.trim().is_empty() {
            return Err(TagpullError::InvalidArg(format!(
                "service id '{raw}' is empty after normalization"
            )));
        }
        Ok(Self(cleaned))
    }

    /// The normalized identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ServiceId {
    type Err = TagpullError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ServiceId {
    type Error = TagpullError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<ServiceId> for String {
    fn from(value: ServiceId) -> Self {
        value.0
    }
}
