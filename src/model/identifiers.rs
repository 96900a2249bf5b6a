//! Deployment identifier newtypes with smart constructors.
//!
//! All identifiers reject empty strings and unresolved placeholders
//! (`<AWS_REGION>` and friends) at construction time.
//! Raw constructors are never exported - use smart constructors only.

use std::fmt;
use url::Url;

/// Returns true when a value is still a template placeholder such as `<AWS_REGION>`.
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.len() >= 2 && trimmed.starts_with('<') && trimmed.ends_with('>')
}

fn check_opaque(raw: &str) -> Result<(), InvalidIdentifier> {
    if raw.trim().is_empty() {
        return Err(InvalidIdentifier::Empty);
    }
    if is_placeholder(raw) {
        return Err(InvalidIdentifier::Placeholder);
    }
    Ok(())
}

/// Cloud region identifier (e.g., "us-east-1").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionId(String);

impl RegionId {
    /// Smart constructor: lowercase ASCII letters, digits and inner hyphens only.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidIdentifier> {
        let raw = raw.into();
        check_opaque(&raw)?;

        let well_formed = raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !raw.starts_with('-')
            && !raw.ends_with('-');
        if !well_formed {
            return Err(InvalidIdentifier::Malformed);
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity pool identifier scoping which users may obtain credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityPoolId(String);

impl IdentityPoolId {
    /// Smart constructor: validates non-empty, non-placeholder pool id
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidIdentifier> {
        let raw = raw.into();
        check_opaque(&raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityPoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// App client identifier scoping which application may obtain credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppClientId(String);

impl AppClientId {
    /// Smart constructor: validates non-empty, non-placeholder client id
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidIdentifier> {
        let raw = raw.into();
        check_opaque(&raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Logical name of a remote API (e.g., "MLNApp").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiName(String);

impl ApiName {
    /// Smart constructor: validates non-empty, non-placeholder API name
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidIdentifier> {
        let raw = raw.into();
        check_opaque(&raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base URL of a remote API. Always absolute, http(s), with a host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiEndpoint(Url);

impl ApiEndpoint {
    /// Smart constructor: parses and checks scheme and host.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidEndpoint> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            return Err(InvalidEndpoint::Empty);
        }
        if is_placeholder(raw) {
            return Err(InvalidEndpoint::Placeholder);
        }

        let url = Url::parse(raw.trim()).map_err(|e| InvalidEndpoint::Unparseable(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(InvalidEndpoint::UnsupportedScheme(other.to_string())),
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(InvalidEndpoint::MissingHost);
        }

        Ok(Self(url))
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

// ===== Error Types =====

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidIdentifier {
    #[error("value cannot be empty")]
    Empty,
    #[error("value is an unresolved placeholder")]
    Placeholder,
    #[error("value is not a well-formed identifier")]
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEndpoint {
    #[error("endpoint cannot be empty")]
    Empty,
    #[error("endpoint is an unresolved placeholder")]
    Placeholder,
    #[error("endpoint is not a valid URL: {0}")]
    Unparseable(String),
    #[error("endpoint scheme must be http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("endpoint has no host")]
    MissingHost,
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_detection_matches_template_shape() {
        assert!(is_placeholder("<AWS_REGION>"));
        assert!(is_placeholder("  <API_GATEWAY_URL> "));
        assert!(!is_placeholder("us-east-1"));
        assert!(!is_placeholder("<"));
        assert!(!is_placeholder("a<b>"));
    }

    #[test]
    fn region_accepts_standard_region_names() {
        for region in ["us-east-1", "eu-west-2", "ap-southeast-1", "us-gov-west-1"] {
            let parsed = RegionId::new(region).unwrap();
            assert_eq!(parsed.as_str(), region);
        }
    }

    #[test]
    fn region_rejects_placeholder() {
        assert_eq!(
            RegionId::new("<AWS_REGION>"),
            Err(InvalidIdentifier::Placeholder)
        );
    }

    #[test]
    fn region_rejects_uppercase_and_spaces() {
        assert_eq!(RegionId::new("US-EAST-1"), Err(InvalidIdentifier::Malformed));
        assert_eq!(RegionId::new("us east 1"), Err(InvalidIdentifier::Malformed));
        assert_eq!(RegionId::new("-us-east-1"), Err(InvalidIdentifier::Malformed));
    }

    #[test]
    fn opaque_ids_reject_blank_values() {
        assert_eq!(IdentityPoolId::new("   "), Err(InvalidIdentifier::Empty));
        assert_eq!(AppClientId::new(""), Err(InvalidIdentifier::Empty));
        assert_eq!(ApiName::new("\t"), Err(InvalidIdentifier::Empty));
    }

    #[test]
    fn opaque_ids_keep_value_verbatim() {
        assert_eq!(IdentityPoolId::new("pool123").unwrap().to_string(), "pool123");
        assert_eq!(AppClientId::new("client456").unwrap().as_str(), "client456");
        assert_eq!(ApiName::new("MLNApp").unwrap().as_str(), "MLNApp");
    }

    #[test]
    fn endpoint_accepts_https_url() {
        let endpoint = ApiEndpoint::new("https://api.example.com").unwrap();
        assert_eq!(endpoint.as_url().host_str(), Some("api.example.com"));
    }

    #[test]
    fn endpoint_rejects_placeholder_before_parsing() {
        assert_eq!(
            ApiEndpoint::new("<API_GATEWAY_URL>"),
            Err(InvalidEndpoint::Placeholder)
        );
    }

    #[test]
    fn endpoint_rejects_relative_and_non_http() {
        assert!(matches!(
            ApiEndpoint::new("api.example.com/prod"),
            Err(InvalidEndpoint::Unparseable(_))
        ));
        assert_eq!(
            ApiEndpoint::new("ftp://api.example.com"),
            Err(InvalidEndpoint::UnsupportedScheme("ftp".to_string()))
        );
    }
}
