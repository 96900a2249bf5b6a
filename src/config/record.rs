//! Deployment Configuration Record.
//!
//! [`ConfigurationRecord`] is the raw record a deployment supplies. It is never used
//! directly by a capability: [`ConfigurationRecord::validate`] turns it into a typed
//! [`DeploymentConfig`], and only that is handed to the cloud and identity
//! capabilities.

use crate::model::{
    ApiEndpoint, ApiName, AppClientId, ConfigField, ConfigurationError, IdentityPoolId,
    InvalidEndpoint, InvalidIdentifier, RegionId,
};
use serde::Deserialize;

/// Raw deployment parameters as written by the deployment.
///
/// Corresponds to the `[deployment]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigurationRecord {
    /// Region for generic cloud calls.
    #[serde(default)]
    pub region: String,
    /// Region of the identity provider.
    #[serde(default)]
    pub auth_region: String,
    #[serde(default)]
    pub identity_pool_id: String,
    #[serde(default)]
    pub app_client_id: String,
    #[serde(default)]
    pub api_name: String,
    /// Base URL of the notification API.
    #[serde(default)]
    pub api_endpoint: String,
    #[serde(default)]
    pub api_region: String,
}

/// The record shipped with an unconfigured deployment. Fails validation.
impl Default for ConfigurationRecord {
    fn default() -> Self {
        Self {
            region: "<AWS_REGION>".to_string(),
            auth_region: "<AWS_REGION>".to_string(),
            identity_pool_id: "<COGNITO_USER_POOL_ID>".to_string(),
            app_client_id: "<APP_CLIENT_ID>".to_string(),
            api_name: "MLNApp".to_string(),
            api_endpoint: "<API_GATEWAY_URL>".to_string(),
            api_region: "<AWS_REGION>".to_string(),
        }
    }
}

/// Shape of an `aws-exports` JSON document.
#[derive(Debug, Deserialize)]
struct AwsExports {
    #[serde(default)]
    aws_project_region: String,
    #[serde(default)]
    aws_cognito_region: String,
    #[serde(default, alias = "aws_cognito_identity_pool_id")]
    aws_user_pools_id: String,
    #[serde(default)]
    aws_user_pools_web_client_id: String,
    #[serde(default)]
    aws_cloud_logic_custom: Vec<AwsCloudLogic>,
}

#[derive(Debug, Deserialize)]
struct AwsCloudLogic {
    #[serde(default)]
    name: String,
    #[serde(default)]
    endpoint: String,
    #[serde(default)]
    region: String,
}

impl ConfigurationRecord {
    /// Read a record from an `aws-exports` JSON document.
    ///
    /// Uses the first `aws_cloud_logic_custom` entry as the API. Unknown keys
    /// (`oauth` and the like) are ignored. An empty API list leaves the API fields
    /// blank, which validation reports as missing.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the document is not valid JSON.
    pub fn from_aws_exports_json(json: &str) -> Result<Self, serde_json::Error> {
        let exports: AwsExports = serde_json::from_str(json)?;
        let api = exports.aws_cloud_logic_custom.into_iter().next();
        let (api_name, api_endpoint, api_region) = match api {
            Some(api) => (api.name, api.endpoint, api.region),
            None => (String::new(), String::new(), String::new()),
        };

        Ok(Self {
            region: exports.aws_project_region,
            auth_region: exports.aws_cognito_region,
            identity_pool_id: exports.aws_user_pools_id,
            app_client_id: exports.aws_user_pools_web_client_id,
            api_name,
            api_endpoint,
            api_region,
        })
    }

    /// Raw value of a field.
    pub fn value(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::Region => &self.region,
            ConfigField::AuthRegion => &self.auth_region,
            ConfigField::IdentityPoolId => &self.identity_pool_id,
            ConfigField::AppClientId => &self.app_client_id,
            ConfigField::ApiName => &self.api_name,
            ConfigField::ApiEndpoint => &self.api_endpoint,
            ConfigField::ApiRegion => &self.api_region,
        }
    }

    /// Validate every field, failing on the first bad one in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] naming the first missing, placeholder or
    /// malformed field.
    pub fn validate(&self) -> Result<DeploymentConfig, ConfigurationError> {
        Ok(DeploymentConfig {
            region: region(self, ConfigField::Region)?,
            auth_region: region(self, ConfigField::AuthRegion)?,
            identity_pool_id: IdentityPoolId::new(&self.identity_pool_id)
                .map_err(|e| identifier_error(self, ConfigField::IdentityPoolId, e))?,
            app_client_id: AppClientId::new(&self.app_client_id)
                .map_err(|e| identifier_error(self, ConfigField::AppClientId, e))?,
            api_name: ApiName::new(&self.api_name)
                .map_err(|e| identifier_error(self, ConfigField::ApiName, e))?,
            api_endpoint: ApiEndpoint::new(&self.api_endpoint)
                .map_err(|e| endpoint_error(self, ConfigField::ApiEndpoint, e))?,
            api_region: region(self, ConfigField::ApiRegion)?,
        })
    }

    /// Every field problem, in declaration order. Empty when the record is valid.
    pub fn issues(&self) -> Vec<ConfigurationError> {
        ConfigField::ALL
            .iter()
            .filter_map(|&field| self.check_field(field).err())
            .collect()
    }

    fn check_field(&self, field: ConfigField) -> Result<(), ConfigurationError> {
        let raw = self.value(field);
        match field {
            ConfigField::Region | ConfigField::AuthRegion | ConfigField::ApiRegion => {
                region(self, field).map(drop)
            }
            ConfigField::IdentityPoolId => IdentityPoolId::new(raw)
                .map(drop)
                .map_err(|e| identifier_error(self, field, e)),
            ConfigField::AppClientId => AppClientId::new(raw)
                .map(drop)
                .map_err(|e| identifier_error(self, field, e)),
            ConfigField::ApiName => ApiName::new(raw)
                .map(drop)
                .map_err(|e| identifier_error(self, field, e)),
            ConfigField::ApiEndpoint => ApiEndpoint::new(raw)
                .map(drop)
                .map_err(|e| endpoint_error(self, field, e)),
        }
    }
}

fn region(record: &ConfigurationRecord, field: ConfigField) -> Result<RegionId, ConfigurationError> {
    RegionId::new(record.value(field)).map_err(|e| identifier_error(record, field, e))
}

fn identifier_error(
    record: &ConfigurationRecord,
    field: ConfigField,
    err: InvalidIdentifier,
) -> ConfigurationError {
    let value = record.value(field).to_string();
    match err {
        InvalidIdentifier::Empty => ConfigurationError::Missing { field },
        InvalidIdentifier::Placeholder => ConfigurationError::Placeholder { field, value },
        InvalidIdentifier::Malformed => ConfigurationError::InvalidRegion { field, value },
    }
}

fn endpoint_error(
    record: &ConfigurationRecord,
    field: ConfigField,
    err: InvalidEndpoint,
) -> ConfigurationError {
    let value = record.value(field).to_string();
    match err {
        InvalidEndpoint::Empty => ConfigurationError::Missing { field },
        InvalidEndpoint::Placeholder => ConfigurationError::Placeholder { field, value },
        other => ConfigurationError::InvalidEndpoint {
            field,
            value,
            reason: other.to_string(),
        },
    }
}

/// A validated Configuration Record.
///
/// Immutable; the only form of the record capabilities ever see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    region: RegionId,
    auth_region: RegionId,
    identity_pool_id: IdentityPoolId,
    app_client_id: AppClientId,
    api_name: ApiName,
    api_endpoint: ApiEndpoint,
    api_region: RegionId,
}

impl DeploymentConfig {
    pub fn region(&self) -> &RegionId {
        &self.region
    }

    pub fn auth_region(&self) -> &RegionId {
        &self.auth_region
    }

    pub fn identity_pool_id(&self) -> &IdentityPoolId {
        &self.identity_pool_id
    }

    pub fn app_client_id(&self) -> &AppClientId {
        &self.app_client_id
    }

    pub fn api_name(&self) -> &ApiName {
        &self.api_name
    }

    pub fn api_endpoint(&self) -> &ApiEndpoint {
        &self.api_endpoint
    }

    pub fn api_region(&self) -> &RegionId {
        &self.api_region
    }

    /// Parameters every sign-in and credential refresh must target.
    pub fn auth_parameters(&self) -> AuthParameters {
        AuthParameters {
            region: self.auth_region.clone(),
            identity_pool_id: self.identity_pool_id.clone(),
            app_client_id: self.app_client_id.clone(),
        }
    }
}

/// Identity pool and app client a sign-in is routed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthParameters {
    pub region: RegionId,
    pub identity_pool_id: IdentityPoolId,
    pub app_client_id: AppClientId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> ConfigurationRecord {
        ConfigurationRecord {
            region: "us-east-1".to_string(),
            auth_region: "us-east-1".to_string(),
            identity_pool_id: "pool123".to_string(),
            app_client_id: "client456".to_string(),
            api_name: "MLNApp".to_string(),
            api_endpoint: "https://api.example.com".to_string(),
            api_region: "us-east-1".to_string(),
        }
    }

    #[test]
    fn valid_record_produces_typed_config() {
        let config = valid_record().validate().unwrap();
        assert_eq!(config.region().as_str(), "us-east-1");
        assert_eq!(config.identity_pool_id().as_str(), "pool123");
        assert_eq!(config.app_client_id().as_str(), "client456");
        assert_eq!(config.api_name().as_str(), "MLNApp");
        assert_eq!(config.api_endpoint().as_url().host_str(), Some("api.example.com"));
    }

    #[test]
    fn default_record_is_the_unconfigured_placeholder_record() {
        let err = ConfigurationRecord::default().validate().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::Placeholder {
                field: ConfigField::Region,
                value: "<AWS_REGION>".to_string(),
            }
        );
    }

    #[test]
    fn issues_lists_every_placeholder_field() {
        let fields: Vec<_> = ConfigurationRecord::default()
            .issues()
            .iter()
            .map(ConfigurationError::field)
            .collect();
        assert_eq!(
            fields,
            vec![
                ConfigField::Region,
                ConfigField::AuthRegion,
                ConfigField::IdentityPoolId,
                ConfigField::AppClientId,
                ConfigField::ApiEndpoint,
                ConfigField::ApiRegion,
            ],
            "api_name ships with a real value and must not be reported"
        );
    }

    #[test]
    fn issues_is_empty_for_valid_record() {
        assert!(valid_record().issues().is_empty());
    }

    #[test]
    fn validate_reports_first_failing_field() {
        let mut record = valid_record();
        record.app_client_id = String::new();
        record.api_endpoint = "not a url".to_string();

        assert_eq!(
            record.validate(),
            Err(ConfigurationError::Missing {
                field: ConfigField::AppClientId
            })
        );
    }

    #[test]
    fn validate_rejects_non_http_endpoint() {
        let mut record = valid_record();
        record.api_endpoint = "ftp://api.example.com".to_string();

        let err = record.validate().unwrap_err();
        assert!(
            matches!(err, ConfigurationError::InvalidEndpoint { field: ConfigField::ApiEndpoint, .. }),
            "got: {err:?}"
        );
    }

    #[test]
    fn validate_rejects_malformed_region() {
        let mut record = valid_record();
        record.api_region = "US East".to_string();

        assert_eq!(
            record.validate(),
            Err(ConfigurationError::InvalidRegion {
                field: ConfigField::ApiRegion,
                value: "US East".to_string(),
            })
        );
    }

    #[test]
    fn auth_parameters_carry_pool_and_client() {
        let params = valid_record().validate().unwrap().auth_parameters();
        assert_eq!(params.identity_pool_id.as_str(), "pool123");
        assert_eq!(params.app_client_id.as_str(), "client456");
        assert_eq!(params.region.as_str(), "us-east-1");
    }

    #[test]
    fn aws_exports_document_maps_to_record() {
        let json = r#"{
            "aws_project_region": "us-east-1",
            "aws_cognito_region": "us-east-1",
            "aws_user_pools_id": "pool123",
            "aws_user_pools_web_client_id": "client456",
            "oauth": {},
            "aws_cloud_logic_custom": [
                {"name": "MLNApp", "endpoint": "https://api.example.com", "region": "us-east-1"}
            ]
        }"#;

        let record = ConfigurationRecord::from_aws_exports_json(json).unwrap();
        assert_eq!(record, valid_record());
    }

    #[test]
    fn aws_exports_template_fails_validation() {
        let json = r#"{
            "aws_project_region": "<AWS_REGION>",
            "aws_cognito_region": "<AWS_REGION>",
            "aws_user_pools_id": "<COGNITO_USER_POOL_ID>",
            "aws_user_pools_web_client_id": "<APP_CLIENT_ID>",
            "oauth": {},
            "aws_cloud_logic_custom": [
                {"name": "MLNApp", "endpoint": "<API_GATEWAY_URL>", "region": "<AWS_REGION>"}
            ]
        }"#;

        let record = ConfigurationRecord::from_aws_exports_json(json).unwrap();
        assert_eq!(record, ConfigurationRecord::default());
    }

    #[test]
    fn aws_exports_without_api_reports_missing_api_name() {
        let json = r#"{
            "aws_project_region": "us-east-1",
            "aws_cognito_region": "us-east-1",
            "aws_user_pools_id": "pool123",
            "aws_user_pools_web_client_id": "client456",
            "aws_cloud_logic_custom": []
        }"#;

        let record = ConfigurationRecord::from_aws_exports_json(json).unwrap();
        assert_eq!(
            record.validate(),
            Err(ConfigurationError::Missing {
                field: ConfigField::ApiName
            })
        );
    }
}
