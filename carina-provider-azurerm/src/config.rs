//! Provider configuration
//!
//! Built from the attributes of the `provider azurerm { ... }` block.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use carina_core::resource::Value;

/// Error raised when the provider block cannot be interpreted
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown Azure environment '{0}', expected one of: public, china, usgovernment, german")]
    UnknownEnvironment(String),

    #[error("Provider attribute '{name}' must be a {expected}")]
    InvalidType {
        name: &'static str,
        expected: &'static str,
    },
}

/// Azure cloud the provider talks to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CloudEnvironment {
    #[default]
    Public,
    China,
    UsGovernment,
    German,
}

impl CloudEnvironment {
    /// Environment name as used by the Azure SDKs
    pub fn name(&self) -> &'static str {
        match self {
            CloudEnvironment::Public => "AzurePublicCloud",
            CloudEnvironment::China => "AzureChinaCloud",
            CloudEnvironment::UsGovernment => "AzureUSGovernmentCloud",
            CloudEnvironment::German => "AzureGermanCloud",
        }
    }
}

impl fmt::Display for CloudEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CloudEnvironment {
    type Err = ConfigError;

    /// Accepts short names ("china") and SDK names ("AzureChinaCloud"), case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" | "azurepubliccloud" => Ok(CloudEnvironment::Public),
            "china" | "azurechinacloud" => Ok(CloudEnvironment::China),
            "usgovernment" | "azureusgovernmentcloud" => Ok(CloudEnvironment::UsGovernment),
            "german" | "azuregermancloud" => Ok(CloudEnvironment::German),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Azure provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AzureConfig {
    pub environment: CloudEnvironment,
}

impl AzureConfig {
    /// Build the configuration from a provider block's attributes
    pub fn from_attributes(attributes: &HashMap<String, Value>) -> Result<Self, ConfigError> {
        let environment = match attributes.get("environment") {
            None => CloudEnvironment::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(_) => {
                return Err(ConfigError::InvalidType {
                    name: "environment",
                    expected: "string",
                });
            }
        };
        Ok(Self { environment })
    }
}
