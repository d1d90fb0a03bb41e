//! Carina Azure Provider
//!
//! Azure Resource Manager provider implementation.
//!
//! ## Module Structure
//!
//! - `addons` - Add-on profile conversion for managed Kubernetes clusters
//! - `config` - Provider configuration (target cloud environment)
//! - `containerservice` - Managed cluster payload types
//! - `kubernetes_cluster` - `azurerm.kubernetes_cluster` resource type
//! - `schemas` - Resource schemas

pub mod addons;
pub mod config;
pub mod containerservice;
pub mod kubernetes_cluster;
pub mod schemas;

// Re-export main types
pub use addons::{AddonError, expand_addon_profiles, flatten_addon_profiles};
pub use config::{AzureConfig, CloudEnvironment, ConfigError};
pub use containerservice::{AddonProfiles, ManagedClusterAddonProfile};

use carina_core::provider::ResourceType;

/// Returns all resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![Box::new(kubernetes_cluster::KubernetesClusterType)]
}
