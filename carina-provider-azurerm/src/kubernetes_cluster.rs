//! Managed Kubernetes cluster resource
//!
//! Wires the `addon_profile` attribute of a cluster resource to the add-on
//! profiles of the create/update request and of the read response.

use carina_core::provider::ResourceType;
use carina_core::resource::{Resource, State, Value};
use carina_core::schema::ResourceSchema;

use crate::addons::{AddonError, expand_addon_profiles_for_environment, flatten_addon_profiles};
use crate::config::AzureConfig;
use crate::containerservice::AddonProfiles;
use crate::schemas::kubernetes_cluster::{ADDON_PROFILE, RESOURCE_TYPE, cluster_schema};

/// Kubernetes cluster resource type
pub struct KubernetesClusterType;

impl ResourceType for KubernetesClusterType {
    fn name(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn schema(&self) -> ResourceSchema {
        cluster_schema()
    }
}

/// Add-on profiles to send when creating or updating the cluster
pub fn addon_profiles_for_request(
    resource: &Resource,
    config: &AzureConfig,
) -> Result<AddonProfiles, AddonError> {
    let input = resource
        .attributes
        .get(ADDON_PROFILE)
        .and_then(Value::as_list)
        .unwrap_or_default();
    expand_addon_profiles_for_environment(input, config.environment)
}

/// Record the add-on profiles of a read response in the cluster state
///
/// A response without add-on profiles leaves `addon_profile` empty.
pub fn set_addon_profiles_on_state(state: &mut State, profiles: Option<&AddonProfiles>) {
    let flattened = profiles.map(flatten_addon_profiles).unwrap_or_default();
    state
        .attributes
        .insert(ADDON_PROFILE.to_string(), Value::List(flattened));
}
