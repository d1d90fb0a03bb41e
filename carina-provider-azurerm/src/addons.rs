//! Add-on profiles of a managed Kubernetes cluster
//!
//! Converts between the `addon_profile` block of `azurerm.kubernetes_cluster`
//! and the API's map of named add-on profiles.
//!
//! - `expand_addon_profiles` always produces an entry for every known add-on,
//!   explicitly disabling the ones that are not declared.
//! - `flatten_addon_profiles` looks add-ons up case-insensitively, since the
//!   service changes the casing of the keys it returns between calls.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use carina_core::resource::Value;
use log::{debug, warn};

use crate::config::CloudEnvironment;
use crate::containerservice::{AddonProfiles, ManagedClusterAddonProfile, UserAssignedIdentity};

pub const ACI_CONNECTOR_KEY: &str = "aciConnectorLinux";
pub const AZURE_POLICY_KEY: &str = "azurepolicy";
pub const KUBE_DASHBOARD_KEY: &str = "kubeDashboard";
pub const HTTP_APPLICATION_ROUTING_KEY: &str = "httpApplicationRouting";
pub const OMS_AGENT_KEY: &str = "omsagent";

/// Config mapping: (dsl_name, config_key, is_computed)
pub type ConfigMapping = (&'static str, &'static str, bool);

/// Add-on configuration
pub struct AddonConfig {
    /// Sub-block name inside `addon_profile` (e.g., "oms_agent")
    pub block_name: &'static str,
    /// Canonical add-on key in the API (e.g., "omsagent")
    pub key: &'static str,
    /// String attributes stored in the profile's config map
    pub config: &'static [ConfigMapping],
    /// Computed block exposing the identity the service assigned to the add-on
    pub identity_block: Option<&'static str>,
}

pub const ADDONS: [AddonConfig; 5] = [
    AddonConfig {
        block_name: "aci_connector_linux",
        key: ACI_CONNECTOR_KEY,
        config: &[("subnet_name", "SubnetName", false)],
        identity_block: None,
    },
    AddonConfig {
        block_name: "azure_policy",
        key: AZURE_POLICY_KEY,
        config: &[],
        identity_block: None,
    },
    AddonConfig {
        block_name: "kube_dashboard",
        key: KUBE_DASHBOARD_KEY,
        config: &[],
        identity_block: None,
    },
    AddonConfig {
        block_name: "http_application_routing",
        key: HTTP_APPLICATION_ROUTING_KEY,
        config: &[(
            "http_application_routing_zone_name",
            "HTTPApplicationRoutingZoneName",
            true,
        )],
        identity_block: None,
    },
    AddonConfig {
        block_name: "oms_agent",
        key: OMS_AGENT_KEY,
        config: &[(
            "log_analytics_workspace_id",
            "logAnalyticsWorkspaceResourceID",
            false,
        )],
        identity_block: Some("oms_agent_identity"),
    },
];

/// Error raised when the declared add-ons cannot be sent to the target cloud
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddonError {
    #[error("The add-on '{addon}' is not supported for a Kubernetes Cluster located in '{environment}'")]
    UnsupportedInEnvironment {
        addon: &'static str,
        environment: CloudEnvironment,
    },
}

/// Add-ons the given cloud does not offer
pub fn unsupported_addons(environment: CloudEnvironment) -> &'static [&'static str] {
    match environment {
        CloudEnvironment::China => &[
            ACI_CONNECTOR_KEY,
            AZURE_POLICY_KEY,
            HTTP_APPLICATION_ROUTING_KEY,
        ],
        CloudEnvironment::UsGovernment => &[AZURE_POLICY_KEY, HTTP_APPLICATION_ROUTING_KEY],
        CloudEnvironment::Public | CloudEnvironment::German => &[],
    }
}

/// Convert the `addon_profile` block list into API add-on profiles
///
/// The result always holds all five add-ons; any add-on not declared is
/// sent as explicitly disabled. Computed attributes are never sent.
pub fn expand_addon_profiles(input: &[Value]) -> AddonProfiles {
    let block = input.first().and_then(Value::as_map);

    let profiles: AddonProfiles = ADDONS
        .iter()
        .map(|addon| {
            let profile = block
                .and_then(|b| b.get(addon.block_name))
                .and_then(Value::single_block)
                .map(|sub| expand_addon(addon, sub))
                .unwrap_or_else(ManagedClusterAddonProfile::disabled);
            (addon.key.to_string(), profile)
        })
        .collect();

    debug!(
        "Expanded add-on profiles, enabled: [{}]",
        enabled_keys(&profiles).join(", ")
    );
    profiles
}

fn expand_addon(addon: &AddonConfig, block: &HashMap<String, Value>) -> ManagedClusterAddonProfile {
    let enabled = block
        .get("enabled")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let config: BTreeMap<String, Option<String>> = addon
        .config
        .iter()
        .filter(|(_, _, computed)| !computed)
        .filter_map(|(dsl_name, config_key, _)| {
            let value = block.get(*dsl_name)?.as_str()?;
            (!value.is_empty()).then(|| (config_key.to_string(), Some(value.to_string())))
        })
        .collect();

    ManagedClusterAddonProfile {
        enabled: Some(enabled),
        config: (!config.is_empty()).then_some(config),
        identity: None,
    }
}

/// Expand add-on profiles and drop those the target cloud does not offer
pub fn expand_addon_profiles_for_environment(
    input: &[Value],
    environment: CloudEnvironment,
) -> Result<AddonProfiles, AddonError> {
    filter_unsupported_addons(expand_addon_profiles(input), environment)
}

/// Remove add-ons the cloud does not offer from a request payload
///
/// A disabled unsupported add-on is simply left out; an enabled one is an error.
pub fn filter_unsupported_addons(
    mut profiles: AddonProfiles,
    environment: CloudEnvironment,
) -> Result<AddonProfiles, AddonError> {
    for &key in unsupported_addons(environment) {
        let Some(profile) = profiles.remove(key) else {
            continue;
        };
        if profile.enabled == Some(true) {
            return Err(AddonError::UnsupportedInEnvironment {
                addon: key,
                environment,
            });
        }
        debug!("Omitting add-on '{}' unsupported in {}", key, environment);
    }
    Ok(profiles)
}

/// Convert API add-on profiles into the `addon_profile` block list
///
/// Returns an empty list when none of the known add-ons is present, rather
/// than a single block whose sub-blocks are all empty.
pub fn flatten_addon_profiles(profiles: &AddonProfiles) -> Vec<Value> {
    let index = FoldedKeyIndex::new(profiles);

    let mut found = false;
    let block: HashMap<String, Value> = ADDONS
        .iter()
        .map(|addon| {
            let items = match index.locate(addon.key) {
                Some(profile) => {
                    found = true;
                    vec![flatten_addon(addon, profile)]
                }
                None => Vec::new(),
            };
            (addon.block_name.to_string(), Value::List(items))
        })
        .collect();

    if !found {
        return Vec::new();
    }
    vec![Value::Map(block)]
}

fn flatten_addon(addon: &AddonConfig, profile: &ManagedClusterAddonProfile) -> Value {
    let mut block = HashMap::new();
    block.insert(
        "enabled".to_string(),
        Value::Bool(profile.enabled.unwrap_or(false)),
    );

    for (dsl_name, config_key, _) in addon.config {
        let value = locate_in_config(profile.config.as_ref(), config_key).unwrap_or_default();
        block.insert(dsl_name.to_string(), Value::String(value.to_string()));
    }

    if let Some(identity_block) = addon.identity_block {
        let identities = profile
            .identity
            .as_ref()
            .map(flatten_identity)
            .into_iter()
            .collect();
        block.insert(identity_block.to_string(), Value::List(identities));
    }

    Value::Map(block)
}

fn flatten_identity(identity: &UserAssignedIdentity) -> Value {
    let field = |v: &Option<String>| Value::String(v.clone().unwrap_or_default());
    Value::Map(HashMap::from([
        ("client_id".to_string(), field(&identity.client_id)),
        ("object_id".to_string(), field(&identity.object_id)),
        (
            "user_assigned_identity_id".to_string(),
            field(&identity.resource_id),
        ),
    ]))
}

/// Look up a config value, falling back to a case-insensitive match
fn locate_in_config<'a>(
    config: Option<&'a BTreeMap<String, Option<String>>>,
    key: &str,
) -> Option<&'a str> {
    let config = config?;
    let value = match config.get(key) {
        Some(v) => v,
        None => {
            let folded = key.to_lowercase();
            config
                .iter()
                .find(|(k, _)| k.to_lowercase() == folded)
                .map(|(_, v)| v)?
        }
    };
    value.as_deref()
}

fn enabled_keys(profiles: &AddonProfiles) -> Vec<&str> {
    profiles
        .iter()
        .filter(|(_, p)| p.enabled == Some(true))
        .map(|(k, _)| k.as_str())
        .collect()
}

fn is_canonical_key(key: &str) -> bool {
    ADDONS.iter().any(|addon| addon.key == key)
}

/// Index from case-folded key to the key as the service returned it
///
/// When several keys fold to the same value, the one spelled exactly as the
/// canonical key wins; otherwise the first in map order is kept.
struct FoldedKeyIndex<'a> {
    profiles: &'a AddonProfiles,
    keys: HashMap<String, &'a str>,
    /// Pairs of keys that fold to the same value, in map order
    conflicts: Vec<(&'a str, &'a str)>,
}

impl<'a> FoldedKeyIndex<'a> {
    fn new(profiles: &'a AddonProfiles) -> Self {
        let mut keys: HashMap<String, &'a str> = HashMap::new();
        let mut conflicts = Vec::new();
        for key in profiles.keys() {
            match keys.entry(key.to_lowercase()) {
                Entry::Vacant(e) => {
                    e.insert(key);
                }
                Entry::Occupied(mut e) => {
                    conflicts.push((*e.get(), key.as_str()));
                    if is_canonical_key(key) {
                        e.insert(key);
                    }
                }
            }
        }
        for (first, second) in &conflicts {
            warn!(
                "Add-on profiles contain keys differing only by case: '{}' and '{}'",
                first, second
            );
        }
        Self {
            profiles,
            keys,
            conflicts,
        }
    }

    fn locate(&self, key: &str) -> Option<&'a ManagedClusterAddonProfile> {
        let original = self.keys.get(&key.to_lowercase())?;
        self.profiles.get(*original)
    }
}
