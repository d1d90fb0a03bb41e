//! Managed cluster payload types exchanged with the Azure container service API
//!
//! Only the add-on profile part of a managed cluster is modelled here; the
//! SDK client sends and receives these as part of the full cluster payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Add-on profiles keyed by add-on name (e.g., "omsagent")
///
/// Keys are compared case-insensitively on read since the service does not
/// preserve the casing it was sent.
pub type AddonProfiles = BTreeMap<String, ManagedClusterAddonProfile>;

/// A single add-on profile of a managed cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedClusterAddonProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, Option<String>>>,
    /// Identity the service assigns to the add-on (read-only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<UserAssignedIdentity>,
}

impl ManagedClusterAddonProfile {
    pub fn disabled() -> Self {
        Self {
            enabled: Some(false),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignedIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_profile_serializes_without_config() {
        let json = serde_json::to_value(ManagedClusterAddonProfile::disabled()).unwrap();
        assert_eq!(json, serde_json::json!({ "enabled": false }));
    }

    #[test]
    fn deserialize_read_response() {
        let profiles: AddonProfiles = serde_json::from_value(serde_json::json!({
            "omsAgent": {
                "enabled": true,
                "config": { "logAnalyticsWorkspaceResourceID": "/subscriptions/s1/resourceGroups/rg/providers/Microsoft.OperationalInsights/workspaces/w1" },
                "identity": {
                    "resourceId": "/subscriptions/s1/resourceGroups/mc/providers/Microsoft.ManagedIdentity/userAssignedIdentities/omsagent-aks",
                    "clientId": "c1",
                    "objectId": "o1"
                }
            },
            "kubeDashboard": { "enabled": false, "config": null }
        }))
        .unwrap();

        let oms = &profiles["omsAgent"];
        assert_eq!(oms.enabled, Some(true));
        assert_eq!(
            oms.identity.as_ref().and_then(|i| i.client_id.as_deref()),
            Some("c1")
        );
        assert_eq!(profiles["kubeDashboard"].config, None);
    }
}
