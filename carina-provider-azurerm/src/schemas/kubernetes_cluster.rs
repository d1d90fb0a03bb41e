//! Kubernetes cluster schema definition

use carina_core::schema::{AttributeSchema, AttributeType, BlockSchema, ResourceSchema};

use super::types;
use crate::addons::{ADDONS, AddonConfig};

pub const RESOURCE_TYPE: &str = "azurerm.kubernetes_cluster";
pub const ADDON_PROFILE: &str = "addon_profile";

/// Returns the schema for managed Kubernetes clusters
pub fn cluster_schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("A managed Kubernetes cluster (AKS)")
        .attribute(AttributeSchema::new("name", AttributeType::String).required())
        .attribute(AttributeSchema::new("location", AttributeType::String).required())
        .attribute(AttributeSchema::new("resource_group_name", AttributeType::String).required())
        .attribute(
            AttributeSchema::new("dns_prefix", AttributeType::String)
                .with_description("DNS prefix used for the cluster's API server FQDN"),
        )
        .attribute(
            AttributeSchema::new("kubernetes_version", AttributeType::String)
                .with_description("Kubernetes version (defaults to the latest supported)"),
        )
        .attribute(
            AttributeSchema::new(ADDON_PROFILE, addon_profile_block())
                .with_description("Add-ons enabled on the cluster"),
        )
}

/// The `addon_profile` block: at most one, holding one sub-block per add-on
pub fn addon_profile_block() -> AttributeType {
    let block = ADDONS
        .iter()
        .fold(BlockSchema::new().max_items(1), |block, addon| {
            block.attribute(
                AttributeSchema::new(addon.block_name, addon_block(addon))
                    .with_provider_name(addon.key),
            )
        });
    AttributeType::Block(block)
}

fn addon_block(addon: &AddonConfig) -> AttributeType {
    let mut block = BlockSchema::new()
        .max_items(1)
        .attribute(AttributeSchema::new("enabled", AttributeType::Bool).required());

    for (dsl_name, config_key, computed) in addon.config {
        // Attributes named `*_id` hold Azure resource IDs
        let attr_type = if dsl_name.ends_with("_id") {
            types::azure_resource_id()
        } else {
            AttributeType::String
        };
        let mut attr = AttributeSchema::new(*dsl_name, attr_type).with_provider_name(*config_key);
        if *computed {
            attr = attr.computed();
        }
        block = block.attribute(attr);
    }

    if let Some(identity_block) = addon.identity_block {
        block = block.attribute(
            AttributeSchema::new(identity_block, identity_block_type())
                .computed()
                .with_description("Identity assigned to the add-on by the service"),
        );
    }

    AttributeType::Block(block)
}

fn identity_block_type() -> AttributeType {
    AttributeType::Block(
        ["client_id", "object_id", "user_assigned_identity_id"]
            .into_iter()
            .fold(BlockSchema::new(), |block, name| {
                block.attribute(AttributeSchema::new(name, AttributeType::String).computed())
            }),
    )
}

/// Returns all Kubernetes-related schemas
pub fn schemas() -> Vec<ResourceSchema> {
    vec![cluster_schema()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use carina_core::resource::Value;
    use carina_core::schema::TypeError;
    use std::collections::HashMap;

    fn block(entries: &[(&str, Value)]) -> Value {
        Value::List(vec![Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )])
    }

    fn cluster_attrs(addon_profile: Value) -> HashMap<String, Value> {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("aks".to_string()));
        attrs.insert("location".to_string(), Value::String("westeurope".to_string()));
        attrs.insert(
            "resource_group_name".to_string(),
            Value::String("rg1".to_string()),
        );
        attrs.insert(ADDON_PROFILE.to_string(), addon_profile);
        attrs
    }

    #[test]
    fn valid_cluster_with_addons() {
        let schema = cluster_schema();
        let attrs = cluster_attrs(block(&[
            (
                "oms_agent",
                block(&[
                    ("enabled", Value::Bool(true)),
                    (
                        "log_analytics_workspace_id",
                        Value::String(
                            "/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.OperationalInsights/workspaces/w1"
                                .to_string(),
                        ),
                    ),
                ]),
            ),
            ("kube_dashboard", block(&[("enabled", Value::Bool(false))])),
        ]));

        assert!(schema.validate(&attrs).is_ok());
    }

    #[test]
    fn addon_profile_is_optional() {
        let schema = cluster_schema();
        let mut attrs = cluster_attrs(Value::List(vec![]));
        assert!(schema.validate(&attrs).is_ok());

        attrs.remove(ADDON_PROFILE);
        assert!(schema.validate(&attrs).is_ok());
    }

    #[test]
    fn addon_requires_enabled() {
        let schema = cluster_schema();
        let attrs = cluster_attrs(block(&[(
            "aci_connector_linux",
            block(&[("subnet_name", Value::String("aci".to_string()))]),
        )]));

        let errors = schema.validate(&attrs).unwrap_err();
        assert!(errors[0].to_string().contains("'enabled' is missing"));
    }

    #[test]
    fn rejects_second_addon_profile_block() {
        let schema = cluster_schema();
        let single = block(&[("azure_policy", block(&[("enabled", Value::Bool(true))]))]);
        let Value::List(mut items) = single else {
            unreachable!()
        };
        items.push(items[0].clone());

        let errors = schema.validate(&cluster_attrs(Value::List(items))).unwrap_err();
        match &errors[0] {
            TypeError::AttributeError { name, inner } => {
                assert_eq!(name, ADDON_PROFILE);
                assert!(matches!(**inner, TypeError::TooManyItems { max: 1, got: 2 }));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_computed_zone_name() {
        let schema = cluster_schema();
        let attrs = cluster_attrs(block(&[(
            "http_application_routing",
            block(&[
                ("enabled", Value::Bool(true)),
                (
                    "http_application_routing_zone_name",
                    Value::String("abc.eastus.aksapp.io".to_string()),
                ),
            ]),
        )]));

        let errors = schema.validate(&attrs).unwrap_err();
        assert!(
            errors[0]
                .to_string()
                .contains("'http_application_routing_zone_name' is computed")
        );
    }

    #[test]
    fn rejects_invalid_workspace_id() {
        let schema = cluster_schema();
        let attrs = cluster_attrs(block(&[(
            "oms_agent",
            block(&[
                ("enabled", Value::Bool(true)),
                (
                    "log_analytics_workspace_id",
                    Value::String("w1".to_string()),
                ),
            ]),
        )]));

        assert!(schema.validate(&attrs).is_err());
    }

    #[test]
    fn addon_blocks_carry_api_names() {
        let AttributeType::Block(block) = addon_profile_block() else {
            panic!("addon_profile must be a block");
        };
        assert_eq!(block.attributes.len(), ADDONS.len());
        assert_eq!(
            block.attributes["oms_agent"].provider_name.as_deref(),
            Some("omsagent")
        );

        let AttributeType::Block(aci) = &block.attributes["aci_connector_linux"].attr_type else {
            panic!("aci_connector_linux must be a block");
        };
        assert_eq!(
            aci.attributes["subnet_name"].provider_name.as_deref(),
            Some("SubnetName")
        );
    }
}
