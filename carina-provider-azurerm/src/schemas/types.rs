//! Azure-specific type definitions

use carina_core::resource::Value;
use carina_core::schema::AttributeType;

/// Azure resource ID type
/// Accepts IDs like `/subscriptions/{id}/resourceGroups/{rg}/providers/{ns}/{type}/{name}`
pub fn azure_resource_id() -> AttributeType {
    AttributeType::Custom {
        name: "ResourceId".to_string(),
        validate: |value| {
            if let Value::String(s) = value {
                validate_resource_id(s)
            } else {
                Err("Expected string".to_string())
            }
        },
    }
}

/// Validate that a string is a well-formed Azure resource ID
pub fn validate_resource_id(id: &str) -> Result<(), String> {
    let Some(path) = id.strip_prefix('/') else {
        return Err(format!("Invalid resource ID '{}': must start with '/'", id));
    };

    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(format!("Invalid resource ID '{}': contains an empty segment", id));
    }
    if !segments[0].eq_ignore_ascii_case("subscriptions") {
        return Err(format!(
            "Invalid resource ID '{}': must start with '/subscriptions/'",
            id
        ));
    }
    // IDs are a sequence of key/value pairs
    if segments.len() % 2 != 0 {
        return Err(format!(
            "Invalid resource ID '{}': expected an even number of segments",
            id
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_id_accepts_workspace_id() {
        let t = azure_resource_id();
        assert!(
            t.validate(&Value::String(
                "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/rg1/providers/Microsoft.OperationalInsights/workspaces/w1".to_string()
            ))
            .is_ok()
        );
    }

    #[test]
    fn resource_id_is_case_insensitive_on_prefix() {
        assert!(validate_resource_id("/Subscriptions/s1").is_ok());
    }

    #[test]
    fn resource_id_rejects_missing_leading_slash() {
        let err = validate_resource_id("subscriptions/s1").unwrap_err();
        assert!(err.contains("must start with '/'"));
    }

    #[test]
    fn resource_id_rejects_odd_segments() {
        assert!(validate_resource_id("/subscriptions/s1/resourceGroups").is_err());
    }

    #[test]
    fn resource_id_rejects_empty_segment() {
        assert!(validate_resource_id("/subscriptions//resourceGroups/rg1").is_err());
        assert!(validate_resource_id("/subscriptions/s1/").is_err());
    }

    #[test]
    fn resource_id_rejects_other_roots() {
        assert!(validate_resource_id("/tenants/t1").is_err());
    }

    #[test]
    fn resource_id_rejects_non_string() {
        assert!(azure_resource_id().validate(&Value::Bool(true)).is_err());
    }
}
