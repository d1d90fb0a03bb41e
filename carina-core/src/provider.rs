//! Provider - Traits describing what a provider can manage
//!
//! A provider exposes a set of resource types, each with the schema its
//! attributes are validated against before any cloud API call is made.

use crate::schema::ResourceSchema;

/// Definition of resource types that a Provider can handle
pub trait ResourceType: Send + Sync {
    /// Resource type name (e.g., "azurerm.kubernetes_cluster")
    fn name(&self) -> &'static str;

    /// Attribute schema for this resource type
    fn schema(&self) -> ResourceSchema;
}

/// Find a resource type by name
pub fn find_resource_type<'a>(
    types: &'a [Box<dyn ResourceType>],
    name: &str,
) -> Option<&'a dyn ResourceType> {
    types.iter().find(|t| t.name() == name).map(|t| t.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeSchema, AttributeType};

    struct MockType;

    impl ResourceType for MockType {
        fn name(&self) -> &'static str {
            "mock.thing"
        }

        fn schema(&self) -> ResourceSchema {
            ResourceSchema::new(self.name())
                .attribute(AttributeSchema::new("name", AttributeType::String).required())
        }
    }

    #[test]
    fn find_resource_type_by_name() {
        let types: Vec<Box<dyn ResourceType>> = vec![Box::new(MockType)];
        let found = find_resource_type(&types, "mock.thing").unwrap();
        assert_eq!(found.schema().resource_type, "mock.thing");
        assert!(find_resource_type(&types, "mock.other").is_none());
    }
}
