//! Azure resource schema definitions

pub mod kubernetes_cluster;
pub mod types;

use carina_core::schema::ResourceSchema;

/// Returns all Azure schemas
pub fn all_schemas() -> Vec<ResourceSchema> {
    let mut schemas = Vec::new();
    schemas.extend(kubernetes_cluster::schemas());
    schemas
}
