//! Resource - Representing resources and their state

use std::collections::HashMap;

/// Unique identifier for a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    /// Resource type (e.g., "azurerm.kubernetes_cluster")
    pub resource_type: String,
    /// Resource name (identifier specified in DSL)
    pub name: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }
}

/// Attribute value of a resource
///
/// Nested blocks are represented as a `List` of `Map`s, so a block declared
/// at most once is either an empty list or a single-element list.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the single block of a `max_items = 1` nested block, if set.
    ///
    /// An empty list, a non-list value or a first element that is not a map
    /// all count as "not set".
    pub fn single_block(&self) -> Option<&HashMap<String, Value>> {
        self.as_list()?.first()?.as_map()
    }
}

/// Desired state declared in DSL
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub attributes: HashMap<String, Value>,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(resource_type, name),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// Current state fetched from actual infrastructure
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub id: ResourceId,
    pub attributes: HashMap<String, Value>,
}

impl State {
    pub fn existing(id: ResourceId, attributes: HashMap<String, Value>) -> Self {
        Self { id, attributes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_of_one_element_list() {
        let mut block = HashMap::new();
        block.insert("enabled".to_string(), Value::Bool(true));
        let value = Value::List(vec![Value::Map(block.clone())]);

        assert_eq!(value.single_block(), Some(&block));
    }

    #[test]
    fn single_block_absent() {
        assert!(Value::List(vec![]).single_block().is_none());
        assert!(Value::Bool(true).single_block().is_none());
        assert!(
            Value::List(vec![Value::String("x".to_string())])
                .single_block()
                .is_none()
        );
    }
}
