//! Document model consumed by the validators.
//!
//! Documents arrive already parsed. This module only provides the tree
//! representation the engine walks, plus conversions from and to
//! `serde_json::Value` so that any serde format can produce a `Node`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Key/value body of a map node.
///
/// Key order carries no meaning; a sorted map keeps rendered fragments stable.
pub type NodeMap = BTreeMap<String, Node>;

/// A node in a JSON-shaped document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Null/absent value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Ordered sequence of nodes
    List(Vec<Node>),
    /// String-keyed map of nodes
    Map(NodeMap),
}

impl Node {
    /// Returns true if this node is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Returns the type name of this node.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Int(_) => "integer",
            Node::Float(_) => "float",
            Node::String(_) => "string",
            Node::List(_) => "array",
            Node::Map(_) => "object",
        }
    }

    /// Attempts to get this node as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this node as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get this node as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this node as a float. Integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Float(f) => Some(*f),
            Node::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this node as a list.
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to get this node as a map.
    pub fn as_map(&self) -> Option<&NodeMap> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` when this node is a map.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Compares two nodes treating integers and floats as one numeric domain.
    ///
    /// `Int(1)` and `Float(1.0)` are equal here while `PartialEq` keeps them
    /// apart.
    pub fn loosely_equals(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Int(_) | Node::Float(_), Node::Int(_) | Node::Float(_)) => {
                self.as_f64() == other.as_f64()
            }
            (Node::List(a), Node::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loosely_equals(y))
            }
            (Node::Map(a), Node::Map(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| v.loosely_equals(w)))
            }
            _ => self == other,
        }
    }

    /// Renders the compact JSON snapshot attached to validation errors.
    pub fn to_fragment(&self) -> String {
        Value::from(self).to_string()
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Int(i),
                None => Node::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::List(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Int(i) => Value::Number((*i).into()),
            Node::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Node::String(s) => Value::String(s.clone()),
            Node::List(items) => Value::Array(items.iter().map(Value::from).collect()),
            Node::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::from)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Int(i)
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Float(f)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::List(items)
    }
}

impl From<NodeMap> for Node {
    fn from(map: NodeMap) -> Self {
        Node::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_node_types() {
        assert_eq!(Node::Null.type_name(), "null");
        assert_eq!(Node::from("x").type_name(), "string");
        assert_eq!(Node::Int(4).type_name(), "integer");
        assert_eq!(Node::Float(0.5).type_name(), "float");
        assert_eq!(Node::Bool(false).type_name(), "boolean");
        assert_eq!(Node::List(vec![]).type_name(), "array");
        assert_eq!(Node::Map(NodeMap::new()).type_name(), "object");
    }

    #[test]
    fn test_from_json_keeps_integers_apart_from_floats() {
        let node = Node::from(json!({"a": 1, "b": 1.5, "c": [true, null]}));
        assert_eq!(node.get("a"), Some(&Node::Int(1)));
        assert_eq!(node.get("b"), Some(&Node::Float(1.5)));
        assert_eq!(
            node.get("c"),
            Some(&Node::List(vec![Node::Bool(true), Node::Null]))
        );
    }

    #[test]
    fn test_as_f64_widens_integers() {
        assert_eq!(Node::Int(3).as_f64(), Some(3.0));
        assert_eq!(Node::from("3").as_f64(), None);
    }

    #[test]
    fn test_loose_equality() {
        assert!(Node::Int(1).loosely_equals(&Node::Float(1.0)));
        assert!(!Node::Int(1).loosely_equals(&Node::from("1")));
        assert!(
            Node::List(vec![Node::Int(2)]).loosely_equals(&Node::List(vec![Node::Float(2.0)]))
        );
    }

    #[test]
    fn test_fragment_is_sorted_compact_json() {
        let node = Node::from(json!({"b": 2, "a": "x"}));
        assert_eq!(node.to_fragment(), r#"{"a":"x","b":2}"#);
    }

    #[test]
    fn test_deserialize_through_serde() {
        let node: Node = serde_json::from_str(r#"{"lat": 43.7, "tags": ["a"]}"#).unwrap();
        assert_eq!(node.get("lat").and_then(Node::as_f64), Some(43.7));
        assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"lat":43.7,"tags":["a"]}"#);
    }
}
