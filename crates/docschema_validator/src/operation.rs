//! API operations and the schemas guarding them.

use docschema_core::SchemaError;
use std::fmt;
use std::str::FromStr;

/// Operations exposed by the route optimisation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Shortest path between two nodes, as an itinerary
    ShortestPath,
    /// Shortest path between two nodes, as a GeoJSON feature collection
    ShortestPathGeojson,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 2] = [Operation::ShortestPath, Operation::ShortestPathGeojson];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::ShortestPath => "shortest_path",
            Operation::ShortestPathGeojson => "shortest_path_geojson",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Operation::ShortestPath => "Computes the shortest path between two nodes",
            Operation::ShortestPathGeojson => {
                "Computes the shortest path between two nodes and returns it as GeoJSON"
            }
        }
    }

    /// Registry name of the request body schema.
    pub fn request_schema(&self) -> &'static str {
        "request"
    }

    /// Registry name of the response body schema.
    pub fn response_schema(&self) -> &'static str {
        match self {
            Operation::ShortestPath => "response",
            Operation::ShortestPathGeojson => "geojson_feature_collection",
        }
    }

    /// Label reported as `current_operation` in error bodies.
    pub fn current_operation(&self) -> &'static str {
        "shortest path calculation"
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| SchemaError::UnknownOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn test_parse_operation() {
        assert_eq!(
            "shortest_path".parse::<Operation>().unwrap(),
            Operation::ShortestPath
        );
        assert_eq!(
            "shortest_path_geojson".parse::<Operation>().unwrap(),
            Operation::ShortestPathGeojson
        );
        assert_eq!(
            "teleport".parse::<Operation>().unwrap_err(),
            SchemaError::UnknownOperation("teleport".into())
        );
    }

    #[test]
    fn test_operation_schemas_are_registered() {
        for op in Operation::ALL {
            assert!(registry().contains(op.request_schema()), "{op}");
            assert!(registry().contains(op.response_schema()), "{op}");
        }
    }
}
