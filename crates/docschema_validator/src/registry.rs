//! Schema registry.
//!
//! The process-wide set of named schemas that form the API contract of the
//! route optimisation service. Schemas are declared once, on first access,
//! and shared read-only afterwards.

use crate::combinators::{all, array, or};
use crate::primitives::{float, length, non_negative, null, range, string, values};
use crate::{ObjectSchema, ObjectSchemaBuilder};
use docschema_core::{Result, SchemaError, Validator};
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};
use tracing::info;

static REGISTRY: LazyLock<SchemaRegistry> = LazyLock::new(|| {
    SchemaRegistry::build()
        .unwrap_or_else(|err| panic!("schema registry initialization failed: {err}"))
});

/// Returns the shared registry, declaring it on first use.
///
/// # Panics
///
/// Panics if a built-in schema is malformed. Such a declaration is a
/// programmer error and must not let the process start.
pub fn registry() -> &'static SchemaRegistry {
    &REGISTRY
}

/// The built-in schemas.
#[derive(Debug, Clone)]
pub struct Schemas {
    /// Point in the road graph
    pub node: Arc<ObjectSchema>,
    /// Journey to optimise
    pub journey: Arc<ObjectSchema>,
    /// Shortest path request body
    pub request: Arc<ObjectSchema>,
    /// Single leg of a computed itinerary
    pub arc: Arc<ObjectSchema>,
    /// Computed itinerary
    pub route: Arc<ObjectSchema>,
    /// Journey together with its computed routes
    pub optimized_routes: Arc<ObjectSchema>,
    /// Outcome of an optimisation call
    pub error_status: Arc<ObjectSchema>,
    /// Shortest path response body
    pub response: Arc<ObjectSchema>,
    /// GeoJSON position: two floats
    pub geojson_coordinates: Arc<dyn Validator>,
    /// GeoJSON geometry
    pub geojson_geometry: Arc<ObjectSchema>,
    /// GeoJSON feature
    pub geojson_feature: Arc<ObjectSchema>,
    /// GeoJSON feature collection
    pub geojson_feature_collection: Arc<ObjectSchema>,
}

impl Schemas {
    /// Declares every built-in schema.
    ///
    /// # Errors
    ///
    /// Returns the first `SchemaError` raised by a malformed declaration.
    pub fn declare() -> Result<Self> {
        let node = Arc::new(
            ObjectSchemaBuilder::new("Node")
                .description("Details about a node in the graph")
                .optional("node_id", "Identifier of the node", vec![string()])
                .optional(
                    "lat",
                    "Latitude in decimal degrees",
                    vec![float(), range(-90.0, 90.0)],
                )
                .optional(
                    "lon",
                    "Longitude in decimal degrees",
                    vec![float(), range(-180.0, 180.0)],
                )
                .build()?,
        );

        let journey = Arc::new(
            ObjectSchemaBuilder::new("Journey")
                .description("Represents the details about the journey that must be optimized")
                .required(
                    "search_route_type",
                    "Kind of route to search for",
                    vec![string()],
                )
                .optional(
                    "search_max_feet_km",
                    "Maximum distance to cover on foot, in kilometers",
                    vec![float(), non_negative()],
                )
                .optional("start_datetime", "Departure date and time", vec![string()])
                .required("source_node", "Where the journey starts", vec![node.clone()])
                .required(
                    "destination_node",
                    "Where the journey ends",
                    vec![node.clone()],
                )
                .build()?,
        );

        let request = Arc::new(
            ObjectSchemaBuilder::new("Shortest Path Request")
                .optional("message_version", "Version of the message format", vec![string()])
                .required("journey", "Journey to optimize", vec![journey.clone()])
                .build()?,
        );

        let arc = Arc::new(
            ObjectSchemaBuilder::new("Arc details")
                .description(
                    "In the optimization response, provides details about a single \
                     node-to-node arc in the computed journey",
                )
                .required("distance", "Length of the arc", vec![float(), non_negative()])
                .required("desc", "Description of the arc", vec![string()])
                .required("start_datetime", "Departure date and time", vec![string()])
                .required("end_datetime", "Arrival date and time", vec![string()])
                .required("transport", "Means of transport", vec![string()])
                .required(
                    "transport_provider",
                    "Company operating the transport, if any",
                    vec![or(vec![string(), null()])],
                )
                .required(
                    "transport_service_type",
                    "Service operated by the provider, if any",
                    vec![or(vec![string(), null()])],
                )
                .required("source_node", "Where the arc starts", vec![node.clone()])
                .required("destination_node", "Where the arc ends", vec![node.clone()])
                .build()?,
        );

        let route = Arc::new(
            ObjectSchemaBuilder::new("Itinerary details")
                .description("Describes optimized route")
                .required("eta", "Estimated time of arrival", vec![string()])
                .required("distance", "Total length of the route", vec![float(), non_negative()])
                .required("arc", "Legs of the route, in travel order", vec![array(vec![arc.clone()])])
                .build()?,
        );

        let optimized_routes = Arc::new(
            ObjectSchemaBuilder::new("Route response")
                .description("Describes an optimized journey")
                .inherit(&journey)
                .required("route", "Computed routes", vec![array(vec![route.clone()])])
                .build()?,
        );

        let error_status = Arc::new(
            ObjectSchemaBuilder::new("Error status")
                .description("Used to notify any errors during the optimization process")
                .optional("current_operation", "Operation that was running", vec![string()])
                .required("error_code", "Outcome code, \"0\" on success", vec![string()])
                .required("error_message", "Human readable outcome", vec![string()])
                .optional("more_info", "Additional details", vec![string()])
                .optional("project_name", "Project that produced the response", vec![string()])
                .build()?,
        );

        let response = Arc::new(
            ObjectSchemaBuilder::new("Optimization response")
                .inherit(&request)
                .required(
                    "journey",
                    "Optimized journey",
                    vec![optimized_routes.clone()],
                )
                .required("response", "Outcome of the optimization", vec![error_status.clone()])
                .build()?,
        );

        let geojson_coordinates = all(vec![array(vec![float()]), length(2, Some(2))]);

        let geojson_geometry = Arc::new(
            ObjectSchemaBuilder::new("Geojson geometry")
                .required("type", "Geometry type", vec![string()])
                .optional(
                    "coordinates",
                    "Positions as [longitude, latitude] pairs",
                    vec![array(vec![geojson_coordinates.clone()])],
                )
                .build()?,
        );

        let geojson_feature = Arc::new(
            ObjectSchemaBuilder::new("Geojson feature")
                .required("type", "Always \"Feature\"", vec![string(), values(["Feature"])])
                .required("geometry", "Shape of the feature", vec![geojson_geometry.clone()])
                .build()?,
        );

        let geojson_feature_collection = Arc::new(
            ObjectSchemaBuilder::new("Computed journey in geojson format")
                .required(
                    "type",
                    "Always \"FeatureCollection\"",
                    vec![string(), values(["FeatureCollection"])],
                )
                .required(
                    "features",
                    "Features of the collection",
                    vec![array(vec![geojson_feature.clone()])],
                )
                .build()?,
        );

        Ok(Self {
            node,
            journey,
            request,
            arc,
            route,
            optimized_routes,
            error_status,
            response,
            geojson_coordinates,
            geojson_geometry,
            geojson_feature,
            geojson_feature_collection,
        })
    }
}

/// Named lookup over the built-in schemas.
#[derive(Debug)]
pub struct SchemaRegistry {
    schemas: Schemas,
    by_name: BTreeMap<&'static str, Arc<dyn Validator>>,
}

impl SchemaRegistry {
    /// Declares every schema and indexes it by name.
    pub fn build() -> Result<Self> {
        let schemas = Schemas::declare()?;

        let mut by_name: BTreeMap<&'static str, Arc<dyn Validator>> = BTreeMap::new();
        by_name.insert("node", schemas.node.clone());
        by_name.insert("journey", schemas.journey.clone());
        by_name.insert("request", schemas.request.clone());
        by_name.insert("arc", schemas.arc.clone());
        by_name.insert("route", schemas.route.clone());
        by_name.insert("optimized_routes", schemas.optimized_routes.clone());
        by_name.insert("error_status", schemas.error_status.clone());
        by_name.insert("response", schemas.response.clone());
        by_name.insert("geojson_coordinates", schemas.geojson_coordinates.clone());
        by_name.insert("geojson_geometry", schemas.geojson_geometry.clone());
        by_name.insert("geojson_feature", schemas.geojson_feature.clone());
        by_name.insert(
            "geojson_feature_collection",
            schemas.geojson_feature_collection.clone(),
        );

        info!(schemas = by_name.len(), "schema registry initialized");
        Ok(Self { schemas, by_name })
    }

    /// Typed access to the built-in schemas.
    pub fn schemas(&self) -> &Schemas {
        &self.schemas
    }

    /// Looks up a schema by name.
    pub fn get(&self, name: &str) -> Result<&dyn Validator> {
        self.by_name
            .get(name)
            .map(|v| v.as_ref())
            .ok_or_else(|| SchemaError::UnknownSchema(name.to_string()))
    }

    /// Returns true if a schema is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registered schema names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_name.keys().copied()
    }

    /// Registered schemas with their names, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &dyn Validator)> + '_ {
        self.by_name.iter().map(|(name, v)| (*name, v.as_ref()))
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true if no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docschema_core::Node;
    use serde_json::json;

    #[test]
    fn test_registry_names() {
        let names: Vec<_> = registry().names().collect();
        assert_eq!(names.len(), 12);
        assert!(names.contains(&"request"));
        assert!(names.contains(&"geojson_feature_collection"));
        assert_eq!(registry().len(), 12);
        assert!(!registry().is_empty());
    }

    #[test]
    fn test_unknown_schema() {
        let err = registry().get("nope").unwrap_err();
        assert_eq!(err, SchemaError::UnknownSchema("nope".into()));
        assert!(!registry().contains("nope"));
    }

    #[test]
    fn test_registry_is_shared() {
        assert!(std::ptr::eq(registry(), registry()));
    }

    #[test]
    fn test_node_accepts_partial_coordinates() {
        let node = registry().get("node").unwrap();
        assert!(node.validate(&Node::from(json!({})), None).is_ok());
        assert!(node.validate(&Node::from(json!({"lat": 43.77})), None).is_ok());
        assert!(node.validate(&Node::from(json!({"lat": 143.0})), None).is_err());
    }

    #[test]
    fn test_response_overrides_journey() {
        let response = &registry().schemas().response;
        let names: Vec<_> = response.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["message_version", "journey", "response"]);
        assert_eq!(
            response.field("journey").unwrap().type_label().unwrap(),
            "Object (Route response)"
        );
    }

    #[test]
    fn test_optimized_routes_extends_journey() {
        let optimized = &registry().schemas().optimized_routes;
        let journey = &registry().schemas().journey;
        assert_eq!(optimized.fields().len(), journey.fields().len() + 1);
        assert_eq!(optimized.fields().last().unwrap().name, "route");
    }

    #[test]
    fn test_geojson_pair() {
        let pair = registry().get("geojson_coordinates").unwrap();
        assert!(pair.validate(&Node::from(json!([11.25, 43.77])), None).is_ok());
        assert!(pair.validate(&Node::from(json!([11.25])), None).is_err());
        assert!(pair.validate(&Node::from(json!([11.25, 43.77, 0.0])), None).is_err());
        assert!(pair.validate(&Node::from(json!(["11.25", 43.77])), None).is_err());
    }
}
