//! Integration tests running realistic API documents through the registry.

use docschema_core::{Node, ValidationContext, Validator, ViolationKind};
use docschema_validator::{DocumentValidator, ErrorStatus, Operation, docs, registry};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::thread;

fn node(id: &str, lat: f64, lon: f64) -> Value {
    json!({"node_id": id, "lat": lat, "lon": lon})
}

fn request() -> Value {
    json!({
        "message_version": "1.0",
        "journey": {
            "search_route_type": "fastest",
            "search_max_feet_km": 0.8,
            "start_datetime": "2024-05-02T08:30:00",
            "source_node": node("n1", 43.7696, 11.2558),
            "destination_node": node("n2", 43.7764, 11.2480)
        }
    })
}

fn response() -> Value {
    let arc = json!({
        "distance": 1250.5,
        "desc": "Via dei Calzaiuoli",
        "start_datetime": "2024-05-02T08:30:00",
        "end_datetime": "2024-05-02T08:45:00",
        "transport": "foot",
        "transport_provider": null,
        "transport_service_type": null,
        "source_node": node("n1", 43.7696, 11.2558),
        "destination_node": node("n2", 43.7764, 11.2480)
    });

    let mut journey = request()["journey"].clone();
    journey["route"] = json!([{
        "eta": "2024-05-02T08:45:00",
        "distance": 1250.5,
        "arc": [arc]
    }]);

    json!({
        "message_version": "1.0",
        "journey": journey,
        "response": {"error_code": "0", "error_message": "successful"}
    })
}

fn feature_collection() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[11.2558, 43.7696], [11.2480, 43.7764]]
            }
        }]
    })
}

fn check(operation: Operation, response: bool, doc: Value) -> Vec<String> {
    let validator = DocumentValidator::new();
    let doc = Node::from(doc);
    let context = ValidationContext::new();
    let report = if response {
        validator.validate_response(operation, &doc, &context)
    } else {
        validator.validate_request(operation, &doc, &context)
    }
    .unwrap();
    report.errors.iter().map(|e| e.to_string()).collect()
}

#[test]
fn test_valid_documents_pass() {
    assert_eq!(check(Operation::ShortestPath, false, request()), Vec::<String>::new());
    assert_eq!(check(Operation::ShortestPath, true, response()), Vec::<String>::new());
    assert_eq!(
        check(Operation::ShortestPathGeojson, true, feature_collection()),
        Vec::<String>::new()
    );
}

#[test]
fn test_missing_required_field_is_named() {
    let mut doc = request();
    doc["journey"]
        .as_object_mut()
        .unwrap()
        .remove("destination_node");

    let errors = check(Operation::ShortestPath, false, doc);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with(r#"Required key "destination_node" not present, {"#));
}

#[test]
fn test_missing_optional_field_passes() {
    let mut doc = request();
    doc.as_object_mut().unwrap().remove("message_version");
    doc["journey"]
        .as_object_mut()
        .unwrap()
        .remove("search_max_feet_km");

    assert!(check(Operation::ShortestPath, false, doc).is_empty());
}

#[test]
fn test_extra_key_is_rejected() {
    let mut doc = request();
    doc["journey"]["source_node"]["altitude"] = json!(50.0);

    let errors = check(Operation::ShortestPath, false, doc);
    assert_eq!(errors, vec![r#"Extra keys in object, ["altitude"]"#.to_string()]);
}

#[test]
fn test_wrong_type_is_rejected() {
    let mut doc = request();
    doc["journey"]["search_route_type"] = json!(7);

    let errors = check(Operation::ShortestPath, false, doc);
    assert_eq!(errors, vec!["Value is not a string, 7".to_string()]);
}

#[test]
fn test_nullable_arc_fields() {
    let mut doc = response();
    doc["journey"]["route"][0]["arc"][0]["transport_provider"] = json!("ATAF");
    assert!(check(Operation::ShortestPath, true, doc.clone()).is_empty());

    doc["journey"]["route"][0]["arc"][0]["transport_provider"] = json!(42);
    let errors = check(Operation::ShortestPath, true, doc);
    assert_eq!(errors, vec!["Must be a string or must be null, 42".to_string()]);
}

#[test]
fn test_bad_array_element_fails_whole_document() {
    let mut doc = response();
    doc["journey"]["route"][0]["arc"][0]["distance"] = json!(-3.0);

    let errors = check(Operation::ShortestPath, true, doc);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Value is negative, -3.0"));
}

#[test]
fn test_empty_route_list_passes() {
    let mut doc = response();
    doc["journey"]["route"] = json!([]);
    assert!(check(Operation::ShortestPath, true, doc.clone()).is_empty());

    doc["journey"]["route"] = Value::Null;
    assert!(check(Operation::ShortestPath, true, doc).is_empty());
}

#[test]
fn test_geojson_constants_and_positions() {
    let mut doc = feature_collection();
    doc["type"] = json!("Feature");
    assert_eq!(
        check(Operation::ShortestPathGeojson, true, doc),
        vec![r#"Must be: FeatureCollection, "Feature""#.to_string()]
    );

    let mut doc = feature_collection();
    doc["features"][0]["geometry"]["coordinates"][1] = json!([11.2480]);
    let errors = check(Operation::ShortestPathGeojson, true, doc);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Length must be between 2 and 2"));
}

#[test]
fn test_error_status_body_is_a_valid_response_part() {
    let validator = DocumentValidator::new();
    let mut doc = request();
    doc["journey"]["source_node"]["lat"] = json!(123.0);

    let report = validator
        .validate_request(
            Operation::ShortestPath,
            &Node::from(doc),
            &ValidationContext::new(),
        )
        .unwrap();
    let err = report.first_error().unwrap();
    assert_eq!(err.kind, ViolationKind::Constraint);

    let status = ErrorStatus::from_validation_error(err, Some(Operation::ShortestPath));
    assert_eq!(status.error_code, "-1");
    assert_eq!(status.error_message, "Must be between -90 and 90, 123.0");
    assert!(
        registry()
            .get("error_status")
            .unwrap()
            .validate(&status.to_node(), None)
            .is_ok()
    );
}

#[test]
fn test_describe_mentions_every_required_field() {
    for (name, schema) in registry().iter() {
        let text = schema.describe();
        for table in docs::collect_tables(schema) {
            for field in table.required_fields() {
                assert!(
                    text.contains(&format!("{}: (required)", field)),
                    "{name}: {field} missing from description"
                );
            }
        }
    }
}

#[test]
fn test_schema_page_for_response() {
    let md = docs::render_markdown(registry().get("response").unwrap());

    let titles: Vec<_> = md
        .lines()
        .filter_map(|line| line.strip_prefix("### "))
        .collect();
    assert_eq!(
        titles,
        vec![
            "Optimization response",
            "Route response",
            "Node",
            "Itinerary details",
            "Arc details",
            "Error status",
        ]
    );
    assert!(md.contains(
        "| route | Computed routes | Array of Objects ([Itinerary details](#itinerary-details)) | X |  |"
    ));
    assert!(md.contains(
        "| transport_provider | Company operating the transport, if any | String or null | X |  |"
    ));
    assert!(md.contains("| lat | Latitude in decimal degrees | Number (float) |  | Must be between -90 and 90 |"));
}

#[test]
fn test_concurrent_validation() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let mut doc = request();
                if i % 2 == 1 {
                    doc["journey"]["search_max_feet_km"] = json!(-1.0);
                }
                check(Operation::ShortestPath, false, doc).is_empty()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i % 2 == 0);
    }
}
