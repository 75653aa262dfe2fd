use bp_domain::{Blueprint, DomainError, Point};
use serde_json::json;

#[test]
fn test_blueprint_keeps_point_order() {
    let pts = vec![Point::new(5, 5), Point::new(0, 0), Point::new(2, 9)];
    let bp = Blueprint::new("alice", "house", pts.clone()).unwrap();
    assert_eq!(bp.points(), pts.as_slice());
    assert_eq!(bp.len(), 3);
}

#[test]
fn test_blueprint_rejects_blank_author() {
    let err = Blueprint::new("   ", "house", vec![]).unwrap_err();
    assert_eq!(err, DomainError::Validation("Author cannot be empty".into()));
}

#[test]
fn test_blueprint_rejects_blank_name() {
    let err = Blueprint::new("alice", "", vec![]).unwrap_err();
    assert_eq!(err.to_string(), "Name cannot be empty");
}

#[test]
fn test_blueprint_empty_points_allowed() {
    let bp = Blueprint::new("alice", "house", vec![]).unwrap();
    assert!(bp.is_empty());
}

#[test]
fn test_add_point_appends_last() {
    let mut bp = Blueprint::new("alice", "house", vec![Point::new(0, 0)]).unwrap();
    bp.add_point(Point::new(7, 8));
    assert_eq!(bp.points().last(), Some(&Point::new(7, 8)));
    assert_eq!(bp.len(), 2);
}

#[test]
fn test_blueprint_serialized_shape() {
    let bp = Blueprint::new("alice", "house", vec![Point::new(0, 0), Point::new(1, 1)]).unwrap();
    let v = serde_json::to_value(&bp).unwrap();
    assert_eq!(v, json!({"author": "alice", "name": "house", "points": [{"x": 0, "y": 0}, {"x": 1, "y": 1}]}));
    assert_eq!(bp.to_string(), "alice/house");
}

#[test]
fn test_blueprint_rejects_nul_in_identity() {
    let err = Blueprint::new("ali\0ce", "house", vec![]).unwrap_err();
    assert_eq!(err, DomainError::Validation("Author cannot contain NUL characters".into()));
    let err = Blueprint::new("alice", "x\0y", vec![]).unwrap_err();
    assert_eq!(err.to_string(), "Name cannot contain NUL characters");
}
