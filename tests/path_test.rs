//! Integration tests for JsonPath.

use rstest::rstest;
use serde_json::json;
use shapecheck::{JsonPath, PathSegment};

#[test]
fn test_path_construction_and_display() {
    assert_eq!(JsonPath::root().to_string(), "");
    assert_eq!(JsonPath::root().push_key("name").to_string(), "name");
    assert_eq!(JsonPath::root().push_index(0).to_string(), "0");

    let path = JsonPath::root()
        .push_key("foo")
        .push_index(0)
        .push_key("id");
    assert_eq!(path.to_string(), "foo.0.id");
}

#[test]
fn test_path_segments_preserved() {
    let path = JsonPath::from_key("data").push_index(42).push_key("value");

    let segments: Vec<&PathSegment> = path.segments().collect();
    assert_eq!(
        segments,
        vec![
            &PathSegment::key("data"),
            &PathSegment::index(42),
            &PathSegment::key("value"),
        ]
    );
}

#[test]
fn test_push_leaves_original_untouched() {
    let base = JsonPath::from_key("info");
    let child = base.push_key("platform");

    assert_eq!(base.to_string(), "info");
    assert_eq!(child.to_string(), "info.platform");
    assert_eq!(child.parent(), Some(base));
    assert_eq!(child.last(), Some(&PathSegment::key("platform")));
    assert_eq!(JsonPath::root().parent(), None);
}

#[rstest]
#[case::root(JsonPath::root(), "data")]
#[case::key(JsonPath::from_key("info"), "data['info']")]
#[case::index(JsonPath::from_key("urls").push_index(3), "data['urls'][3]")]
#[case::quote(JsonPath::from_key("it's"), "data['it\\'s']")]
fn test_subscript_rendering(#[case] path: JsonPath, #[case] expected: &str) {
    assert_eq!(path.subscript().to_string(), expected);
}

#[rstest]
#[case::found(JsonPath::from_key("foo").push_index(0).push_key("id"), Some(json!("bar")))]
#[case::root(JsonPath::root(), Some(json!({"foo": [{"id": "bar"}]})))]
#[case::missing_key(JsonPath::from_key("nope"), None)]
#[case::index_out_of_range(JsonPath::from_key("foo").push_index(5), None)]
#[case::key_into_array(JsonPath::from_key("foo").push_key("id"), None)]
#[case::index_into_object(JsonPath::from_index(0), None)]
fn test_lookup(#[case] path: JsonPath, #[case] expected: Option<serde_json::Value>) {
    let data = json!({"foo": [{"id": "bar"}]});
    assert_eq!(path.lookup(&data), expected.as_ref());
}

#[test]
fn test_collect_from_segments() {
    let path: JsonPath = vec![PathSegment::from("a"), PathSegment::from(1usize)]
        .into_iter()
        .collect();
    assert_eq!(path, JsonPath::from_key("a").push_index(1));
}
