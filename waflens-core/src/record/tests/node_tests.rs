use crate::record::{Node, Path, Scalar, flatten};
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample() -> Node {
    Node::from(json!({
        "timestamp": 1700000000000u64,
        "action": "BLOCK",
        "httpRequest": {
            "clientIp": "1.2.3.4",
            "headers": [ { "name": "Host", "value": "example.com" } ]
        },
        "odd": { "0": "numeric key" }
    }))
}

#[test]
fn get_resolves_nested_and_indexed_paths() {
    let record = sample();

    assert_eq!(
        record.get(&Path::parse("httpRequest.headers[0].value")),
        Some(&Node::string("example.com"))
    );
    assert_eq!(record.get(&Path::parse("httpRequest.headers[1].value")), None);
    assert_eq!(record.get(&Path::parse("action.nope")), None);
}

#[test]
fn get_numeric_segment_matches_numeric_field_name() {
    let record = sample();

    assert_eq!(
        record.get(&Path::parse("odd[0]")),
        Some(&Node::string("numeric key"))
    );
}

#[test]
fn get_agrees_with_flatten_for_every_leaf() {
    let record = sample();

    for (path, scalar) in flatten(&record).iter() {
        let resolved = record.get(&Path::parse(path)).and_then(Node::as_scalar);
        assert_eq!(resolved, Some(scalar), "path {path}");
    }
}

#[test]
fn text_renders_scalars_and_inner_nodes() {
    assert_eq!(Node::from(json!(42)).text(), "42");
    assert_eq!(Node::from(json!(1.5)).text(), "1.5");
    assert_eq!(Node::from(json!(true)).text(), "true");
    assert_eq!(Node::from(json!(null)).text(), "null");
    assert_eq!(Node::from(json!({"b": 1, "a": [2]})).text(), r#"{"b":1,"a":[2]}"#);
}

#[test]
fn numeric_coercion() {
    assert_eq!(Scalar::String(" 12.5 ".into()).as_f64(), Some(12.5));
    assert_eq!(Scalar::String("".into()).as_f64(), None);
    assert_eq!(Scalar::String("abc".into()).as_f64(), None);
    assert_eq!(Scalar::String("NaN".into()).as_f64(), None);
    assert_eq!(Scalar::Bool(true).as_f64(), Some(1.0));
    assert_eq!(Scalar::Null.as_f64(), None);
}

#[test]
fn json_roundtrip_preserves_field_order() {
    let line = r#"{"z":1,"a":{"y":true,"b":null},"m":[1,"two"]}"#;

    let node: Node = serde_json::from_str(line).unwrap();
    let back = serde_json::to_string(&node).unwrap();

    assert_eq!(back, line);
}

#[test]
fn get_resolves_keys_containing_dots_and_brackets() {
    let record = Node::from(json!({
        "x.y": "v",
        "header": { "x.trace": "t-1", "a[b]": "odd" },
        "list": [ { "k.v": 1 } ]
    }));

    let get = |p: &str| record.get(&Path::parse(p)).map(|n| n.text().into_owned());

    assert_eq!(get("x.y"), Some("v".into()));
    assert_eq!(get("header.x.trace"), Some("t-1".into()));
    assert_eq!(get("header.a[b]"), Some("odd".into()));
    assert_eq!(get("list[0].k.v"), Some("1".into()));
    assert_eq!(get("header.x"), None);
}

#[test]
fn segment_walk_is_tried_before_literal_keys() {
    let record = Node::from(json!({ "a.b": "literal", "a": { "b": "nested" } }));

    assert_eq!(record.get(&Path::parse("a.b")), Some(&Node::string("nested")));
}

#[test]
fn every_flattened_path_resolves_with_dotted_keys() {
    let record = Node::from(json!({
        "x.y": "v",
        "httpRequest": { "headers": [ { "name": "x.trace", "value": "t" } ] },
        "header": { "x.trace": "t", "Host": "h" },
        "nested": [ [ { "a.b": true } ] ]
    }));

    for (path, scalar) in flatten(&record).iter() {
        let resolved = record.get(&Path::parse(path)).and_then(Node::as_scalar);
        assert_eq!(resolved, Some(scalar), "path {path}");
    }
}
