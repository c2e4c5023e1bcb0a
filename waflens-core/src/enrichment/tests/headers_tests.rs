use crate::enrichment::{HeaderEnricher, enrich};
use crate::record::{Node, Path, Record};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn record(value: serde_json::Value) -> Record {
    Arc::new(Node::from(value))
}

fn waf_record() -> Record {
    record(json!({
        "action": "ALLOW",
        "httpRequest": {
            "clientIp": "1.2.3.4",
            "headers": [
                { "name": "Host", "value": "example.com" },
                { "name": "User-Agent", "value": "curl/8.0" },
                { "name": "X-Request-Id", "value": "abc" },
                { "name": "Accept", "value": "*/*" }
            ]
        }
    }))
}

#[test]
fn extracts_default_headers_with_original_casing() {
    let out = enrich(&[waf_record()], &[]);

    assert_eq!(
        out[0].get(&Path::parse("header")).map(Node::to_json),
        Some(json!({ "Host": "example.com", "User-Agent": "curl/8.0" }))
    );
}

#[test]
fn extra_header_names_match_case_insensitively() {
    let out = enrich(&[waf_record()], &["x-request-ID".to_string()]);

    assert_eq!(
        out[0].get(&Path::parse("header.X-Request-Id")),
        Some(&Node::string("abc"))
    );
    assert_eq!(out[0].get(&Path::parse("header.Accept")), None);
}

#[test]
fn header_field_is_appended_after_existing_fields() {
    let out = enrich(&[waf_record()], &[]);

    let keys: Vec<_> = out[0].as_fields().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["action", "httpRequest", "header"]);
}

#[test]
fn record_without_matches_passes_through_unchanged() {
    let input = record(json!({
        "httpRequest": { "headers": [ { "name": "Accept", "value": "*/*" } ] }
    }));

    let out = enrich(&[input.clone()], &[]);

    assert!(Arc::ptr_eq(&out[0], &input));
    assert_eq!(out[0].get(&Path::parse("header")), None);
}

#[test]
fn record_without_header_list_passes_through_unchanged() {
    let no_request = record(json!({ "action": "BLOCK" }));
    let not_a_list = record(json!({ "httpRequest": { "headers": "Host: x" } }));

    let out = enrich(&[no_request.clone(), not_a_list.clone()], &[]);

    assert!(Arc::ptr_eq(&out[0], &no_request));
    assert!(Arc::ptr_eq(&out[1], &not_a_list));
}

#[test]
fn skips_entries_with_missing_or_empty_parts() {
    let input = record(json!({
        "httpRequest": { "headers": [
            { "name": "Host" },
            { "name": "", "value": "nameless" },
            { "name": "Referer", "value": "" },
            { "name": "User-Agent", "value": null },
            "not an entry",
            { "name": "host", "value": "kept.example" }
        ] }
    }));

    let out = enrich(&[input], &[]);

    assert_eq!(
        out[0].get(&Path::parse("header")).map(Node::to_json),
        Some(json!({ "host": "kept.example" }))
    );
}

#[test]
fn custom_source_path() {
    let input = record(json!({
        "request": { "hdrs": [ { "name": "Host", "value": "h" } ] }
    }));

    let out = HeaderEnricher::new(["host"])
        .with_source(Path::parse("request.hdrs"))
        .enrich(&[input]);

    assert_eq!(out[0].get(&Path::parse("header.Host")), Some(&Node::string("h")));
}

#[test]
fn enrichment_does_not_touch_the_input() {
    let input = waf_record();

    let _ = enrich(&[input.clone()], &[]);

    assert_eq!(input.get(&Path::parse("header")), None);
}
