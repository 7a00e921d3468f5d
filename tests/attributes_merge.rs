use citeproc::{AttributeError, Attributes, AttributesConfig, DeepCopy, JsonDetection};
use serde_json::{json, Value};

fn item() -> Attributes {
    Attributes::try_create(
        r#"{
            "id": "turing1936",
            "type": "article-journal",
            "title": "On Computable Numbers",
            "author": [{ "family": "Turing", "given": "Alan" }],
            "issued": { "date-parts": [[1936]] },
            "volume": 42
        }"#,
    )
    .unwrap()
}

#[test]
fn test_merge_chain_from_several_shapes() {
    let mut other = Attributes::new();
    other.set("publisher", "London Mathematical Society");

    let mut attrs = Attributes::new();
    attrs
        .merge(Value::Null)
        .unwrap()
        .merge(json!({ "title": "Draft" }))
        .unwrap()
        .update(r#"{"title": "Final"}"#)
        .unwrap()
        .merge(&other)
        .unwrap();

    assert_eq!(attrs.get("title"), Some(&json!("Final")));
    assert_eq!(attrs.get("publisher"), Some(&json!("London Mathematical Society")));
    assert_eq!(attrs.len(), 2);
}

#[test]
fn test_failed_merge_is_atomic() {
    let mut attrs = item();
    let before = attrs.to_hash();

    for bad in [json!(42), json!([{ "title": "x" }]), json!(true)] {
        let err = attrs.merge(bad).unwrap_err();
        assert!(matches!(err, AttributeError::Parse { .. }));
    }
    assert!(attrs.merge(r#"{"title": "x", "#).is_err());

    assert_eq!(attrs.to_hash(), before);
}

#[test]
fn test_externalized_mapping_is_independent() {
    let attrs = item();
    let mut exported = attrs.to_hash();

    exported.insert("note".into(), json!("added"));
    for (_, value) in exported.iter_mut() {
        if let Some(map) = value.as_object_mut() {
            map.clear();
        }
    }

    assert!(attrs.get("note").is_none());
    assert_eq!(attrs.deep_fetch(&["issued", "date-parts"]), Some(&json!([[1936]])));
}

#[test]
fn test_caller_copies_never_reach_the_container() {
    let author = json!([{ "family": "Turing" }]);
    let mut source = json!({ "author": author.deep_copy().unwrap() });

    let attrs = Attributes::try_create(source.clone()).unwrap();
    source["author"][0]["family"] = json!("Church");

    assert_eq!(attrs.get("author"), Some(&author));
}

#[test]
fn test_deep_fetch_through_container() {
    let attrs = item();

    assert_eq!(attrs.deep_fetch(&["author"]).map(|v| v[0]["given"].clone()), Some(json!("Alan")));
    assert_eq!(attrs.deep_fetch(&["issued", "date-parts"]), Some(&json!([[1936]])));
    assert_eq!(attrs.deep_fetch(&["issued", "season"]), None);
    assert_eq!(attrs.deep_fetch(&["accessed", "date-parts"]), None);
    assert_eq!(attrs.deep_fetch(&["title", "date-parts"]), None);
}

#[test]
fn test_serialized_text_is_the_projection() {
    let attrs = item();
    let text = attrs.to_json().unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed["volume"], json!("42"));
    assert_eq!(parsed["issued"], json!({ "date-parts": [[1936]] }));
    assert_eq!(parsed["author"][0]["family"], json!("Turing"));
    assert!(text.starts_with(r#"{"id":"turing1936","type":"article-journal""#));
}

#[test]
fn test_serialized_text_merges_back() {
    let attrs = item();
    let copy: Attributes = attrs.to_json().unwrap().parse().unwrap();

    assert_eq!(copy.get("title"), attrs.get("title"));
    assert_eq!(copy.get("volume"), Some(&json!("42")));
}

#[test]
fn test_full_parse_configuration() {
    let config = AttributesConfig {
        json_detection: JsonDetection::FullParse,
        ..AttributesConfig::default()
    };
    let mut attrs = Attributes::with_config(config);

    assert!(matches!(
        attrs.merge("\"just text\"").unwrap_err(),
        AttributeError::NotAnObject { kind: "string" }
    ));
    assert!(matches!(attrs.merge("nope").unwrap_err(), AttributeError::Json(_)));
    attrs.merge("{\"id\": 1}").unwrap();
    assert_eq!(attrs.get("id"), Some(&json!(1)));
}

#[test]
fn test_create_and_try_create() {
    assert!(Attributes::create(json!({ "bad": [1, 2] })).is_some());
    assert!(Attributes::create(json!([{ "bad": 1 }])).is_none());
    assert!(Attributes::try_create(json!([{ "bad": 1 }]))
        .unwrap_err()
        .is_parse_error());
}
