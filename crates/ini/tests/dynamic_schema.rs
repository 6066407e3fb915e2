#![cfg(feature = "json")]
use ini_rs::value::Value;
use ini_rs::{DynamicRecord, SchemaDesc};
use serde_json::json;

const SCHEMA: &str = r#"{
  "fields": [
    { "name": "Name" },
    { "name": "StartCmd", "key": "[START]", "fields": [
      { "name": "Foo", "key": "FOO" },
      { "name": "Magic", "key": "Magic Number", "type": "int" },
      { "name": "Tags", "key": "tag", "type": "list<string>" }
    ]},
    { "name": "Tuning", "key": "-", "fields": [
      { "name": "Ratio", "type": "f32" },
      { "name": "Verbose", "type": "bool" }
    ]},
    { "name": "Extra", "type": "map" }
  ]
}"#;

#[test]
fn dynamic_record_decodes_and_renders() -> Result<(), Box<dyn std::error::Error>> {
    let desc = SchemaDesc::from_json(SCHEMA)?;
    let mut rec = DynamicRecord::new(&desc);
    let input = "ratio = 0.5\n[START]\nFOO=BAR\nMagic Number = 42\ntag=a\ntag=b\nverbose=y\nunknown=1\n";
    let unmatched = ini_rs::decode(input.as_bytes(), &mut rec).into_result()?;
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].line, 8);
    assert_eq!(rec.get("StartCmd.Magic"), Some(&Value::Int(42)));
    assert_eq!(rec.get("StartCmd.Foo").and_then(Value::as_str), Some("BAR"));
    assert_eq!(
        rec.to_json(),
        json!({
            "Name": null,
            "StartCmd": { "Foo": "BAR", "Magic": 42, "Tags": ["a", "b"] },
            "Tuning": { "Ratio": 0.5, "Verbose": true },
            "Extra": null
        })
    );
    Ok(())
}

#[test]
fn unsupported_kind_is_a_value_error() -> Result<(), Box<dyn std::error::Error>> {
    let desc = SchemaDesc::from_json(SCHEMA)?;
    let mut rec = DynamicRecord::new(&desc);
    let err = ini_rs::from_str("name=x\nextra = {}\n", &mut rec).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(err.to_string().contains("Can't set value of type map"));
    assert_eq!(rec.get("Name").and_then(Value::as_str), Some("x"));
    Ok(())
}

#[test]
fn malformed_schema_json_is_reported() {
    let err = SchemaDesc::from_json("{\"fields\": 3}").unwrap_err();
    assert!(matches!(err, ini_rs::Error::SerdeJson(_)));
}
