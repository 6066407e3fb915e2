#![no_main]
use ini::{DynamicRecord, SchemaDesc};
use libfuzzer_sys::fuzz_target;

const SCHEMA: &str = r#"{"fields": [
  {"name": "name"},
  {"name": "count", "type": "u8"},
  {"name": "ratio", "type": "f32"},
  {"name": "server", "key": "[server]", "fields": [
    {"name": "host"},
    {"name": "port", "type": "u16"},
    {"name": "tags", "key": "tag", "type": "list<string>"}
  ]},
  {"name": "group", "key": "-", "fields": [{"name": "debug", "type": "bool"}]}
]}"#;

fuzz_target!(|data: &[u8]| {
    let Ok(desc) = SchemaDesc::from_json(SCHEMA) else {
        return;
    };
    let mut rec = DynamicRecord::new(&desc);
    let outcome = ini::decode(data, &mut rec);
    let mut last = 0;
    for u in &outcome.unmatched {
        assert!(u.line > last);
        last = u.line;
    }
});
