//! Records described at runtime instead of by a Rust type.
//!
//! A [`SchemaDesc`] lists fields with an optional key tag, a type name and,
//! for composite fields, nested fields. [`DynamicRecord`] holds one value per
//! leaf and implements [`Schema`], so it decodes like any static record.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::schema::slot::{Kind, Scalar, parse_bool};
use crate::schema::{Binder, Schema, Slot};
use crate::value::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDesc {
    pub fields: Vec<FieldDesc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDesc {
    pub name: String,
    /// Key tag; defaults to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Type name for leaves; defaults to `string`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    /// Present for composite fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDesc>>,
}

impl SchemaDesc {
    #[cfg(feature = "json")]
    pub fn from_json(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Parse a type name such as `int16`, `float`, `list<string>` or `[]u8`.
/// Unknown names map to [`Kind::Unsupported`].
pub fn parse_kind(name: &str) -> Kind {
    let name = name.trim();
    let lower = name.to_ascii_lowercase();
    if let Some(elem) = lower
        .strip_prefix("list<")
        .and_then(|s| s.strip_suffix('>'))
        .or_else(|| lower.strip_prefix("[]"))
    {
        return Kind::List(Box::new(parse_kind(elem)));
    }
    match lower.as_str() {
        "string" | "str" => Kind::String,
        "bool" => Kind::Bool,
        "int" | "isize" => Kind::Int(64),
        "uint" | "usize" => Kind::Uint(64),
        "float" => Kind::Float(64),
        "i8" | "int8" => Kind::Int(8),
        "i16" | "int16" => Kind::Int(16),
        "i32" | "int32" => Kind::Int(32),
        "i64" | "int64" => Kind::Int(64),
        "u8" | "uint8" => Kind::Uint(8),
        "u16" | "uint16" => Kind::Uint(16),
        "u32" | "uint32" => Kind::Uint(32),
        "u64" | "uint64" => Kind::Uint(64),
        "f32" | "float32" => Kind::Float(32),
        "f64" | "float64" => Kind::Float(64),
        _ => Kind::Unsupported(name.to_string()),
    }
}

fn coerce(kind: &Kind, raw: &str) -> Result<Value, ValueError> {
    Ok(match kind {
        Kind::String => Value::String(raw.to_string()),
        Kind::Bool => Value::Bool(parse_bool(raw)),
        Kind::Int(8) => Value::Int(i8::coerce(raw)?.into()),
        Kind::Int(16) => Value::Int(i16::coerce(raw)?.into()),
        Kind::Int(32) => Value::Int(i32::coerce(raw)?.into()),
        Kind::Int(_) => Value::Int(i64::coerce(raw)?),
        Kind::Uint(8) => Value::Uint(u8::coerce(raw)?.into()),
        Kind::Uint(16) => Value::Uint(u16::coerce(raw)?.into()),
        Kind::Uint(32) => Value::Uint(u32::coerce(raw)?.into()),
        Kind::Uint(_) => Value::Uint(u64::coerce(raw)?),
        Kind::Float(32) => Value::Float(widen_f32(f32::coerce(raw)?)),
        Kind::Float(_) => Value::Float(f64::coerce(raw)?),
        Kind::List(_) | Kind::Unsupported(_) => {
            return Err(ValueError::Unsupported(kind.to_string()));
        }
    })
}

/// Widen through the shortest decimal form so `0.1f32` stays `0.1`.
fn widen_f32(x: f32) -> f64 {
    x.to_string().parse().unwrap_or_else(|_| f64::from(x))
}

/// One leaf value with its declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicSlot {
    kind: Kind,
    value: Value,
}

impl DynamicSlot {
    pub fn new(kind: Kind) -> Self {
        let value = match kind {
            Kind::List(_) => Value::List(Vec::new()),
            _ => Value::Null,
        };
        Self { kind, value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Slot for DynamicSlot {
    fn kind(&self) -> Kind {
        self.kind.clone()
    }

    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        match (&self.kind, &mut self.value) {
            (Kind::List(elem), Value::List(items)) => items.push(coerce(elem, raw)?),
            (kind, value) => *value = coerce(kind, raw)?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf(DynamicSlot),
    Record(DynamicRecord),
}

#[derive(Debug, Clone, PartialEq)]
struct DynamicField {
    name: String,
    key: Option<String>,
    node: Node,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRecord {
    fields: Vec<DynamicField>,
}

impl DynamicRecord {
    pub fn new(desc: &SchemaDesc) -> Self {
        Self::from_fields(&desc.fields)
    }

    fn from_fields(fields: &[FieldDesc]) -> Self {
        let fields = fields
            .iter()
            .map(|f| {
                let node = match &f.fields {
                    Some(children) => Node::Record(Self::from_fields(children)),
                    None => Node::Leaf(DynamicSlot::new(parse_kind(
                        f.ty.as_deref().unwrap_or("string"),
                    ))),
                };
                DynamicField {
                    name: f.name.clone(),
                    key: f.key.clone(),
                    node,
                }
            })
            .collect();
        Self { fields }
    }

    /// Look up a leaf by dotted field-name path, e.g. `Server.Port`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let field = self.fields.iter().find(|f| f.name == head)?;
        match (&field.node, rest) {
            (Node::Leaf(slot), None) => Some(slot.value()),
            (Node::Record(rec), Some(rest)) => rec.get(rest),
            _ => None,
        }
    }

    /// Render values as a JSON object keyed by field name.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for field in &self.fields {
            let value = match &field.node {
                Node::Leaf(slot) => slot.value().to_json(),
                Node::Record(rec) => rec.to_json(),
            };
            map.insert(field.name.clone(), value);
        }
        serde_json::Value::Object(map)
    }
}

impl Schema for DynamicRecord {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        for DynamicField { name, key, node } in &mut self.fields {
            let tag = key.as_deref().unwrap_or(name.as_str());
            match node {
                Node::Leaf(slot) => b.field(tag, slot),
                Node::Record(rec) => b.record(tag, rec),
            }
        }
    }
}
