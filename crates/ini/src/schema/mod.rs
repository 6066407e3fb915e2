//! Schema mapping: records register their fields with a [`Binder`], which
//! builds the case-insensitive lookup tables the decoder resolves keys against.
//!
//! ```
//! use ini_rs::schema::{Binder, Schema};
//!
//! #[derive(Default)]
//! struct Start {
//!     foo: String,
//!     magic: i32,
//! }
//!
//! impl Schema for Start {
//!     fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
//!         b.field("FOO", &mut self.foo);
//!         b.field("Magic Number", &mut self.magic);
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Parse {
//!     start: Start,
//! }
//!
//! impl Schema for Parse {
//!     fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
//!         b.record("[START]", &mut self.start);
//!     }
//! }
//!
//! let mut p = Parse::default();
//! ini_rs::from_str("[START]\nFOO=BAR\nMagic Number = 42", &mut p).unwrap();
//! assert_eq!(p.start.foo, "BAR");
//! assert_eq!(p.start.magic, 42);
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
pub mod dynamic;
pub mod slot;

pub use slot::{Kind, Scalar, Slot};

/// Tag that keeps a field out of the key tables. On a record it merges the
/// record's fields into the enclosing namespace.
pub const SKIP: &str = "-";

/// A record type the decoder can populate.
pub trait Schema {
    /// Register every field of `self` with `b`.
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>);
}

/// Keys of one namespace, lowercased.
pub(crate) struct Namespace<'a> {
    slots: HashMap<String, &'a mut dyn Slot>,
}

impl<'a> Namespace<'a> {
    fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut (dyn Slot + 'a)> {
        self.slots.get_mut(key).map(|slot| &mut **slot)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}

pub(crate) struct SectionEntry<'a> {
    /// Bracketed, lowercased header text
    pub tag: String,
    pub fields: Namespace<'a>,
}

/// Lookup tables for one decode call.
pub(crate) struct Bindings<'a> {
    pub top: Namespace<'a>,
    pub sections: Vec<SectionEntry<'a>>,
    by_tag: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl<'a> Bindings<'a> {
    pub(crate) fn section(&self, tag: &str) -> Option<usize> {
        self.by_tag.get(tag).copied()
    }

    /// Section lookup by its name without brackets.
    pub(crate) fn bare_section(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }
}

#[derive(Clone, Copy)]
enum Target {
    Top,
    Section(usize),
}

/// Collects field registrations into [`Bindings`].
pub struct Binder<'a> {
    bindings: Bindings<'a>,
    target: Target,
    error: Option<Error>,
}

impl<'a> Binder<'a> {
    fn new() -> Self {
        Self {
            bindings: Bindings {
                top: Namespace::new(),
                sections: Vec::new(),
                by_tag: HashMap::new(),
                by_name: HashMap::new(),
            },
            target: Target::Top,
            error: None,
        }
    }

    /// Register a leaf field under `tag` (case-insensitive), or skip it when
    /// `tag` is [`SKIP`].
    pub fn field(&mut self, tag: &str, slot: &'a mut dyn Slot) {
        let tag = tag.trim();
        if tag == SKIP {
            return;
        }
        if tag.is_empty() {
            self.fail(tag, "empty key");
            return;
        }
        if is_section_tag(tag) {
            self.fail(tag, "section tag on a non-record field");
            return;
        }
        let key = tag.to_lowercase();
        let ns = match self.target {
            Target::Top => &mut self.bindings.top,
            Target::Section(idx) => &mut self.bindings.sections[idx].fields,
        };
        let duplicate = match ns.slots.entry(key) {
            Entry::Occupied(_) => true,
            Entry::Vacant(v) => {
                v.insert(slot);
                false
            }
        };
        if duplicate {
            self.fail(tag, "duplicate key");
        }
    }

    /// Register a nested record.
    ///
    /// `[NAME]` makes the record a section activated by that header, [`SKIP`]
    /// merges its fields into the current namespace, and any other tag is
    /// treated as the section `[tag]`.
    pub fn record(&mut self, tag: &str, child: &'a mut dyn Schema) {
        let tag = tag.trim();
        if tag == SKIP {
            child.bind(self);
            return;
        }
        if tag.is_empty() || tag == "[]" {
            self.fail(tag, "empty section name");
            return;
        }
        let section_tag = if is_section_tag(tag) {
            tag.to_lowercase()
        } else if tag.contains(['[', ']']) {
            self.fail(tag, "malformed section tag");
            return;
        } else {
            format!("[{}]", tag.to_lowercase())
        };
        if self.bindings.by_tag.contains_key(&section_tag) {
            self.fail(tag, "duplicate section");
            return;
        }
        let idx = self.bindings.sections.len();
        let name = section_tag[1..section_tag.len() - 1].trim().to_string();
        self.bindings.by_tag.insert(section_tag.clone(), idx);
        self.bindings.by_name.entry(name).or_insert(idx);
        self.bindings.sections.push(SectionEntry {
            tag: section_tag,
            fields: Namespace::new(),
        });

        let outer = self.target;
        self.target = Target::Section(idx);
        child.bind(self);
        self.target = outer;
    }

    fn fail(&mut self, key: &str, message: &str) {
        if self.error.is_none() {
            self.error = Some(Error::mapping(key, message));
        }
    }

    fn finish(self) -> Result<Bindings<'a>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.bindings),
        }
    }
}

fn is_section_tag(tag: &str) -> bool {
    tag.len() >= 2 && tag.starts_with('[') && tag.ends_with(']')
}

/// Build the lookup tables for `record`.
pub(crate) fn bind<'a, S: Schema + ?Sized>(record: &'a mut S) -> Result<Bindings<'a>> {
    let mut binder = Binder::new();
    record.bind(&mut binder);
    let bindings = binder.finish()?;
    tracing::trace!(
        top = bindings.top.len(),
        sections = bindings.sections.len(),
        "schema bound"
    );
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Net {
        host: String,
        port: u16,
    }

    impl Schema for Net {
        fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
            b.field("Host", &mut self.host);
            b.field("Port", &mut self.port);
        }
    }

    #[derive(Default)]
    struct Root {
        name: String,
        hidden: String,
        net: Net,
        grouped: Net,
    }

    impl Schema for Root {
        fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
            b.field(" Name ", &mut self.name);
            b.field(SKIP, &mut self.hidden);
            b.record("Net", &mut self.net);
            b.record(SKIP, &mut self.grouped);
        }
    }

    #[test]
    fn builds_namespaces() {
        let mut root = Root::default();
        let mut bindings = bind(&mut root).unwrap();
        assert_eq!(bindings.top.len(), 3);
        assert!(bindings.top.get_mut("name").is_some());
        assert!(bindings.top.get_mut("host").is_some());
        assert!(bindings.top.get_mut("-").is_none());
        let idx = bindings.section("[net]").unwrap();
        assert_eq!(bindings.bare_section("net"), Some(idx));
        assert_eq!(bindings.sections[idx].tag, "[net]");
        assert!(bindings.sections[idx].fields.get_mut("port").is_some());
    }

    struct Clash {
        a: String,
        b: String,
    }

    impl Schema for Clash {
        fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
            b.field("Key", &mut self.a);
            b.field("KEY", &mut self.b);
        }
    }

    #[test]
    fn duplicate_keys_are_mapping_errors() {
        let mut c = Clash {
            a: String::new(),
            b: String::new(),
        };
        let err = bind(&mut c).err().unwrap();
        assert!(matches!(err, Error::Mapping { ref message, .. } if message == "duplicate key"));
    }

    struct BadLeaf {
        v: i32,
    }

    impl Schema for BadLeaf {
        fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
            b.field("[oops]", &mut self.v);
        }
    }

    #[test]
    fn section_tag_on_leaf_is_rejected() {
        let mut r = BadLeaf { v: 0 };
        assert!(matches!(bind(&mut r), Err(Error::Mapping { .. })));
    }
}
