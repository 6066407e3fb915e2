#![no_main]
use arbitrary::Arbitrary;
use ini::{Binder, Options, Schema, UnknownSection};
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Section {
    value: i64,
    items: Vec<u32>,
}

impl Schema for Section {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("value", &mut self.value);
        b.field("item", &mut self.items);
    }
}

#[derive(Default)]
struct Root {
    title: String,
    a: Section,
    b: Section,
}

impl Schema for Root {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("title", &mut self.title);
        b.record("[a]", &mut self.a);
        b.record("b", &mut self.b);
    }
}

#[derive(Arbitrary, Debug)]
struct Input {
    ignore_unknown: bool,
    bare_headers: bool,
    stop_on_error: bool,
    text: String,
}

fuzz_target!(|input: Input| {
    let options = Options {
        unknown_sections: if input.ignore_unknown {
            UnknownSection::Ignore
        } else {
            UnknownSection::Record
        },
        bare_section_headers: input.bare_headers,
        stop_on_error: input.stop_on_error,
    };
    let mut root = Root::default();
    let outcome = ini::decode_with_options(input.text.as_bytes(), &mut root, &options);
    let lines = input.text.split('\n').count();
    assert!(outcome.unmatched.iter().all(|u| u.line >= 1 && u.line <= lines));
});
