#![no_main]
use arbitrary::Arbitrary;
use ini::{Binder, Schema};
use libfuzzer_sys::fuzz_target;

const KEYS: [&str; 4] = ["Count", "NAME", "flag", "missing"];

#[derive(Default)]
struct Target {
    count: Vec<i16>,
    name: String,
    flag: bool,
}

impl Schema for Target {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("count", &mut self.count);
        b.field("name", &mut self.name);
        b.field("flag", &mut self.flag);
    }
}

#[derive(Arbitrary, Debug)]
enum Line {
    Blank,
    Comment(String),
    Pair { key: u8, value: i16 },
}

fuzz_target!(|lines: Vec<Line>| {
    let mut text = String::new();
    let mut expected_counts = Vec::new();
    let mut expected_unmatched = 0;
    for line in &lines {
        match line {
            Line::Blank => text.push('\n'),
            Line::Comment(c) => {
                text.push_str("; ");
                text.push_str(&c.replace(['\n', '\r'], " "));
                text.push('\n');
            }
            Line::Pair { key, value } => {
                let key = KEYS[*key as usize % KEYS.len()];
                match key {
                    "Count" => expected_counts.push(*value),
                    "missing" => expected_unmatched += 1,
                    _ => {}
                }
                text.push_str(&format!("{key} = {value}\n"));
            }
        }
    }
    let mut t = Target::default();
    let outcome = ini::decode(text.as_bytes(), &mut t);
    assert!(outcome.is_ok());
    assert_eq!(t.count, expected_counts);
    assert_eq!(outcome.unmatched.len(), expected_unmatched);
});
