#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// 1-based line number
    pub number: usize,
    /// Line text without its terminator, untrimmed
    pub raw: &'a str,
    pub kind: LineKind<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    /// Header text including the brackets, case preserved
    Section(&'a str),
    KeyValue { key: &'a str, value: &'a str },
    Other(&'a str),
}

#[inline]
#[cfg(feature = "perf_memchr")]
fn find_newline(s: &str) -> Option<usize> {
    memchr::memchr(b'\n', s.as_bytes())
}

#[inline]
#[cfg(not(feature = "perf_memchr"))]
fn find_newline(s: &str) -> Option<usize> {
    s.find('\n')
}

pub fn scan<'a>(input: &'a str) -> Vec<ParsedLine<'a>> {
    iter(input).collect()
}

pub struct LineIter<'a> {
    rest: &'a str,
    number: usize,
}

pub fn iter<'a>(input: &'a str) -> LineIter<'a> {
    LineIter {
        rest: input,
        number: 0,
    }
}

impl<'a> Iterator for LineIter<'a> {
    type Item = ParsedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let raw = match find_newline(self.rest) {
            Some(pos) => {
                let (line, remaining) = self.rest.split_at(pos + 1);
                self.rest = remaining;
                &line[..pos]
            }
            None => core::mem::take(&mut self.rest),
        };
        self.number += 1;
        Some(parse_line(self.number, raw.strip_suffix('\r').unwrap_or(raw)))
    }
}

fn parse_line(number: usize, raw: &str) -> ParsedLine<'_> {
    ParsedLine {
        number,
        raw,
        kind: classify(raw),
    }
}

fn classify(raw: &str) -> LineKind<'_> {
    let body = raw.trim();
    if body.is_empty() {
        return LineKind::Blank;
    }
    if body.starts_with(';') || body.starts_with('#') {
        return LineKind::Comment;
    }
    if body.len() >= 2 && body.starts_with('[') && body.ends_with(']') {
        return LineKind::Section(body);
    }
    if let Some((key, value)) = body.split_once('=') {
        return LineKind::KeyValue {
            key: key.trim(),
            value: value.trim(),
        };
    }
    LineKind::Other(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<LineKind<'_>> {
        scan(input).into_iter().map(|pl| pl.kind).collect()
    }

    #[test]
    fn classifies_in_priority_order() {
        let input = "\n  ; note\n# hash\n[Start]\nFoo = Bar=Baz\njunk\n[x=y]";
        assert_eq!(
            kinds(input),
            vec![
                LineKind::Blank,
                LineKind::Comment,
                LineKind::Comment,
                LineKind::Section("[Start]"),
                LineKind::KeyValue {
                    key: "Foo",
                    value: "Bar=Baz"
                },
                LineKind::Other("junk"),
                LineKind::Section("[x=y]"),
            ]
        );
    }

    #[test]
    fn keeps_raw_text_and_numbers() {
        let lines = scan("a=1\r\n  b = 2  \nlast");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].raw, "a=1");
        assert_eq!(lines[1].number, 2);
        assert_eq!(lines[1].raw, "  b = 2  ");
        assert_eq!(
            lines[1].kind,
            LineKind::KeyValue {
                key: "b",
                value: "2"
            }
        );
        assert_eq!(lines[2].number, 3);
        assert_eq!(lines[2].kind, LineKind::Other("last"));
    }

    #[test]
    fn trailing_newline_adds_no_line() {
        assert_eq!(scan("a=1\n").len(), 1);
        assert!(scan("").is_empty());
    }

    #[test]
    fn empty_value_and_lone_bracket() {
        assert_eq!(
            kinds("k =\n["),
            vec![
                LineKind::KeyValue { key: "k", value: "" },
                LineKind::Other("["),
            ]
        );
    }
}
