/// Base-10 and decimal/exponent parsing for the numeric field widths.
pub(crate) trait ParseNumber: Sized {
    fn parse_number(s: &str) -> Option<Self>;
}

macro_rules! impl_parse_integer {
    ($signed:expr => $($t:ty),*) => {$(
        impl ParseNumber for $t {
            #[inline]
            fn parse_number(s: &str) -> Option<Self> {
                // Unsigned values take digits only, no sign
                if !$signed && s.starts_with('+') {
                    return None;
                }
                #[cfg(feature = "perf_lexical")]
                let parsed = lexical_core::parse::<$t>(s.as_bytes()).ok();
                #[cfg(not(feature = "perf_lexical"))]
                let parsed = s.parse::<$t>().ok();
                parsed
            }
        }
    )*};
}

impl_parse_integer!(true => i8, i16, i32, i64, isize);
impl_parse_integer!(false => u8, u16, u32, u64, usize);

macro_rules! impl_parse_float {
    ($($t:ty),*) => {$(
        impl ParseNumber for $t {
            #[inline]
            fn parse_number(s: &str) -> Option<Self> {
                #[cfg(feature = "perf_lexical")]
                let parsed = lexical_core::parse::<$t>(s.as_bytes()).ok()?;
                #[cfg(not(feature = "perf_lexical"))]
                let parsed = s.parse::<$t>().ok()?;
                // Out-of-range literals round to infinity; only spelled-out
                // infinities may produce one.
                if parsed.is_infinite() && !is_infinity_literal(s) {
                    return None;
                }
                Some(parsed)
            }
        }
    )*};
}

impl_parse_float!(f32, f64);

fn is_infinity_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
mod tests {
    use super::ParseNumber;

    #[test]
    fn integers_respect_width() {
        assert_eq!(i8::parse_number("-128"), Some(-128));
        assert_eq!(i8::parse_number("128"), None);
        assert_eq!(u16::parse_number("65535"), Some(65535));
        assert_eq!(u16::parse_number("-1"), None);
        assert_eq!(u16::parse_number("+1"), None);
        assert_eq!(i16::parse_number("+1"), Some(1));
        assert_eq!(i64::parse_number("99999999999999999999"), None);
        assert_eq!(i32::parse_number("4x"), None);
    }

    #[test]
    fn floats_reject_overflow_but_accept_infinity() {
        assert_eq!(f64::parse_number("1.5e3"), Some(1500.0));
        assert_eq!(f32::parse_number("1e39"), None);
        assert_eq!(f64::parse_number("1e39"), Some(1e39));
        assert_eq!(f64::parse_number("1e400"), None);
        assert_eq!(f64::parse_number("-inf"), Some(f64::NEG_INFINITY));
        assert_eq!(f32::parse_number("abc"), None);
    }
}
