use super::*;

const CORPUS: &[&str] = &[
    "{ \"a\" : 1 ,  \"b\" : [ 2, 3.00 ] }",
    "[]",
    "{}",
    "[1, 2.50, -0.000, 1e5, 0.00012, 123000]",
    "{\"s\": \"\\u0041\\u00e9\\uD83D\\uDE00\", \"t\": \"a\\nb\"}",
    "{\"nested\": {\"deep\": [[[{\"x\": null}]]], \"flag\": true}}",
    "  [ true , false , null ]  ",
    "\"plain string with spaces\"",
    "-12.5e-3",
    "{\"unicode\": \"中文 ünïcode\"}",
];

fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Scan minified output and assert no whitespace survives outside string
/// literals.
fn assert_no_bare_whitespace(out: &str) {
    let bytes = out.as_bytes();
    let mut in_string = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_string => i += 1,
            b'"' => in_string = !in_string,
            b if !in_string && is_ws(b) => {
                panic!("bare whitespace {:?} at {} in {:?}", b as char, i, out)
            }
            _ => {}
        }
        i += 1;
    }
}

/// JSON value equality with numbers compared after decimal parsing, so
/// `100000` and `1E5` agree.
fn json_eq(a: &serde_json::Value, b: &serde_json::Value) -> bool {
    use serde_json::Value;
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(p, q)| json_eq(p, q))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| json_eq(v, w)))
        }
        _ => a == b,
    }
}

#[test]
fn output_never_grows_without_rounding() {
    for s in CORPUS {
        let out = mini(s);
        assert!(out.len() <= s.len(), "{:?} grew to {:?}", s, out);
    }
}

#[test]
fn minification_is_idempotent() {
    for s in CORPUS {
        let once = mini(s);
        let twice = mini(&once);
        assert_eq!(once, twice, "not idempotent for {:?}", s);
    }
}

#[test]
fn idempotent_under_rounding() {
    for s in CORPUS {
        let once = mini_p(s, 2);
        let twice = mini_p(&once, 2);
        assert_eq!(once, twice, "not idempotent for {:?}", s);
    }
}

#[test]
fn no_whitespace_outside_strings() {
    for s in CORPUS {
        assert_no_bare_whitespace(&mini(s));
    }
}

#[test]
fn values_are_preserved() {
    for s in CORPUS {
        let original: serde_json::Value = serde_json::from_str(s.trim()).unwrap();
        let minified: serde_json::Value = serde_json::from_str(&mini(s)).unwrap();
        assert!(
            json_eq(&original, &minified),
            "value changed for {:?}: {:?} vs {:?}",
            s,
            original,
            minified
        );
    }
}

#[test]
fn minified_output_parses() {
    for s in CORPUS {
        let out = mini(s);
        serde_json::from_str::<serde_json::Value>(&out)
            .unwrap_or_else(|e| panic!("output {:?} does not parse: {}", out, e));
    }
}

#[test]
fn rounding_matches_decimal_rounding() {
    // Output value == round_half_away_from_zero(input, precision).
    let cases: &[(&str, i64, f64)] = &[
        ("1.236", 2, 1.24),
        ("9.95", 1, 10.0),
        ("5.5", 0, 6.0),
        ("-4.5", 0, -5.0),
        ("1234", -2, 1200.0),
        ("95", -1, 100.0),
        ("0.0001234", 5, 0.00012),
    ];
    for &(input, p, want) in cases {
        let out = mini_p(input, p);
        let got: f64 = out.parse().unwrap();
        assert_eq!(got, want, "{} @ {} -> {}", input, p, out);
    }
}

#[test]
fn shortest_form_spot_checks() {
    // No legal spelling of the same value is shorter than the output.
    let cases: &[(&str, &[&str])] = &[
        ("100000", &["1E5"]),
        ("0.00012", &["12E-5", "1.2E-4"]),
        ("123000", &["123E3", "1.23E5", "123000"]),
        ("0.01", &["0.01", "1E-2"]),
        ("12.5", &["12.5", "125E-1"]),
    ];
    for &(input, spellings) in cases {
        let out = mini(input);
        let shortest = spellings.iter().map(|s| s.len()).min().unwrap();
        assert!(
            out.len() <= shortest,
            "{} -> {} but {} bytes possible",
            input,
            out,
            shortest
        );
    }
}

#[test]
fn deep_nesting_survives_round_trip() {
    let depth = 100;
    let mut s = String::new();
    for i in 0..depth {
        if i % 2 == 0 {
            s.push_str("[ ");
        } else {
            s.push_str("{ \"k\" : ");
        }
    }
    s.push_str("0");
    for i in (0..depth).rev() {
        if i % 2 == 0 {
            s.push_str(" ]");
        } else {
            s.push_str(" }");
        }
    }
    let out = mini(&s);
    let a: serde_json::Value = serde_json::from_str(&s).unwrap();
    let b: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(json_eq(&a, &b));
    assert_no_bare_whitespace(&out);
}
