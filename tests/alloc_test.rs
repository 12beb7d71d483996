use std::error::Error;

// Only use import when creating debug builds, see also configuration below
#[cfg(debug_assertions)]
use assert_no_alloc::AllocDisabler;
use tagged_json::{
    parser::{parse, try_parse, SyntaxErrorKind},
    value::Value,
    writer::{dump_into, dump_into_custom, DumpSettings},
};

// Only enable when creating debug builds
#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

fn assert_no_alloc<F: FnOnce() -> Result<(), Box<dyn Error>>>(func: F) {
    assert_no_alloc::assert_no_alloc(func).unwrap()
}

#[test]
fn parse_scalars() {
    assert_no_alloc(|| {
        assert_eq!(Value::Null, parse(" null "));
        assert_eq!(Value::Boolean(true), parse("true"));
        assert_eq!(Value::Number(-1234.5e-6), parse("-1234.5e-6"));
        assert_eq!(Value::Number(0.0), parse("1e-10000"));
        assert!(parse("\"\"").is_string());
        Ok(())
    });
}

#[test]
fn parse_errors() {
    assert_no_alloc(|| {
        assert!(parse("tru").is_error());
        assert!(parse("01").is_error());
        assert!(parse("1e309").is_error());
        assert!(parse("]").is_error());

        match try_parse("\n\n  nul") {
            Err(e) => {
                assert_eq!(SyntaxErrorKind::InvalidLiteral, e.kind);
                assert_eq!(2, e.position.line);
                assert_eq!(2, e.position.column);
            }
            Ok(_) => panic!("Should have failed"),
        }
        Ok(())
    });
}

#[test]
fn dump_values() {
    let large_string = "abcd".repeat(500);
    let value = Value::from_iter([
        Value::from("\0\n\t \u{10FFFF}"),
        Value::from(large_string.as_str()),
        Value::from(1234.56e-7),
        Value::from(1e300),
        Value::from(true),
        Value::Null,
        Value::from_iter([("\0\n\t \u{10FFFF}".to_owned(), Value::from(false))]),
    ]);
    // Pre-allocate to avoid allocations during test execution
    let mut out = String::with_capacity(4096);

    assert_no_alloc(|| {
        dump_into_custom(
            &value,
            &mut out,
            &DumpSettings {
                // To test creation of surrogate pair escape sequences for supplementary code points
                escape_all_non_ascii: true,
                ..Default::default()
            },
        );
        Ok(())
    });

    let expected_json = "[\"\\u0000\\n\\t \\uDBFF\\uDFFF\", \"".to_owned()
        + &large_string
        + "\", 0.000123456, 1e300, true, null, {\"\\u0000\\n\\t \\uDBFF\\uDFFF\": false}]";
    assert_eq!(expected_json, out);
}

#[test]
fn dump_appends() {
    let value = Value::from(-0.5);
    let mut out = String::with_capacity(64);

    assert_no_alloc(|| {
        dump_into(&value, &mut out);
        out.push(' ');
        dump_into(&Value::Error, &mut out);
        Ok(())
    });
    assert_eq!("-0.5 parse error", out);
}
