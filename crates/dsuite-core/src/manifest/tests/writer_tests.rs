use crate::manifest::error::ManifestError;
use crate::manifest::writer::{write_key_val, MANIFEST_LINE_LENGTH};

fn render(key: &str, value: &str, sep: &str) -> Result<Vec<u8>, ManifestError> {
    let mut out = Vec::new();
    write_key_val(&mut out, key, value, sep)?;
    Ok(out)
}

/// Undo the wrapping: drop the final separator and every `sep + " "` marker.
/// Works on bytes since wrapping may split a multi-byte character.
fn unwrap_lines(data: &[u8], sep: &str) -> Vec<u8> {
    let marker = [sep.as_bytes(), b" "].concat();
    let body = data
        .strip_suffix(sep.as_bytes())
        .expect("entry must end with the separator");

    let mut joined = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        if body[i..].starts_with(&marker) {
            i += marker.len();
        } else {
            joined.push(body[i]);
            i += 1;
        }
    }
    joined
}

#[test]
fn test_short_entry_is_single_line() -> Result<(), ManifestError> {
    let out = render("Created-By", "dsuite", "\n")?;
    assert_eq!(out, b"Created-By: dsuite\n");
    Ok(())
}

#[test]
fn test_entry_at_limit_is_not_wrapped() -> Result<(), ManifestError> {
    // 1 byte key + 67 byte value = 68, still one line
    let value = "v".repeat(67);
    let out = render("K", &value, "\r\n")?;
    assert_eq!(out, format!("K: {}\r\n", value).into_bytes());
    assert_eq!(out.len(), 72);
    Ok(())
}

#[test]
fn test_entry_one_past_limit_wraps() -> Result<(), ManifestError> {
    let value = "v".repeat(68);
    let out = render("K", &value, "\n")?;
    let expected = format!("K: {}\n {}\n", "v".repeat(67), "v");
    assert_eq!(String::from_utf8(out).unwrap(), expected);
    Ok(())
}

#[test]
fn test_long_entry_wraps_with_continuations() -> Result<(), ManifestError> {
    let value = "a".repeat(100);
    let out = render("Class-Path", &value, "\n")?;

    // "Class-Path: " is 12 bytes, so the first line holds 58 value bytes
    let expected = format!("Class-Path: {}\n {}\n", "a".repeat(58), "a".repeat(42));
    assert_eq!(String::from_utf8(out).unwrap(), expected);
    Ok(())
}

#[test]
fn test_wrapped_lines_respect_72_byte_limit() -> Result<(), ManifestError> {
    let value = "x".repeat(500);
    let out = render("Long-Entry", &value, "\r\n")?;

    let text = String::from_utf8(out.clone()).unwrap();
    let lines: Vec<&str> = text.split_inclusive("\r\n").collect();
    assert!(lines.len() > 2);
    for (i, line) in lines.iter().enumerate() {
        assert!(line.len() <= 72, "line {} is {} bytes", i, line.len());
        if i > 0 {
            assert!(line.starts_with(' '), "continuation line {} must start with a space", i);
        }
    }
    assert_eq!(lines[0].len(), MANIFEST_LINE_LENGTH + 2);

    assert_eq!(unwrap_lines(&out, "\r\n"), format!("Long-Entry: {}", value).into_bytes());
    Ok(())
}

#[test]
fn test_wrapping_reassembles_multibyte_values() -> Result<(), ManifestError> {
    let value = "é".repeat(80);
    let out = render("Description", &value, "\n")?;
    assert_eq!(unwrap_lines(&out, "\n"), format!("Description: {}", value).into_bytes());
    Ok(())
}

#[test]
fn test_empty_key_is_rejected() {
    let result = render("", "value", "\n");
    assert!(matches!(result, Err(ManifestError::BadKeyLength { ref key }) if key.is_empty()));
}

#[test]
fn test_key_length_bounds() {
    // 68 bytes is the longest key allowed
    let longest = "k".repeat(68);
    assert!(render(&longest, "", "\n").is_ok());

    let too_long = "k".repeat(69);
    match render(&too_long, "", "\n") {
        Err(ManifestError::BadKeyLength { key }) => assert_eq!(key, too_long),
        other => panic!("expected BadKeyLength, got {:?}", other),
    }
}

#[test]
fn test_key_length_is_measured_in_bytes() {
    // 35 characters but 70 bytes
    let key = "é".repeat(35);
    assert!(matches!(
        render(&key, "v", "\n"),
        Err(ManifestError::BadKeyLength { .. })
    ));
}

#[test]
fn test_bad_key_writes_nothing() {
    let mut out = Vec::new();
    let result = write_key_val(&mut out, "", "value", "\n");
    assert!(result.is_err());
    assert!(out.is_empty());
}
