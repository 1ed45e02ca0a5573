use std::io::Write;

use crate::manifest::error::ManifestError;

/// Content bytes allowed on the first physical line of an entry. With a
/// two-byte terminator this gives the 72-byte line limit of the JAR format.
pub const MANIFEST_LINE_LENGTH: usize = 70;

/// Longest key, in UTF-8 bytes, accepted by [`write_key_val`]
pub const MAX_KEY_LENGTH: usize = MANIFEST_LINE_LENGTH - 2;

/// Host platform line separator, used when no override is given
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
/// Host platform line separator, used when no override is given
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Write a single `key: value` entry to `stream`.
///
/// Entries whose key and value together exceed 68 bytes are wrapped: the
/// first line carries 70 bytes of `key: value`, every continuation line
/// starts with `line_separator` followed by one space and carries at most 69
/// more bytes. The entry always ends with `line_separator`.
///
/// Wrapping is byte based, so a multi-byte character may be split across two
/// physical lines, exactly as JAR tooling does.
pub fn write_key_val<W: Write + ?Sized>(
    stream: &mut W,
    key: &str,
    value: &str,
    line_separator: &str,
) -> Result<(), ManifestError> {
    let key_bytes = key.as_bytes();
    let value_bytes = value.as_bytes();
    let separator = line_separator.as_bytes();

    if key_bytes.is_empty() || key_bytes.len() > MAX_KEY_LENGTH {
        return Err(ManifestError::BadKeyLength { key: key.to_string() });
    }

    if key_bytes.len() + value_bytes.len() > MANIFEST_LINE_LENGTH - 2 {
        let mut kv_buffer = Vec::with_capacity(key_bytes.len() + 2 + value_bytes.len());
        kv_buffer.extend_from_slice(key_bytes);
        kv_buffer.extend_from_slice(b": ");
        kv_buffer.extend_from_slice(value_bytes);

        // Always longer than MANIFEST_LINE_LENGTH here
        let (first, rest) = kv_buffer.split_at(MANIFEST_LINE_LENGTH);
        stream.write_all(first)?;

        // One byte of every continuation line goes to the leading space
        for part in rest.chunks(MANIFEST_LINE_LENGTH - 1) {
            stream.write_all(separator)?;
            stream.write_all(b" ")?;
            stream.write_all(part)?;
        }
    } else {
        stream.write_all(key_bytes)?;
        stream.write_all(b": ")?;
        stream.write_all(value_bytes)?;
    }

    stream.write_all(separator)?;
    Ok(())
}
