pub mod cli;
pub mod error;
pub mod options;
mod report;
mod scan;

pub use error::{MinifyError, MinifyErrorKind};
pub use options::{NewlineMode, Options};
pub use report::MinifyLogEntry;

/// Minify the buffer in place and return the length of the valid
/// prefix: bytes `[0, len)` are the minified output.
///
/// The pass is tolerant of malformed input and always completes; the
/// buffer only grows (by at most one byte) when rounding carries a
/// number past its original width, e.g. `95` at precision `-1`.
pub fn minify(buf: &mut Vec<u8>, opts: &Options) -> usize {
    let mut log = Vec::new();
    scan::minify_buf(buf, opts, &mut log)
}

/// Like [`minify`], additionally returning the diagnostics collected
/// during the pass (malformed `\u` escapes).
pub fn minify_with_log(buf: &mut Vec<u8>, opts: &Options) -> (usize, Vec<MinifyLogEntry>) {
    let mut log = Vec::new();
    let len = scan::minify_buf(buf, opts, &mut log);
    (len, log)
}

/// Convenience: minify a string into a fresh `String`.
pub fn minify_to_string(input: &str, opts: &Options) -> String {
    let mut buf = input.as_bytes().to_vec();
    let len = minify(&mut buf, opts);
    buf.truncate(len);
    match String::from_utf8(buf) {
        Ok(s) => s,
        // Unreachable for UTF-8 input, but the tolerant contract does
        // not panic on the impossible either.
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

#[cfg(feature = "serde")]
/// Minify and then parse the result into a `serde_json::Value`.
pub fn minify_to_value(input: &str, opts: &Options) -> Result<serde_json::Value, MinifyError> {
    let s = minify_to_string(input, opts);
    serde_json::from_str(&s).map_err(|e| MinifyError::from_serde("parse", e))
}

#[cfg(test)]
mod tests;
