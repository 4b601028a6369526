use memchr::memchr2;

use super::cursor::Cursor;
use crate::report::MinifyLogEntry;

const MALFORMED_UNICODE: &str = "malformed \\u escape";

/// Rewrite one quoted string in place. Entry condition: the cursor is on
/// the opening `"`. Plain runs (including multi-byte UTF-8) pass through
/// untouched; escapes are canonicalised per JSON rules. Reaching the end
/// of the buffer before the closing quote keeps what was consumed.
pub(crate) fn rewrite_string(cur: &mut Cursor<'_>, log: &mut Vec<MinifyLogEntry>) {
    cur.pass(1);
    loop {
        let here = cur.read_pos();
        match memchr2(b'"', b'\\', &cur.bytes()[here..]) {
            None => {
                cur.pass(cur.remaining());
                return;
            }
            Some(n) => {
                cur.pass(n);
                if cur.peek() == Some(b'"') {
                    cur.pass(1);
                    return;
                }
                rewrite_escape(cur, log);
            }
        }
    }
}

/// Entry condition: the cursor is on a `\` inside a string.
fn rewrite_escape(cur: &mut Cursor<'_>, log: &mut Vec<MinifyLogEntry>) {
    match cur.get(cur.read_pos() + 1) {
        // Lone backslash at end of input: keep it and let the pass end.
        None => cur.pass(1),
        Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => cur.pass(2),
        Some(b'u') => rewrite_unicode(cur, log),
        // Unknown escape: drop the backslash, the next byte is then
        // re-examined by the string loop as a plain byte.
        Some(_) => cur.skip(1),
    }
}

/// Canonicalise a `\uXXXX` escape. The cursor is on the `\`.
fn rewrite_unicode(cur: &mut Cursor<'_>, log: &mut Vec<MinifyLogEntry>) {
    let at = cur.read_pos();
    let value = match hex4(cur.bytes(), at + 2) {
        Some(v) => v,
        None => {
            log.push(MinifyLogEntry {
                position: at,
                message: MALFORMED_UNICODE,
            });
            // Drop the `\u`. When four bytes of bad hex are present,
            // skip past them as well instead of re-scanning; a short
            // tail is left for the string loop to finish off.
            cur.skip(2);
            if cur.remaining() >= 4 {
                cur.skip(4);
            }
            return;
        }
    };
    match value {
        0x08 => short_escape(cur, b'b'),
        0x0C => short_escape(cur, b'f'),
        0x0A => short_escape(cur, b'n'),
        0x0D => short_escape(cur, b'r'),
        0x09 => short_escape(cur, b't'),
        // Remaining control characters have no two-char form; the
        // original escape is already minimal.
        0x00..=0x1F => cur.pass(6),
        // A raw quote or backslash would corrupt the string.
        0x22 => short_escape(cur, b'"'),
        0x5C => short_escape(cur, b'\\'),
        0x20..=0x7F => {
            cur.skip(6);
            cur.emit(value as u8);
        }
        0xD800..=0xDBFF => match low_surrogate(cur.bytes(), at + 6) {
            Some(low) => {
                let combined = 0x10000 + ((value - 0xD800) << 10 | (low - 0xDC00));
                cur.skip(12);
                emit_scalar(cur, combined);
            }
            // Unpaired high surrogate: keep the escape verbatim so the
            // output stays valid UTF-8 with the same JSON value.
            None => cur.pass(6),
        },
        // Lone low surrogate, same reasoning.
        0xDC00..=0xDFFF => cur.pass(6),
        _ => {
            cur.skip(6);
            emit_scalar(cur, value);
        }
    }
}

fn short_escape(cur: &mut Cursor<'_>, letter: u8) {
    cur.skip(6);
    cur.emit(b'\\');
    cur.emit(letter);
}

fn emit_scalar(cur: &mut Cursor<'_>, value: u32) {
    let mut tmp = [0u8; 4];
    if let Some(ch) = char::from_u32(value) {
        cur.emit_all(ch.encode_utf8(&mut tmp).as_bytes());
    }
}

/// Four hex digits at `at`, or `None` when short or non-hex.
fn hex4(buf: &[u8], at: usize) -> Option<u32> {
    if at + 4 > buf.len() {
        return None;
    }
    let mut v = 0u32;
    for &b in &buf[at..at + 4] {
        let d = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return None,
        };
        v = v << 4 | u32::from(d);
    }
    Some(v)
}

/// A `\uXXXX` low surrogate starting at `at`, if present.
fn low_surrogate(buf: &[u8], at: usize) -> Option<u32> {
    if buf.get(at) != Some(&b'\\') || buf.get(at + 1) != Some(&b'u') {
        return None;
    }
    match hex4(buf, at + 2) {
        Some(v) if (0xDC00..=0xDFFF).contains(&v) => Some(v),
        _ => None,
    }
}
