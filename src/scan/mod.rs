//! The minification engine: a single forward pass over one byte buffer,
//! compacting accepted bytes down over the gaps left by dropped ones.

mod cursor;
mod number;
mod stack;
mod strings;

use crate::options::{NewlineMode, Options};
use crate::report::MinifyLogEntry;
use cursor::Cursor;
use stack::{Frame, NestStack};

pub(crate) fn minify_buf(buf: &mut Vec<u8>, opts: &Options, log: &mut Vec<MinifyLogEntry>) -> usize {
    let mut driver = Driver {
        cur: Cursor::new(buf),
        stack: NestStack::new(),
        comma_ok: false,
        sep_pending: false,
        scratch: Vec::new(),
    };
    driver.run(opts, log);
    driver.cur.finish()
}

/// State loop dispatching on the current byte. Tolerant throughout:
/// whitespace, unknown bytes, unmatched closers and misplaced commas are
/// dropped, everything recognisable is rewritten, and the pass always
/// runs to the end of the buffer.
struct Driver<'b> {
    cur: Cursor<'b>,
    stack: NestStack,
    /// A value just completed, so a `,` separator would be legal here.
    comma_ok: bool,
    /// A record separator is owed before the next value (NDJSON mode).
    sep_pending: bool,
    /// Reusable render buffer for the number canonicaliser.
    scratch: Vec<u8>,
}

impl<'b> Driver<'b> {
    fn run(&mut self, opts: &Options, log: &mut Vec<MinifyLogEntry>) {
        while let Some(b) = self.cur.peek() {
            match b {
                b'"' => {
                    self.value_lead();
                    strings::rewrite_string(&mut self.cur, log);
                    self.comma_ok = true;
                }
                b'{' => {
                    self.value_lead();
                    self.cur.pass(1);
                    self.stack.push(Frame::Object);
                    self.object_label(log);
                }
                b'}' => {
                    if self.stack.top() == Some(Frame::Object) {
                        self.cur.pass(1);
                        self.stack.pop();
                        self.comma_ok = true;
                    } else {
                        self.cur.skip(1);
                    }
                }
                b'[' => {
                    self.value_lead();
                    self.cur.pass(1);
                    self.stack.push(Frame::Array);
                    self.comma_ok = false;
                }
                b']' => {
                    if self.stack.top() == Some(Frame::Array) {
                        self.cur.pass(1);
                        self.stack.pop();
                        self.comma_ok = true;
                    } else {
                        self.cur.skip(1);
                    }
                }
                b',' => {
                    if self.comma_ok && !self.stack.is_empty() {
                        self.cur.pass(1);
                        self.comma_ok = false;
                        if self.stack.top() == Some(Frame::Object) {
                            self.object_label(log);
                        }
                    } else {
                        self.cur.skip(1);
                    }
                }
                b't' => self.literal(b"true"),
                b'f' => self.literal(b"false"),
                b'n' => self.literal(b"null"),
                b'-' | b'0'..=b'9' => {
                    self.value_lead();
                    number::rewrite_number(&mut self.cur, opts.precision, &mut self.scratch);
                    self.comma_ok = true;
                }
                b'\n' => self.newline(opts.newlines),
                _ => self.cur.skip(1),
            }
        }
    }

    /// Object sub-state, entered after `{` and after each `,` inside an
    /// object: drop junk until a quoted label or the closer, rewrite the
    /// label, then drop junk until the `:`.
    fn object_label(&mut self, log: &mut Vec<MinifyLogEntry>) {
        loop {
            match self.cur.peek() {
                None => return,
                Some(b'"') => {
                    strings::rewrite_string(&mut self.cur, log);
                    loop {
                        match self.cur.peek() {
                            None => return,
                            Some(b':') => {
                                self.cur.pass(1);
                                break;
                            }
                            Some(_) => self.cur.skip(1),
                        }
                    }
                    self.comma_ok = false;
                    return;
                }
                Some(b'}') => {
                    self.cur.pass(1);
                    self.stack.pop();
                    self.comma_ok = true;
                    return;
                }
                Some(_) => self.cur.skip(1),
            }
        }
    }

    fn literal(&mut self, word: &'static [u8]) {
        let at = self.cur.read_pos();
        if self.cur.bytes().get(at..at + word.len()) == Some(word) {
            self.value_lead();
            self.cur.pass(word.len());
            self.comma_ok = true;
        } else {
            self.cur.skip(1);
        }
    }

    /// Flush an owed NDJSON record separator before a value starts.
    fn value_lead(&mut self) {
        if self.sep_pending {
            self.sep_pending = false;
            self.cur.emit(b'\n');
        }
    }

    fn newline(&mut self, mode: NewlineMode) {
        if !self.stack.is_empty() {
            // Inside a container a newline is plain whitespace.
            self.cur.skip(1);
            return;
        }
        match mode {
            NewlineMode::Off => self.cur.skip(1),
            NewlineMode::Ndjson => {
                // Arm a separator after a completed record; blank lines
                // collapse and a trailing newline never gets flushed.
                if self.comma_ok {
                    self.sep_pending = true;
                    self.comma_ok = false;
                }
                self.cur.skip(1);
            }
            NewlineMode::NdjsonKeepBlanks => {
                self.cur.pass(1);
                self.comma_ok = false;
            }
        }
    }
}
