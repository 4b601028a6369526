/// How newlines at the top level are treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NewlineMode {
    /// Newlines are insignificant whitespace and are removed.
    Off,
    /// Newline-delimited JSON: one value per line. Record separators are
    /// kept, consecutive blank lines collapse and a trailing newline is
    /// trimmed.
    Ndjson,
    /// Newline-delimited JSON preserving blank lines and a trailing
    /// newline.
    NdjsonKeepBlanks,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Decimal place to round numbers to: `2` keeps two fractional
    /// digits, `-3` rounds to thousands. `i64::MAX` disables rounding.
    pub precision: i64,
    /// Newline handling, see [`NewlineMode`].
    pub newlines: NewlineMode,
    /// Suppress per-file messaging in the command-line driver. The core
    /// never prints; this only affects the driver.
    pub quiet: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            precision: i64::MAX,
            newlines: NewlineMode::Off,
            quiet: false,
        }
    }
}

impl Options {
    /// True when a numeric precision is configured.
    pub fn rounds(&self) -> bool {
        self.precision != i64::MAX
    }
}
