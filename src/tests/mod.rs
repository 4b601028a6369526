use crate::options::{NewlineMode, Options};

// Shared test helpers

fn mini(s: &str) -> String {
    crate::minify_to_string(s, &Options::default())
}

fn mini_p(s: &str, precision: i64) -> String {
    let opts = Options {
        precision,
        ..Default::default()
    };
    crate::minify_to_string(s, &opts)
}

fn mini_nd(s: &str) -> String {
    let opts = Options {
        newlines: NewlineMode::Ndjson,
        ..Default::default()
    };
    crate::minify_to_string(s, &opts)
}

fn mini_nd_blanks(s: &str) -> String {
    let opts = Options {
        newlines: NewlineMode::NdjsonKeepBlanks,
        ..Default::default()
    };
    crate::minify_to_string(s, &opts)
}

mod properties;
