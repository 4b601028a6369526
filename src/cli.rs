use crate::error::MinifyError;
use crate::options::{NewlineMode, Options};
use std::env;
use std::fs;
use std::path::Path;

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} [options] path\n\
         JSON minifier: rewrites the file (or every .json file under the\n\
         directory) in place with its shortest equivalent form.\n\
         \n\
         Options:\n\
           -p N  Numeric precision (number of decimal places; can be negative)\n\
           -n    Newline-delimited JSON mode\n\
           -N    Newline-delimited JSON mode, preserving blank lines\n\
           -q    Suppress output\n\
           -h    Show this help\n",
        prog = program
    );
}

fn parse_precision(s: &str) -> i64 {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        eprintln!("Precision must be an integer");
        std::process::exit(2);
    }
    match s.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            // Clamp toward the sign of the input: +i64::MAX is the
            // "no rounding" sentinel, which would invert the request
            // for a huge negative precision.
            if s.starts_with('-') {
                eprintln!("Precision limited to {}", i64::MIN);
                i64::MIN
            } else {
                eprintln!("Precision limited to {}", i64::MAX);
                i64::MAX
            }
        }
    }
}

fn parse_args() -> (Options, String) {
    let mut args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "jsonmin".to_string());
    args.remove(0);

    let mut opts = Options::default();
    let mut path: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "-?" | "--help" => {
                print_help(&program);
                std::process::exit(0);
            }
            "-q" => {
                opts.quiet = true;
            }
            "-n" => {
                opts.newlines = NewlineMode::Ndjson;
            }
            "-N" => {
                opts.newlines = NewlineMode::NdjsonKeepBlanks;
            }
            "-p" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing N for -p");
                    std::process::exit(2);
                }
                opts.precision = parse_precision(&args[i]);
            }
            s if s.starts_with('-') && s.len() > 1 => {
                eprintln!("Unknown option: {}", s);
                std::process::exit(2);
            }
            p => {
                if path.is_some() {
                    print_help(&program);
                    std::process::exit(2);
                }
                path = Some(p.to_string());
            }
        }
        i += 1;
    }

    let path = match path {
        Some(p) => p,
        None => {
            print_help(&program);
            std::process::exit(2);
        }
    };
    (opts, path)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (opts, path) = parse_args();
    let path = Path::new(&path);
    let meta = fs::metadata(path).map_err(|e| MinifyError::io(path, e))?;
    if meta.is_dir() {
        let mut failures = 0usize;
        process_dir(path, &opts, &mut failures);
        if failures > 0 {
            return Err(format!("{} file(s) could not be processed", failures).into());
        }
        Ok(())
    } else {
        process_file(path, &opts)?;
        Ok(())
    }
}

fn process_dir(dir: &Path, opts: &Options, failures: &mut usize) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Could not open {}: {}", dir.display(), e);
            *failures += 1;
            return;
        }
    };
    for entry in entries.flatten() {
        let p = entry.path();
        let ft = match entry.file_type() {
            Ok(ft) => ft,
            Err(e) => {
                eprintln!("Could not stat {}: {}", p.display(), e);
                *failures += 1;
                continue;
            }
        };
        if ft.is_dir() {
            process_dir(&p, opts, failures);
        } else if ft.is_file() && has_json_name(&p) {
            if let Err(e) = process_file(&p, opts) {
                eprintln!("{}", e);
                *failures += 1;
            }
        }
    }
}

fn has_json_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".json"))
}

/// Rewrite one file in place, truncating it to the minified length.
fn process_file(path: &Path, opts: &Options) -> Result<(), MinifyError> {
    let mut buf = fs::read(path).map_err(|e| MinifyError::io(path, e))?;
    // A NUL in the first two bytes means UTF-16/UTF-32 text.
    if buf.len() > 2 && (buf[0] == 0 || buf[1] == 0) {
        return Err(MinifyError::encoding(path));
    }
    let before = buf.len();
    let (len, log) = crate::minify_with_log(&mut buf, opts);
    for entry in &log {
        eprintln!(
            "{}: {} at byte {}",
            path.display(),
            entry.message,
            entry.position
        );
    }
    buf.truncate(len);
    fs::write(path, &buf).map_err(|e| MinifyError::io(path, e))?;
    if !opts.quiet {
        println!(
            "{}: Saved {} bytes",
            path.display(),
            before.saturating_sub(len)
        );
    }
    Ok(())
}
