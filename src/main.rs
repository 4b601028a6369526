fn main() {
    if let Err(e) = jsonmin::cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
