fn main() {
    if let Err(e) = ci_refs::cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
