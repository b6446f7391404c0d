fn main() {
    if let Err(err) = smartsend::cli::run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
