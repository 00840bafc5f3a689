fn main() {
    if let Err(err) = pocketfb::interface::cli::run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
