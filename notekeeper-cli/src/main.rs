fn main() {
    if let Err(e) = notekeeper_cli_lib::run() {
        eprintln!("error: {}", e.user_message());
        std::process::exit(1);
    }
}
