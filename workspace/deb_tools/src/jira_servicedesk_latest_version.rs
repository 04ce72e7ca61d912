use cli::latest_version::run_latest_version;

fn main() {
    match run_latest_version() {
        Ok(_) => {
            std::process::exit(0);
        }
        Err(err) => {
            eprintln!("Failed to run: {}", err);
            std::process::exit(1);
        }
    }
}
