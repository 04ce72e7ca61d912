use cli::create_deb::run_create_deb;

fn main() {
    match run_create_deb() {
        Ok(_) => {
            std::process::exit(0);
        }
        Err(err) => {
            eprintln!("Failed to run: {}", err);
            std::process::exit(1);
        }
    }
}
