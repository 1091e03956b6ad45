//! Binary entrypoint for sysfont

fn main() {
    if let Err(err) = sysfont_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
