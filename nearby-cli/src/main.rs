//! Entry point for the `nearby` command-line interface.
#![forbid(unsafe_code)]

use env_logger::Env;

#[expect(
    clippy::print_stderr,
    reason = "The binary reports fatal errors on stderr"
)]
fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    if let Err(err) = nearby_cli::run() {
        eprintln!("nearby: {err}");
        std::process::exit(1);
    }
}
