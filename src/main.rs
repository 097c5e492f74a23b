use clap::Parser;
use env_logger::Env;
use log::{debug, error};
use schedule_export::cli::Cli;

fn main() {
    // Initialize logging with custom format
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();
    debug!("Parsed arguments: {:?}", cli);

    if let Err(err) = schedule_export::run(cli) {
        error!("{:?}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
