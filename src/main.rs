use clap::Parser;
use stockfolio::cli::{run, Cli};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    env_logger::init();
    run(Cli::parse()).await
}
