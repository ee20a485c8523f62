mod artifact;
mod command_line;
mod credentials;
mod deploy;
mod error;
mod network;
mod report;

use std::process::ExitCode;

use clap::Parser;
use command_line::CommandLine;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cmd = CommandLine::parse();
    match cmd.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report::failure(&err),
    }
}
