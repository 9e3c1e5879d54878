mod commands;
mod terminal;

use commands::{CommandLine, Commands, ping, sheet};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet);

    match commands.command {
        Commands::Ping {
            targets,
            count,
            timeout,
            no_raw,
        } => ping::ping(targets, count, timeout, no_raw, commands.quiet).await,
        Commands::Sheet { command } => sheet::run(command).await,
    }
}
