use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        profile,
        json,
        verbose,
        command,
    } = cli;

    let ctx = AppContext::bootstrap(profile, json, verbose)?;

    match command {
        Command::Send(args) => commands::send::run(&ctx, args).await,
        Command::Check => commands::check::run(&ctx).await,
        Command::Profile(args) => commands::profile::run(&ctx, args.command),
    }
}
