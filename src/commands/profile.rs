use crate::cli::{ProfileCommand, ProfileSetArgs};
use crate::config;
use crate::context::AppContext;
use crate::error::AppResult;

pub fn run(ctx: &AppContext, command: ProfileCommand) -> AppResult<()> {
    match command {
        ProfileCommand::Show => show(ctx),
        ProfileCommand::Set(args) => set(ctx, args),
    }
}

fn show(ctx: &AppContext) -> AppResult<()> {
    let text = format!(
        "profile {} ({})",
        ctx.profile,
        ctx.paths.settings_file(&ctx.profile).display()
    );
    ctx.output.emit(&text, &ctx.settings)
}

fn set(ctx: &AppContext, args: ProfileSetArgs) -> AppResult<()> {
    let mut settings = ctx.settings.clone();

    if let Some(address) = args.address {
        settings.address = Some(address);
    }
    if let Some(server) = args.server {
        settings.server = Some(server);
    }
    if let Some(port) = args.port {
        settings.port = Some(port);
    }
    if let Some(sender_name) = args.sender_name {
        settings.sender_name = Some(sender_name);
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.timeout_secs = Some(timeout_secs);
    }

    config::save_settings(&ctx.paths, &ctx.profile, &settings)?;

    let text = format!("profile {} updated", ctx.profile);
    ctx.output.emit(&text, &settings)
}
