use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "mailforge", version, about = "Compose and send notification mail over smtp")]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "default",
        help = "Profile name to use"
    )]
    pub profile: String,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Send(SendArgs),
    Check,
    Profile(ProfileArgs),
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    Set(ProfileSetArgs),
}

#[derive(Debug, Args)]
pub struct ProfileSetArgs {
    #[arg(long, help = "Sender address")]
    pub address: Option<String>,
    #[arg(long, help = "SMTP relay host")]
    pub server: Option<String>,
    #[arg(long, help = "SMTP relay port")]
    pub port: Option<u16>,
    #[arg(long, help = "Display name for the From header")]
    pub sender_name: Option<String>,
    #[arg(long, help = "Connection timeout in seconds")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Args)]
pub struct SendArgs {
    #[arg(long, value_delimiter = ',', num_args = 1.., required = true, help = "Recipient addresses")]
    pub to: Vec<String>,
    #[arg(long, visible_alias = "subj", default_value = "", help = "Mail subject")]
    pub subject: String,
    #[arg(long, help = "Inline body text")]
    pub body: Option<String>,
    #[arg(long, help = "Read body from file")]
    pub body_file: Option<PathBuf>,
    #[arg(long, help = "Read body from stdin")]
    pub stdin: bool,
    #[arg(long, default_value = "", help = "Signature appended as the last part")]
    pub signature: String,
    #[arg(long, action = ArgAction::Append, help = "Extra text part (repeatable)")]
    pub text: Vec<String>,
    #[arg(long, help = "Render --text parts from markdown to html")]
    pub markdown: bool,
    #[arg(long, action = ArgAction::Append, help = "Attach file (repeatable)")]
    pub attach: Vec<PathBuf>,
    #[arg(long, action = ArgAction::Append, help = "Attach image (repeatable)")]
    pub image: Vec<PathBuf>,
    #[arg(long, help = "Embed images inline in the body")]
    pub inline: bool,
    #[arg(long, help = "JSON descriptor batch file")]
    pub manifest: Option<PathBuf>,
}
