use crate::check::run_check_command;
use crate::preview::run_preview_command;
use crate::stats::run_stats_command;
use anyhow::Result;
use bgr_markup::GameProfile;
use clap::ArgAction;
use clap::{Args, Parser, Subcommand};

///////// Args /////////

#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    #[arg(short = 's', long = "source", help = "File holding the source-language text")]
    pub source: String,

    #[arg(short = 't', long = "target", help = "File holding the translated text")]
    pub target: String,

    #[arg(
        short = 'c',
        long = "config",
        help = "Path to the config file defining profile, compared tags and lookup tables"
    )]
    pub config: Option<String>,

    #[arg(
        short = 'p',
        long = "profile",
        help = "Game profile, ArcheAge or MIR4. Override the profile in config when presents"
    )]
    pub profile: Option<GameProfile>,

    #[arg(
        long = "fuzzy",
        help = "Do not report source tags whose truncated form is found in target",
        action = ArgAction::SetTrue,
    )]
    pub fuzzy: bool,

    #[arg(long = "json", help = "Print the report in json format", action = ArgAction::SetTrue)]
    pub json: bool,
}

#[derive(Clone, Debug, Args)]
pub struct StatsArgs {
    #[arg(required = true, help = "Files to count tags in")]
    pub files: Vec<String>,

    #[arg(long = "csv", help = "Path to output csv format statistics")]
    pub csv: Option<String>,

    #[arg(long = "json", help = "Print statistics in json format", action = ArgAction::SetTrue)]
    pub json: bool,
}

#[derive(Clone, Debug, Args)]
pub struct PreviewArgs {
    #[arg(help = "File to preview")]
    pub file: String,

    #[arg(
        short = 'c',
        long = "config",
        help = "Path to the config file defining lookup tables and render options"
    )]
    pub config: Option<String>,

    #[arg(long = "hidden", help = "Show hidden whitespace characters", action = ArgAction::SetTrue)]
    pub hidden: bool,

    #[arg(
        long = "width-rule",
        help = "Classify characters by width rule, visible in json output",
        action = ArgAction::SetTrue,
    )]
    pub width_rule: bool,

    #[arg(long = "line-breaks", help = "Mark line ends", action = ArgAction::SetTrue)]
    pub line_breaks: bool,

    #[arg(long = "json", help = "Print presentation units in json format", action = ArgAction::SetTrue)]
    pub json: bool,
}

///////// Subcommand /////////

#[derive(Clone, Debug, Parser)]
#[command(name = "bgr", about = "Check and preview markup in translated game text")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    #[command(about = "validate tags in source and target, and check target keeps source tags")]
    Check(CheckArgs),

    #[command(about = "count tags per family")]
    Stats(StatsArgs),

    #[command(about = "render text with markup resolved")]
    Preview(PreviewArgs),
}

/// Main entry of all subcommands.
pub async fn run_command_with_args(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Check(check_args) => run_check_command(check_args).await,
        Command::Stats(stats_args) => run_stats_command(stats_args).await,
        Command::Preview(preview_args) => run_preview_command(preview_args).await,
    }
}
