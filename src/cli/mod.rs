pub mod args;
pub mod commands;

pub use args::{DeriveArgs, ParamArgs, ParamCommand};
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser, Debug)]
#[command(name = "dyncmd")]
#[command(version = crate::VERSION)]
#[command(about = "Derive scheduler commands for dynamically generated sub-workflows")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: derive a command from a workflow instance snapshot, then inspect or amend its metadata with `param`."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Build a sub-workflow command from a parent instance",
        long_about = "Derive reads a workflow instance snapshot, merges its global parameters over the caller parameters, and emits a command tagged as dynamically generated.",
        after_help = "Example:\n    dyncmd derive --instance parent.json --definition-code 1001 --definition-version 3 --param date=2024-01-01"
    )]
    Derive(DeriveArgs),
    #[command(
        about = "Read or write command metadata keys",
        long_about = "Param reads and merge-writes single keys of a command's metadata map without disturbing other keys.",
        after_help = "Examples:\n    dyncmd param get command.json StartParams\n    dyncmd param set command.json owner team-a"
    )]
    Param(ParamArgs),
}

pub fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Derive(derive_args) => commands::derive(derive_args),
        Command::Param(param_args) => commands::param(param_args),
    }
}
