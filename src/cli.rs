use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "cge",
    about = "CGE schema front end: check, inspect and complete .cge files",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct CgeCli {
    /// Global: pretty diagnostics
    #[arg(long = "pretty-errors", action = ArgAction::SetTrue, global = true)]
    pub pretty_errors: bool,

    /// Global: path to config (TOML); default: ~/.cge/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: language version to compile against ("dev" accepts every file)
    #[arg(long = "compiler-version", value_name = "VERSION", global = true)]
    pub compiler_version: Option<String>,

    /// Global: debug logging (same as CGE_DEBUG=1)
    #[arg(long = "debug", action = ArgAction::SetTrue, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile files and report diagnostics
    ///
    /// Examples:
    ///   cge check game.cge
    ///   cat game.cge | cge check -
    Check {
        /// Input files; `-` reads stdin
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Treat warnings (e.g. version mismatch) as errors
        #[arg(long = "warnings-as-errors", action = ArgAction::SetTrue)]
        warnings_as_errors: bool,
    },

    /// Print the token stream
    Tokens {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print metadata and declarations
    Ast {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit JSON instead of the debug tree
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Print completion candidates at a 0-based position
    Complete {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[arg(long = "line", value_name = "N")]
        line: usize,

        #[arg(long = "character", value_name = "N")]
        character: usize,
    },
}
