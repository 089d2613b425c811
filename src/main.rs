//! cge: check, inspect and complete CGE schema files.
use clap::Parser; // trait import enables CgeCli::parse()
use log::debug;

use cge_compiler::cli::{CgeCli, Command};
use cge_compiler::commands::{self, Settings};
use cge_compiler::config::{load_config, CgeConfig};
use cge_compiler::core::version::CGE_VERSION;

fn init_logging(debug_flag: bool, cfg: &CgeConfig) {
    let debug_env = std::env::var("CGE_DEBUG").map(|v| v == "1").unwrap_or(false);
    let default = if debug_flag || debug_env {
        "debug".to_string()
    } else {
        cfg.log_level.clone().unwrap_or_else(|| "warn".to_string())
    };
    // RUST_LOG still overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() {
    let args = CgeCli::parse();

    let cfg = match load_config(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(2);
        }
    };
    init_logging(args.debug, &cfg);
    if let Some(color) = cfg.color {
        colored::control::set_override(color);
    }
    debug!("config: {:?}", cfg);

    let settings = Settings {
        pretty_errors: args.pretty_errors || cfg.pretty_errors,
        compiler_version: args
            .compiler_version
            .clone()
            .or_else(|| cfg.compiler_version.clone())
            .unwrap_or_else(|| CGE_VERSION.to_string()),
        warnings_as_errors: cfg.warnings_as_errors,
    };

    let result = match args.cmd {
        Command::Check {
            inputs,
            warnings_as_errors,
        } => {
            let settings = Settings {
                warnings_as_errors: settings.warnings_as_errors || warnings_as_errors,
                ..settings
            };
            commands::check::main(inputs, &settings)
        }
        Command::Tokens { input } => commands::tokens::main(input),
        Command::Ast { input, json } => commands::ast::main(input, json, &settings),
        Command::Complete {
            input,
            line,
            character,
        } => commands::complete::main(input, line, character, &settings),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(2);
        }
    }
}
