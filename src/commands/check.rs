use std::path::PathBuf;

use colored::Colorize;
use log::info;

use crate::commands::{read_input, Settings};
use crate::core::compiler::Compiler;
use crate::core::diagnostics::print_diagnostics;

/// Compiles every input and prints its diagnostics. Returns the process exit
/// code: 0 when all inputs are clean, 1 otherwise.
pub fn main(inputs: Vec<PathBuf>, settings: &Settings) -> anyhow::Result<i32> {
    let compiler = Compiler::with_version(settings.compiler_version.clone());
    let mut failed = 0usize;

    for input in &inputs {
        let (name, source) = read_input(input)?;
        let unit = compiler.compile(&source);
        info!("{}: {} object(s), {} diagnostic(s)", name, unit.objects.len(), unit.diagnostics.len());
        print_diagnostics(&name, &unit, settings.pretty_errors);

        let warned = unit.warnings().next().is_some();
        if unit.has_errors() || (settings.warnings_as_errors && warned) {
            failed += 1;
        }
    }

    if failed == 0 {
        println!("{} {} file(s) checked", "ok:".bright_green().bold(), inputs.len());
        Ok(0)
    } else {
        eprintln!("{} {} of {} file(s) failed", "failed:".bright_red().bold(), failed, inputs.len());
        Ok(1)
    }
}
