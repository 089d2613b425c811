use std::path::PathBuf;

use anyhow::Context;

use crate::commands::{read_input, Settings};
use crate::core::compiler::Compiler;
use crate::core::diagnostics::print_diagnostics;

/// Dumps metadata and objects, as a debug tree or as JSON.
pub fn main(input: PathBuf, json: bool, settings: &Settings) -> anyhow::Result<i32> {
    let (name, source) = read_input(&input)?;
    let unit = Compiler::with_version(settings.compiler_version.clone()).compile(&source);

    if json {
        let out = serde_json::to_string_pretty(&unit).context("Serialize compile unit")?;
        println!("{}", out);
    } else {
        println!("{:#?}", unit.metadata);
        for (i, object) in unit.objects.iter().enumerate() {
            println!("#{} {:#?}", i, object);
        }
    }

    print_diagnostics(&name, &unit, settings.pretty_errors);
    Ok(if unit.has_errors() { 1 } else { 0 })
}
