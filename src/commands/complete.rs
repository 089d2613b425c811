use std::path::PathBuf;

use crate::commands::{read_input, Settings};
use crate::core::compiler::Compiler;
use crate::core::completion::complete_at;

/// Prints completion labels at a 0-based position, one per line.
///
/// Declared types come from the file itself and only when it compiles cleanly.
pub fn main(input: PathBuf, line: usize, character: usize, settings: &Settings) -> anyhow::Result<i32> {
    let (_, source) = read_input(&input)?;
    let unit = Compiler::with_version(settings.compiler_version.clone()).compile(&source);
    let objects = if unit.has_errors() { &[][..] } else { &unit.objects[..] };

    for item in complete_at(&source, line, character, objects, &settings.compiler_version) {
        match item.detail {
            Some(detail) => println!("{}\t{:?}\t{}", item.label, item.kind, detail),
            None => println!("{}\t{:?}", item.label, item.kind),
        }
    }
    Ok(0)
}
