pub mod ast;
pub mod check;
pub mod complete;
pub mod tokens;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Options shared by every subcommand, merged from CLI flags and config.
#[derive(Debug, Clone)]
pub struct Settings {
    pub pretty_errors: bool,
    pub compiler_version: String,
    pub warnings_as_errors: bool,
}

/// Reads a source file, or stdin for `-`. Returns the display name and text.
pub fn read_input(path: &Path) -> Result<(String, String)> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Read source from stdin")?;
        return Ok(("<stdin>".to_string(), source));
    }
    let source = std::fs::read_to_string(path).with_context(|| format!("Read {}", path.display()))?;
    Ok((path.display().to_string(), source))
}
