use std::path::PathBuf;

use crate::commands::read_input;
use crate::core::scanner::Scanner;

/// Prints one token per line with its 0-based position.
pub fn main(input: PathBuf) -> anyhow::Result<i32> {
    let (name, source) = read_input(&input)?;
    match Scanner::new(&source).scan() {
        Ok(tokens) => {
            for t in tokens {
                println!("{}", t);
            }
            Ok(0)
        }
        Err(e) => {
            eprintln!("{}:{}:{}: error: {}", name, e.line + 1, e.column + 1, e);
            Ok(1)
        }
    }
}
