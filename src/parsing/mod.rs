//! parser for the plastix markup language

use std::path::Path;
use tracing::debug;

use crate::language::{Block, Document, LoadingError};

mod blocks;
mod inline;
pub mod parser;

pub use parser::ParsingError;

/// Read a file and return its content with comment lines removed. The
/// filename "-" reads standard input instead.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    let content = read(filename)?;
    Ok(strip_comments(&content))
}

/// Read a file (or standard input, given "-") exactly as written.
pub fn read(filename: &Path) -> Result<String, LoadingError<'_>> {
    let result = if filename.to_str() == Some("-") {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(filename)
    };

    match result {
        Ok(content) => {
            debug!("Loaded {} bytes from {}", content.len(), filename.display());
            Ok(content)
        }
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Drop every line whose first character is '%'. The remaining lines are
/// kept intact, newlines included.
pub fn strip_comments(content: &str) -> String {
    content
        .split_inclusive('\n')
        .filter(|line| !line.starts_with('%'))
        .collect()
}

/// Parse text into a Document, or report where the grammar failed.
pub fn parse(content: &str) -> Result<Document<'_>, ParsingError> {
    let mut input = parser::Parser::new();
    input.initialize(content);

    match blocks::document(&mut input) {
        Ok(document) => {
            let sections = document
                .blocks
                .iter()
                .filter(|block| matches!(block, Block::Section { .. }))
                .count();
            debug!(
                "Found {} block{} ({} section{})",
                document
                    .blocks
                    .len(),
                if document
                    .blocks
                    .len()
                    == 1
                {
                    ""
                } else {
                    "s"
                },
                sections,
                if sections == 1 { "" } else { "s" }
            );
            Ok(document)
        }
        Err(error) => {
            debug!(?error);
            Err(error)
        }
    }
}
