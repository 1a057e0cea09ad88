use super::messages::generate_error_message;
use owo_colors::OwoColorize;
use plastix::{
    language::LoadingError,
    parsing::ParsingError,
    rendering::{Diagnostic, Severity},
};
use std::path::Path;

/// Format a parsing error with full details including source code context.
/// The error offset is into the comment-stripped text; line numbers are
/// reported against the original file.
pub fn full_parsing_error<'i>(
    error: &ParsingError,
    filename: &'i Path,
    original: &'i str,
    stripped: &'i str,
) -> String {
    let (problem, details) = generate_error_message(error);
    let offset = error.offset();

    let i = calculate_line_number(stripped, offset);
    let j = calculate_column_number(stripped, offset);

    let code = stripped
        .lines()
        .nth(i)
        .unwrap_or("");
    let line = original_line_number(original, i) + 1;
    let column = j + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    format!(
        r#"
{}: {}:{}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}

{}
        "#,
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        column,
        problem.bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
        '^'.bright_red(),
        details
    )
    .trim_ascii()
    .to_string()
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error.bold()
    )
}

/// Format a diagnostic raised while rendering as a single line
pub fn concise_diagnostic(diagnostic: &Diagnostic, filename: &Path) -> String {
    let severity = match diagnostic.severity() {
        Severity::Warning => "warning"
            .bright_yellow()
            .to_string(),
        Severity::Error => "error"
            .bright_red()
            .to_string(),
    };

    format!(
        "{}: {}: {}",
        severity,
        filename.to_string_lossy(),
        diagnostic.message()
    )
}

// Helper functions for line/column calculation
fn calculate_line_number(content: &str, offset: usize) -> usize {
    content[..offset]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
}

fn calculate_column_number(content: &str, offset: usize) -> usize {
    let before = &content[..offset];
    match before.rfind('\n') {
        Some(start) => content[start + 1..offset]
            .chars()
            .count(),
        None => before
            .chars()
            .count(),
    }
}

/// Line index in the original file of the nth line that survived comment
/// stripping.
fn original_line_number(original: &str, n: usize) -> usize {
    original
        .split_inclusive('\n')
        .enumerate()
        .filter(|(_, line)| !line.starts_with('%'))
        .map(|(i, _)| i)
        .nth(n)
        .unwrap_or_else(|| {
            original
                .split_inclusive('\n')
                .count()
        })
}
