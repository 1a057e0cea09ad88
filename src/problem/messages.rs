use plastix::parsing::ParsingError;

/// Generate problem and detail messages for parsing errors
pub fn generate_error_message(error: &ParsingError) -> (String, String) {
    match error {
        ParsingError::Unrecognized(_) => (
            "Unrecognized input".to_string(),
            r#"
No block could begin at this point. A block is a section heading, a
paragraph, a list, a table, a figure, a footnote body beginning with '#:'
or a reference definition beginning with '[identifier]:'.
            "#
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::Expected(_, value) => (
            format!("Expected {}", value),
            format!(
                "The parser was looking for {} but found something else.",
                value
            ),
        ),
        ParsingError::ExpectedToken(_, token) => (
            format!("Expected '{}'", token.escape_default()),
            format!(
                r#"
Markup opened earlier in this line must be closed with '{}' before the end
of the line. Styled spans do not continue onto following lines.
                "#,
                token.escape_default()
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::InvalidCharacter(_, c) => (
            format!("Unexpected character '{}'", c.escape_default()),
            r#"
The characters * / < > : ^ # | - _ \ [ and ] have meaning in plastix
markup. To write one of them as ordinary text put a backslash in front of
it, for example \* or \/.
            "#
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::InvalidByte(_) => (
            "Colour component out of range".to_string(),
            r#"
Each of the red, green and blue components of a colour written as
(r,g,b) must be a whole number between 0 and 255.
            "#
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::TooDeep(_) => (
            "Styled spans nested too deeply".to_string(),
            format!(
                r#"
Bold, italic, underline and colour spans may be nested inside one another
at most {} levels deep. A long run of markers that are never closed also
counts as nesting, since each one may open a span.
                "#,
                plastix::parsing::parser::MAX_NESTING
            )
            .trim_ascii()
            .to_string(),
        ),
    }
}
