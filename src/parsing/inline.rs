//! Rules for the styled spans that make up a line of text.

use crate::language::*;

use super::parser::{map, Parser, ParsingError, Rule};

/// Characters with meaning to the inline grammar. None of them may appear
/// in plain text; a backslash in front of one produces it literally.
pub const RESERVED: [char; 14] = [
    '*', '/', '<', '>', ':', '^', '#', '|', '-', '_', '\\', '[', ']', '\n',
];

pub const NAMED_COLORS: [&str; 12] = [
    "red", "green", "blue", "cyan", "magenta", "yellow", "black", "white", "gray", "orange",
    "purple", "brown",
];

pub fn is_reserved(c: char) -> bool {
    RESERVED.contains(&c)
}

pub fn is_identifier(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_lowercase() || c == ':' || c == '_' || c == '-'
}

pub fn identifier<'i>(input: &mut Parser<'i>) -> Result<Identifier<'i>, ParsingError> {
    let name = input.take_while1(is_identifier, "an identifier")?;
    Ok(Identifier(name))
}

/// A single inline node. The order of the alternatives matters: the marker
/// prefixed rules go first and plain text is the fallback. Outcomes are
/// remembered per offset so nested span attempts are not re-parsed.
pub fn inline<'i>(input: &mut Parser<'i>) -> Result<Inline<'i>, ParsingError> {
    input.inline_span(|input| {
        input.choice(&[
            escaped as Rule<'i, _>,
            footnote as Rule<'i, _>,
            color as Rule<'i, _>,
            bold as Rule<'i, _>,
            italic as Rule<'i, _>,
            reference as Rule<'i, _>,
            underline as Rule<'i, _>,
            text as Rule<'i, _>,
        ])
    })
}

fn text<'i>(input: &mut Parser<'i>) -> Result<Inline<'i>, ParsingError> {
    let span = input.take_while1(|c| !is_reserved(c) && c != '\r', "text")?;
    Ok(Inline::Text(span))
}

fn escaped<'i>(input: &mut Parser<'i>) -> Result<Inline<'i>, ParsingError> {
    input.literal("\\")?;
    let c = input.satisfy(is_reserved, "a reserved character to escape")?;
    Ok(Inline::Escaped(c))
}

fn footnote<'i>(input: &mut Parser<'i>) -> Result<Inline<'i>, ParsingError> {
    input.literal("^#")?;
    Ok(Inline::Footnote)
}

fn bold<'i>(input: &mut Parser<'i>) -> Result<Inline<'i>, ParsingError> {
    input.literal("*")?;
    let content = input.many(inline);
    input.literal("*")?;
    Ok(Inline::Bold(content))
}

fn italic<'i>(input: &mut Parser<'i>) -> Result<Inline<'i>, ParsingError> {
    input.literal("//")?;
    let content = input.many(inline);
    input.literal("//")?;
    Ok(Inline::Italic(content))
}

fn underline<'i>(input: &mut Parser<'i>) -> Result<Inline<'i>, ParsingError> {
    input.literal("_")?;
    let content = input.many(inline);
    input.literal("_")?;
    Ok(Inline::Underline(content))
}

fn reference<'i>(input: &mut Parser<'i>) -> Result<Inline<'i>, ParsingError> {
    input.literal("[")?;
    let target = identifier(input)?;
    input.literal("]")?;
    Ok(Inline::Reference(target))
}

fn color<'i>(input: &mut Parser<'i>) -> Result<Inline<'i>, ParsingError> {
    input.literal("<")?;
    let content = input.many(inline);
    input.literal(":")?;
    let spec = input.choice(&[
        hex_color as Rule<'i, _>,
        named_color as Rule<'i, _>,
        rgb_color as Rule<'i, _>,
    ])?;
    input.literal(">")?;
    Ok(Inline::Color(content, spec))
}

fn hex_color<'i>(input: &mut Parser<'i>) -> Result<Color<'i>, ParsingError> {
    input.literal("#")?;
    let start = input.entire();
    for _ in 0..6 {
        input.satisfy(|c| c.is_ascii_hexdigit(), "a hexadecimal digit")?;
    }
    Ok(Color::Hex(&start[..6]))
}

fn named_color<'i>(input: &mut Parser<'i>) -> Result<Color<'i>, ParsingError> {
    for name in NAMED_COLORS {
        if let Some(name) = input.optional(|input| input.literal(name)) {
            return Ok(Color::Named(name));
        }
    }
    Err(input.fail(ParsingError::Expected(
        input.offset(),
        "a colour name",
    )))
}

fn rgb_color<'i>(input: &mut Parser<'i>) -> Result<Color<'i>, ParsingError> {
    input.literal("(")?;
    let red = byte(input)?;
    input.literal(",")?;
    let green = byte(input)?;
    input.literal(",")?;
    let blue = byte(input)?;
    input.literal(")")?;
    Ok(Color::Rgb(red, green, blue))
}

fn byte<'i>(input: &mut Parser<'i>) -> Result<u8, ParsingError> {
    let offset = input.offset();
    let digits = map(
        |input: &mut Parser<'i>| input.take_while1(|c| c.is_ascii_digit(), "a number"),
        |digits: &'i str| digits.parse::<u8>(),
    );

    match digits(input)? {
        Ok(value) => Ok(value),
        Err(_) => Err(input.fail(ParsingError::InvalidByte(offset))),
    }
}
