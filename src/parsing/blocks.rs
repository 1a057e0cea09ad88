//! Rules partitioning a document into blocks. Each block drives the inline
//! grammar for its text content.

use crate::language::*;

use super::inline::{identifier, inline, is_identifier};
use super::parser::{Parser, ParsingError, Rule};

const HEADINGS: [(&str, u8); 5] = [("=====", 5), ("====", 4), ("===", 3), ("==", 2), ("=", 1)];

/// The whole input as a sequence of blocks. Anything left over that no
/// block rule could consume is a failure, reported at the point where the
/// grammar got furthest.
pub fn document<'i>(input: &mut Parser<'i>) -> Result<Document<'i>, ParsingError> {
    let blocks = input.many(block);

    if let Some(error) = input.fatal() {
        return Err(error.clone());
    }

    if !input.is_finished() {
        let error = match input.furthest() {
            Some(problem) if problem.offset() >= input.offset() => problem.clone(),
            _ => ParsingError::Unrecognized(input.offset()),
        };
        return Err(error);
    }

    Ok(Document { blocks })
}

// Paragraph is the catch-all for text and so must come after every block
// that begins with a marker.
fn block<'i>(input: &mut Parser<'i>) -> Result<Block<'i>, ParsingError> {
    input.choice(&[
        section as Rule<'i, _>,
        footnote_body as Rule<'i, _>,
        reference_def as Rule<'i, _>,
        figure as Rule<'i, _>,
        list as Rule<'i, _>,
        table as Rule<'i, _>,
        paragraph as Rule<'i, _>,
        blank_run as Rule<'i, _>,
    ])
}

fn spaces<'i>(input: &mut Parser<'i>) -> &'i str {
    input.take_while(|c| c == ' ')
}

// either "\n" or "\r\n"; a lone carriage return is not a line end
fn newline<'i>(input: &mut Parser<'i>) -> Result<&'i str, ParsingError> {
    match input.peek_next_char() {
        Some('\r') => input.literal("\r\n"),
        _ => input.literal("\n"),
    }
}

// a final line is allowed to omit its newline
fn line_end<'i>(input: &mut Parser<'i>) -> Result<(), ParsingError> {
    match input.peek_next_char() {
        None => Ok(()),
        Some('\n') | Some('\r') => {
            newline(input)?;
            Ok(())
        }
        Some(c) => Err(input.fail(ParsingError::InvalidCharacter(input.offset(), c))),
    }
}

fn line<'i>(input: &mut Parser<'i>) -> Result<Line<'i>, ParsingError> {
    let content = input.oneplus(inline)?;
    line_end(input)?;
    Ok(content)
}

/// A further line of a multi-line run. Refused if the line begins a block.
fn continuation<'i>(input: &mut Parser<'i>) -> Result<Line<'i>, ParsingError> {
    if input.peek(block_start) {
        return Err(input.fail(ParsingError::Expected(
            input.offset(),
            "text continuing the previous line",
        )));
    }
    line(input)
}

fn lines<'i>(input: &mut Parser<'i>) -> Result<Vec<Line<'i>>, ParsingError> {
    let first = line(input)?;

    let mut lines = vec![first];
    lines.extend(input.many(continuation));

    Ok(lines)
}

/// Does a block begin here? Only the opening of each block is examined.
fn block_start<'i>(input: &mut Parser<'i>) -> Result<(), ParsingError> {
    input.choice(&[
        section_start as Rule<'i, _>,
        footnote_start as Rule<'i, _>,
        reference_start as Rule<'i, _>,
        figure_start as Rule<'i, _>,
        item_start as Rule<'i, _>,
        rule_line as Rule<'i, _>,
    ])
}

// sections

fn heading_marker<'i>(input: &mut Parser<'i>) -> Result<u8, ParsingError> {
    for (marker, level) in HEADINGS {
        if input
            .optional(|input| input.literal(marker))
            .is_some()
        {
            return Ok(level);
        }
    }
    Err(input.fail(ParsingError::Expected(input.offset(), "a section marker")))
}

fn section<'i>(input: &mut Parser<'i>) -> Result<Block<'i>, ParsingError> {
    let level = heading_marker(input)?;
    spaces(input);
    let content = line(input)?;
    Ok(Block::Section { level, content })
}

fn section_start<'i>(input: &mut Parser<'i>) -> Result<(), ParsingError> {
    heading_marker(input)?;
    spaces(input);
    inline(input)?;
    Ok(())
}

// footnote bodies

fn footnote_start<'i>(input: &mut Parser<'i>) -> Result<(), ParsingError> {
    input.literal("#:")?;
    spaces(input);
    Ok(())
}

fn footnote_body<'i>(input: &mut Parser<'i>) -> Result<Block<'i>, ParsingError> {
    footnote_start(input)?;
    let content = line(input)?;
    Ok(Block::FootnoteRef(content))
}

// reference definitions

fn reference_label<'i>(input: &mut Parser<'i>) -> Result<Identifier<'i>, ParsingError> {
    input.literal("[")?;
    let label = identifier(input)?;
    input.literal("]:")?;
    spaces(input);
    Ok(label)
}

fn reference_start<'i>(input: &mut Parser<'i>) -> Result<(), ParsingError> {
    reference_label(input)?;
    Ok(())
}

fn reference_def<'i>(input: &mut Parser<'i>) -> Result<Block<'i>, ParsingError> {
    let identifier = reference_label(input)?;
    let lines = lines(input)?;
    Ok(Block::ReferenceDef { identifier, lines })
}

// figures

fn is_path(c: char) -> bool {
    c.is_alphanumeric() || is_identifier(c) || c == '/' || c == '.'
}

fn figure_line<'i>(
    input: &mut Parser<'i>,
) -> Result<(&'i str, Option<Identifier<'i>>), ParsingError> {
    input.literal("!")?;
    let path = input.take_while1(is_path, "the path of an image")?;
    let label = input.optional(|input| {
        input.take_while1(|c| c == ' ', "a space")?;
        identifier(input)
    });
    spaces(input);
    line_end(input)?;
    Ok((path, label))
}

fn figure_start<'i>(input: &mut Parser<'i>) -> Result<(), ParsingError> {
    figure_line(input)?;
    Ok(())
}

fn figure<'i>(input: &mut Parser<'i>) -> Result<Block<'i>, ParsingError> {
    let (path, label) = figure_line(input)?;
    let caption = input.optional(|input| input.oneplus(continuation));
    Ok(Block::Figure {
        path,
        label,
        caption,
    })
}

// lists

fn ordered_marker<'i>(input: &mut Parser<'i>) -> Result<ListKind, ParsingError> {
    input.literal("# ")?;
    Ok(ListKind::Ordered)
}

fn unordered_marker<'i>(input: &mut Parser<'i>) -> Result<ListKind, ParsingError> {
    input.literal("* ")?;
    Ok(ListKind::Unordered)
}

fn item_start<'i>(input: &mut Parser<'i>) -> Result<(), ParsingError> {
    spaces(input);
    input.choice(&[
        ordered_marker as Rule<'i, ListKind>,
        unordered_marker as Rule<'i, ListKind>,
    ])?;
    Ok(())
}

fn list_item<'i>(input: &mut Parser<'i>) -> Result<ListItem<'i>, ParsingError> {
    let indentation = spaces(input).len();
    let kind = input.choice(&[
        ordered_marker as Rule<'i, ListKind>,
        unordered_marker as Rule<'i, ListKind>,
    ])?;
    let lines = lines(input)?;
    Ok(ListItem {
        kind,
        indentation,
        lines,
    })
}

fn list<'i>(input: &mut Parser<'i>) -> Result<Block<'i>, ParsingError> {
    if input.peek_next_char() == Some(' ') {
        return Err(input.fail(ParsingError::Expected(
            input.offset(),
            "a list item at the start of the line",
        )));
    }
    let first = list_item(input)?;
    let kind = first.kind;

    // Indented items may be of either kind; further top level items must
    // match the first one or they start a new list.
    let mut items = vec![first];
    items.extend(input.many(|input| {
        let offset = input.offset();
        let item = list_item(input)?;
        if item.indentation == 0 && item.kind != kind {
            return Err(input.fail(ParsingError::Expected(
                offset,
                "a list item of the same kind",
            )));
        }
        Ok(item)
    }));

    Ok(Block::List { kind, items })
}

// tables

fn rule_line<'i>(input: &mut Parser<'i>) -> Result<(), ParsingError> {
    input.take_while1(|c| c == '-', "a horizontal rule")?;
    line_end(input)
}

fn table_cell<'i>(input: &mut Parser<'i>) -> Result<TableCell<'i>, ParsingError> {
    let content = input.oneplus(inline)?;
    input.literal("|")?;
    input.optional(newline);
    Ok(TableCell(content))
}

fn table_row<'i>(input: &mut Parser<'i>) -> Result<TableRow<'i>, ParsingError> {
    input.literal("|")?;
    let cells = input.oneplus(table_cell)?;
    rule_line(input)?;
    Ok(TableRow(cells))
}

fn table<'i>(input: &mut Parser<'i>) -> Result<Block<'i>, ParsingError> {
    rule_line(input)?;
    let rows = input.oneplus(table_row)?;
    Ok(Block::Table(rows))
}

// paragraphs and spacing

fn paragraph<'i>(input: &mut Parser<'i>) -> Result<Block<'i>, ParsingError> {
    let lines = lines(input)?;
    let blank = input
        .many(newline)
        .len();
    Ok(Block::Paragraph {
        lines,
        blank: (blank > 0).then_some(blank),
    })
}

fn blank_run<'i>(input: &mut Parser<'i>) -> Result<Block<'i>, ParsingError> {
    let run = input.oneplus(newline)?;
    Ok(Block::BlankRun(run.len()))
}
