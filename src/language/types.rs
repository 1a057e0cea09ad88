//! Types representing the document tree of a plastix file

#[derive(Eq, Debug, PartialEq)]
pub struct Document<'i> {
    pub blocks: Vec<Block<'i>>,
}

/// One line of inline content.
pub type Line<'i> = Vec<Inline<'i>>;

#[derive(Eq, Debug, PartialEq, Clone)]
pub struct Identifier<'i>(pub &'i str);

// top level structure

#[derive(Eq, Debug, PartialEq)]
pub enum Block<'i> {
    Section {
        level: u8,
        content: Vec<Inline<'i>>,
    },
    Paragraph {
        lines: Vec<Line<'i>>,
        blank: Option<usize>,
    },
    List {
        kind: ListKind,
        items: Vec<ListItem<'i>>,
    },
    Table(Vec<TableRow<'i>>),
    Figure {
        path: &'i str,
        label: Option<Identifier<'i>>,
        caption: Option<Vec<Line<'i>>>,
    },
    ReferenceDef {
        identifier: Identifier<'i>,
        lines: Vec<Line<'i>>,
    },
    FootnoteRef(Vec<Inline<'i>>),
    BlankRun(usize),
}

#[derive(Eq, Debug, PartialEq, Clone, Copy)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// Items are kept flat in the order they were written; nesting is implied
/// by indentation (the count of leading spaces, zero at top level).
#[derive(Eq, Debug, PartialEq)]
pub struct ListItem<'i> {
    pub kind: ListKind,
    pub indentation: usize,
    pub lines: Vec<Line<'i>>,
}

#[derive(Eq, Debug, PartialEq)]
pub struct TableRow<'i>(pub Vec<TableCell<'i>>);

#[derive(Eq, Debug, PartialEq)]
pub struct TableCell<'i>(pub Vec<Inline<'i>>);

// spans within a line

#[derive(Eq, Debug, PartialEq, Clone)]
pub enum Inline<'i> {
    Text(&'i str),
    Bold(Vec<Inline<'i>>),
    Italic(Vec<Inline<'i>>),
    Underline(Vec<Inline<'i>>),
    Escaped(char),
    Footnote,
    Reference(Identifier<'i>),
    Color(Vec<Inline<'i>>, Color<'i>),
}

#[derive(Eq, Debug, PartialEq, Clone)]
pub enum Color<'i> {
    Named(&'i str),
    Hex(&'i str),
    Rgb(u8, u8, u8),
}

impl<'i> Document<'i> {
    /// Count the number of footnote markers anywhere in the visible text.
    pub fn footnote_markers(&self) -> usize {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Section { content, .. } => count_markers(content),
                Block::Paragraph { lines, .. } => lines
                    .iter()
                    .map(|line| count_markers(line))
                    .sum(),
                Block::List { items, .. } => items
                    .iter()
                    .flat_map(|item| item.lines.iter())
                    .map(|line| count_markers(line))
                    .sum(),
                Block::Table(rows) => rows
                    .iter()
                    .flat_map(|row| row.0.iter())
                    .map(|cell| count_markers(&cell.0))
                    .sum(),
                Block::Figure { caption, .. } => caption
                    .iter()
                    .flatten()
                    .map(|line| count_markers(line))
                    .sum(),
                Block::ReferenceDef { .. } | Block::FootnoteRef(_) | Block::BlankRun(_) => 0,
            })
            .sum()
    }
}

fn count_markers(content: &[Inline]) -> usize {
    content
        .iter()
        .map(|inline| match inline {
            Inline::Footnote => 1,
            Inline::Bold(inner) | Inline::Italic(inner) | Inline::Underline(inner) => {
                count_markers(inner)
            }
            Inline::Color(inner, _) => count_markers(inner),
            Inline::Text(_) | Inline::Escaped(_) | Inline::Reference(_) => 0,
        })
        .sum()
}
