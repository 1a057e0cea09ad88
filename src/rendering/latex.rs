//! Conversion of document tree nodes into LaTeX source.

use std::collections::{HashMap, VecDeque};
use tracing::debug;

use crate::language::*;

use super::diagnostics::Diagnostic;
use super::references::{Reference, ReferenceKind};

pub const GRAPHICX: &str = "\\usepackage{graphicx}\n";
pub const XCOLOR: &str = "\\usepackage{xcolor}\n";

static SECTIONS: [&str; 5] = [
    "section",
    "subsection",
    "subsubsection",
    "paragraph",
    "subparagraph",
];

/// Add a preamble fragment unless an identical one is already present.
pub(crate) fn require(preamble: &mut Vec<&'static str>, fragment: &'static str) {
    if !preamble.contains(&fragment) {
        preamble.push(fragment);
    }
}

/// Walks tree nodes producing LaTeX text. Footnote bodies are handed out
/// front to back as markers are met; when there is no queue at all (while
/// footnote and reference bodies themselves are being rendered) a marker is
/// reported as nested.
pub(crate) struct Renderer<'t, 'i> {
    references: &'t HashMap<&'i str, Reference>,
    footnotes: Option<VecDeque<String>>,
    markers: usize,
    preamble: Vec<&'static str>,
    diagnostics: Vec<Diagnostic>,
}

impl<'t, 'i> Renderer<'t, 'i> {
    pub(crate) fn new(
        references: &'t HashMap<&'i str, Reference>,
        footnotes: Option<VecDeque<String>>,
    ) -> Self {
        Renderer {
            references,
            footnotes,
            markers: 0,
            preamble: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> (Vec<&'static str>, Vec<Diagnostic>) {
        (self.preamble, self.diagnostics)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        debug!("{}", diagnostic);
        self.diagnostics
            .push(diagnostic);
    }

    pub(crate) fn block(&mut self, block: &Block, out: &mut String) {
        match block {
            Block::Section { level, content } => {
                let command = SECTIONS[((*level).clamp(1, 5) - 1) as usize];
                let text = self.inlines(content);
                out.push_str(&format!("\\{}{{{}}}\n", command, text));
            }
            Block::Paragraph { lines, blank } => {
                out.push_str(&self.lines(lines));
                out.push('\n');
                out.push_str(&"\n".repeat(blank.unwrap_or(0)));
            }
            Block::List { items, .. } => self.list(items, out),
            Block::Table(rows) => self.table(rows, out),
            Block::Figure {
                path,
                label,
                caption,
            } => self.figure(path, label.as_ref(), caption.as_deref(), out),
            // these only feed the reference table
            Block::ReferenceDef { .. } | Block::FootnoteRef(_) => {}
            Block::BlankRun(count) => out.push_str(&"\n".repeat(*count)),
        }
    }

    /// Render each line and join them with a single space.
    pub(crate) fn lines(&mut self, lines: &[Line]) -> String {
        lines
            .iter()
            .map(|line| self.inlines(line))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn inlines(&mut self, content: &[Inline]) -> String {
        let mut out = String::new();
        for inline in content {
            self.inline(inline, &mut out);
        }
        out
    }

    fn wrap(&mut self, command: &str, content: &[Inline], out: &mut String) {
        let text = self.inlines(content);
        out.push_str(&format!("\\{}{{{}}}", command, text));
    }

    fn inline(&mut self, inline: &Inline, out: &mut String) {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Bold(content) => self.wrap("textbf", content, out),
            Inline::Italic(content) => self.wrap("textit", content, out),
            Inline::Underline(content) => self.wrap("underline", content, out),
            Inline::Escaped(c) => out.push_str(&escape(*c)),
            Inline::Footnote => self.footnote(out),
            Inline::Reference(Identifier(identifier)) => self.reference(identifier, out),
            Inline::Color(content, spec) => {
                require(&mut self.preamble, XCOLOR);
                let text = self.inlines(content);
                let result = match spec {
                    Color::Named(name) => format!("\\textcolor{{{}}}{{{}}}", name, text),
                    Color::Hex(hex) => format!(
                        "\\textcolor[HTML]{{{}}}{{{}}}",
                        hex.to_ascii_uppercase(),
                        text
                    ),
                    Color::Rgb(r, g, b) => {
                        format!("\\textcolor[RGB]{{{},{},{}}}{{{}}}", r, g, b, text)
                    }
                };
                out.push_str(&result);
            }
        }
    }

    fn footnote(&mut self, out: &mut String) {
        let body = match self
            .footnotes
            .as_mut()
        {
            Some(queue) => queue.pop_front(),
            None => {
                self.report(Diagnostic::NestedFootnote);
                return;
            }
        };

        self.markers += 1;
        match body {
            Some(body) => out.push_str(&format!("\\footnote{{{}}}", body)),
            None => self.report(Diagnostic::FootnoteUnderflow(self.markers)),
        }
    }

    fn reference(&mut self, identifier: &str, out: &mut String) {
        let references = self.references;
        match references.get(identifier) {
            Some(reference) => match reference.kind {
                ReferenceKind::Citation => {
                    out.push_str(&format!("\\cite{{{}}}", reference.value));
                }
                ReferenceKind::Label => {
                    out.push_str(&format!("\\ref{{{}}}", reference.value));
                }
            },
            None => self.report(Diagnostic::UndefinedReference(identifier.to_string())),
        }
    }

    /// Items arrive flat; a run of items indented deeper than the current
    /// level becomes a nested environment of its own.
    fn list(&mut self, items: &[ListItem], out: &mut String) {
        let first = match items.first() {
            Some(first) => first,
            None => return,
        };
        let level = first.indentation;
        let mut kind = first.kind;

        out.push_str(&format!("\\begin{{{}}}\n", environment(kind)));

        let mut i = 0;
        while i < items.len() {
            let item = &items[i];

            if item.indentation > level {
                let end = items[i..]
                    .iter()
                    .position(|item| item.indentation <= level)
                    .map(|n| i + n)
                    .unwrap_or(items.len());
                self.list(&items[i..end], out);
                i = end;
                continue;
            }

            if item.kind != kind {
                out.push_str(&format!("\\end{{{}}}\n", environment(kind)));
                kind = item.kind;
                out.push_str(&format!("\\begin{{{}}}\n", environment(kind)));
            }

            let text = self.lines(&item.lines);
            out.push_str(&format!("\\item {}\n", text));
            i += 1;
        }

        out.push_str(&format!("\\end{{{}}}\n", environment(kind)));
    }

    fn table(&mut self, rows: &[TableRow], out: &mut String) {
        let columns = rows
            .iter()
            .map(|row| {
                row.0
                    .len()
            })
            .max()
            .unwrap_or(0);

        out.push_str(&format!(
            "\\begin{{tabular}}{{{}|}}\n\\hline\n",
            "|l".repeat(columns)
        ));

        for row in rows {
            let cells = row
                .0
                .iter()
                .map(|cell| self.inlines(&cell.0))
                .collect::<Vec<_>>();
            out.push_str(&cells.join(" & "));
            out.push_str(" \\\\\n\\hline\n");
        }

        out.push_str("\\end{tabular}\n");
    }

    fn figure(
        &mut self,
        path: &str,
        label: Option<&Identifier>,
        caption: Option<&[Line]>,
        out: &mut String,
    ) {
        require(&mut self.preamble, GRAPHICX);

        out.push_str("\\begin{figure}[h]\n\\centering\n");
        out.push_str(&format!("\\includegraphics{{{}}}\n", path));
        if let Some(caption) = caption {
            let text = self.lines(caption);
            out.push_str(&format!("\\caption{{{}}}\n", text));
        }
        if let Some(Identifier(label)) = label {
            out.push_str(&format!("\\label{{{}}}\n", label));
        }
        out.push_str("\\end{figure}\n");
    }
}

fn environment(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Ordered => "enumerate",
        ListKind::Unordered => "itemize",
    }
}

/// The literal character for an escape. Characters that TeX itself treats
/// specially are spelled so that the glyph is what gets typeset.
fn escape(c: char) -> String {
    match c {
        '#' => "\\#".to_string(),
        '_' => "\\_".to_string(),
        '^' => "\\^{}".to_string(),
        '\\' => "\\textbackslash{}".to_string(),
        '<' => "\\textless{}".to_string(),
        '>' => "\\textgreater{}".to_string(),
        '|' => "\\textbar{}".to_string(),
        c => c.to_string(),
    }
}
