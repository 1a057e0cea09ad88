//! First pass over a document: gather footnote bodies and identifier
//! definitions before any text is emitted, so that markers and references
//! may appear ahead of what they point at.

use std::collections::{HashMap, VecDeque};
use tracing::debug;

use crate::language::*;

use super::diagnostics::Diagnostic;
use super::latex::{require, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// From a `[id]: ...` definition; renders as a citation.
    Citation,
    /// From a figure label; renders as a cross reference.
    Label,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub value: String,
}

/// Rendered footnote bodies in document order, and every identifier defined
/// anywhere in the document.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReferenceTable<'i> {
    pub footnotes: VecDeque<String>,
    pub references: HashMap<&'i str, Reference>,
}

/// Everything the first pass produces.
#[derive(Debug, Default)]
pub struct Resolution<'i> {
    pub table: ReferenceTable<'i>,
    pub preamble: Vec<&'static str>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'i> Resolution<'i> {
    fn absorb(&mut self, (preamble, diagnostics): (Vec<&'static str>, Vec<Diagnostic>)) {
        for fragment in preamble {
            require(&mut self.preamble, fragment);
        }
        self.diagnostics
            .extend(diagnostics);
    }

    fn define(&mut self, identifier: &'i str, reference: Reference) {
        let previous = self
            .table
            .references
            .insert(identifier, reference);
        if previous.is_some() {
            let diagnostic = Diagnostic::DuplicateReference(identifier.to_string());
            debug!("{}", diagnostic);
            self.diagnostics
                .push(diagnostic);
        }
    }
}

/// Record figure labels, then reference definitions in document order,
/// then render footnote bodies onto the queue. A definition body sees the
/// labels and the definitions before it; footnote bodies see every
/// identifier in the document.
pub fn resolve<'i>(document: &Document<'i>) -> Resolution<'i> {
    let mut resolution = Resolution::default();

    for block in &document.blocks {
        if let Block::Figure {
            label: Some(Identifier(label)),
            ..
        } = block
        {
            resolution.define(
                *label,
                Reference {
                    kind: ReferenceKind::Label,
                    value: label.to_string(),
                },
            );
        }
    }

    for block in &document.blocks {
        if let Block::ReferenceDef {
            identifier: Identifier(identifier),
            lines,
        } = block
        {
            let mut renderer = Renderer::new(&resolution.table.references, None);
            let value = renderer.lines(lines);
            let found = renderer.finish();
            resolution.absorb(found);
            resolution.define(
                *identifier,
                Reference {
                    kind: ReferenceKind::Citation,
                    value,
                },
            );
        }
    }

    for block in &document.blocks {
        if let Block::FootnoteRef(content) = block {
            let mut renderer = Renderer::new(&resolution.table.references, None);
            let body = renderer.inlines(content);
            let found = renderer.finish();
            resolution.absorb(found);
            resolution
                .table
                .footnotes
                .push_back(body);
        }
    }

    debug!(
        "Resolved {} footnote bodies and {} references",
        resolution
            .table
            .footnotes
            .len(),
        resolution
            .table
            .references
            .len()
    );

    resolution
}
