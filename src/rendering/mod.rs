//! Turning a parsed Document into LaTeX body text.

use tracing::debug;

use crate::language::Document;

mod diagnostics;
mod latex;
mod references;

pub use diagnostics::{Diagnostic, Severity};
pub use latex::{GRAPHICX, XCOLOR};
pub use references::{resolve, Reference, ReferenceKind, ReferenceTable, Resolution};

/// The rendered body together with the preamble lines it needs and any
/// problems noticed along the way.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Output {
    pub preamble: Vec<&'static str>,
    pub body: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Render a document in two passes. The first collects footnote bodies and
/// reference definitions; the second emits each block in order, handing
/// out footnote bodies as markers are met.
pub fn render(document: &Document) -> Output {
    let resolution = resolve(document);

    let markers = document.footnote_markers();
    let bodies = resolution
        .table
        .footnotes
        .len();
    if markers != bodies {
        debug!("{} footnote markers but {} footnote bodies", markers, bodies);
    }

    let Resolution {
        table,
        mut preamble,
        mut diagnostics,
    } = resolution;
    let ReferenceTable {
        footnotes,
        references,
    } = table;

    let mut renderer = latex::Renderer::new(&references, Some(footnotes));
    let mut body = String::new();
    for block in &document.blocks {
        renderer.block(block, &mut body);
    }

    let (fragments, found) = renderer.finish();
    for fragment in fragments {
        latex::require(&mut preamble, fragment);
    }
    diagnostics.extend(found);

    debug!(
        "Rendered {} bytes with {} diagnostics",
        body.len(),
        diagnostics.len()
    );

    Output {
        preamble,
        body,
        diagnostics,
    }
}
