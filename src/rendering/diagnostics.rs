//! Problems found while resolving and rendering. None of these stop
//! output from being produced.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An inline reference names an identifier that was never defined.
    UndefinedReference(String),
    /// The nth footnote marker (counting from 1) found every footnote body
    /// already used.
    FootnoteUnderflow(usize),
    /// An identifier was defined more than once; the last definition is
    /// the one used.
    DuplicateReference(String),
    /// A footnote marker inside a footnote body or reference definition.
    NestedFootnote,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::UndefinedReference(_) => Severity::Warning,
            Diagnostic::FootnoteUnderflow(_) => Severity::Error,
            Diagnostic::DuplicateReference(_) => Severity::Warning,
            Diagnostic::NestedFootnote => Severity::Warning,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Diagnostic::UndefinedReference(identifier) => {
                format!("reference '{}' not defined in document", identifier)
            }
            Diagnostic::FootnoteUnderflow(ordinal) => {
                format!("footnote marker {} has no footnote body left", ordinal)
            }
            Diagnostic::DuplicateReference(identifier) => {
                format!(
                    "reference '{}' defined more than once; using the last definition",
                    identifier
                )
            }
            Diagnostic::NestedFootnote => {
                "footnote marker inside a footnote or reference body".to_string()
            }
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity(), self.message())
    }
}
