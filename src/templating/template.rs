//! Template trait for wrapping rendered output into a complete document

use crate::rendering::Output;

/// Trait for templates that turn a rendered body and its preamble
/// fragments into finished LaTeX source
pub trait Template {
    fn render(&self, output: &Output) -> Result<String, tinytemplate::error::Error>;
}
