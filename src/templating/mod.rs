//! Templates for producing complete LaTeX documents

mod article;
mod template;

pub use article::{Article, Package};
pub use template::Template;

use crate::rendering::Output;

/// Fill the given template with rendered output
pub fn fill(
    template: &impl Template,
    output: &Output,
) -> Result<String, tinytemplate::error::Error> {
    template.render(output)
}
