//! The standard article preamble.

use serde::Serialize;
use std::fmt;
use tinytemplate::{format_unescaped, TinyTemplate};

use crate::rendering::Output;

use super::Template;

static TEMPLATE: &str = r#"{documentclass}
{{ for package in packages }}{package}
{{ endfor }}{{ for fragment in fragments }}{fragment}{{ endfor }}{begin}
{body}{end}
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub options: Option<String>,
}

impl Package {
    pub fn new(name: &str) -> Package {
        Package {
            name: name.to_string(),
            options: None,
        }
    }

    pub fn with_options(name: &str, options: &str) -> Package {
        Package {
            name: name.to_string(),
            options: Some(options.to_string()),
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.options {
            Some(options) => write!(f, "\\usepackage[{}]{{{}}}", options, self.name),
            None => write!(f, "\\usepackage{{{}}}", self.name),
        }
    }
}

/// Document class and the packages every document loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub class: String,
    pub packages: Vec<Package>,
}

impl Default for Article {
    fn default() -> Self {
        Article {
            class: "article".to_string(),
            packages: vec![
                Package::with_options("inputenc", "utf8"),
                Package::with_options("fontenc", "T1"),
                Package::new("lmodern"),
                Package::with_options("babel", "english"),
            ],
        }
    }
}

#[derive(Serialize)]
struct Context<'a> {
    documentclass: String,
    packages: Vec<String>,
    fragments: &'a [&'static str],
    begin: &'static str,
    body: &'a str,
    end: &'static str,
}

impl Template for Article {
    fn render(&self, output: &Output) -> Result<String, tinytemplate::error::Error> {
        let mut tt = TinyTemplate::new();
        tt.set_default_formatter(&format_unescaped);
        tt.add_template("article", TEMPLATE)?;

        let context = Context {
            documentclass: format!("\\documentclass{{{}}}", self.class),
            packages: self
                .packages
                .iter()
                .map(|package| package.to_string())
                .collect(),
            fragments: &output.preamble,
            begin: "\\begin{document}",
            body: &output.body,
            end: "\\end{document}",
        };

        tt.render("article", &context)
    }
}
