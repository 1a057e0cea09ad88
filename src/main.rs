use clap::{Arg, ArgAction, Command};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::{debug, info, Level};

use plastix::parsing;
use plastix::rendering;
use plastix::templating::{self, Article, Package};

mod problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("plastix")
        .version(VERSION)
        .about("A lightweight markup language that compiles to LaTeX.")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the LaTeX document to the given file instead of standard output."),
        )
        .arg(
            Arg::new("class")
                .long("class")
                .value_name("NAME")
                .default_value("article")
                .help("The LaTeX document class to use."),
        )
        .arg(
            Arg::new("package")
                .long("package")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help("Load an additional LaTeX package. May be given more than once."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Print debug logging to standard error."),
        )
        .arg(
            Arg::new("filename")
                .required(true)
                .help("The plastix document to convert. Use '-' to read from standard input."),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // required, so clap has already rejected a missing filename
    let filename = match matches.get_one::<String>("filename") {
        Some(filename) => Path::new(filename),
        None => std::process::exit(2),
    };

    let mut article = Article::default();
    if let Some(class) = matches.get_one::<String>("class") {
        article.class = class.clone();
    }
    if let Some(packages) = matches.get_many::<String>("package") {
        for name in packages {
            article
                .packages
                .push(Package::new(name));
        }
    }

    info!("Converting {}", filename.display());

    let original = match parsing::read(filename) {
        Ok(original) => original,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    };
    let stripped = parsing::strip_comments(&original);

    let document = match parsing::parse(&stripped) {
        Ok(document) => document,
        Err(error) => {
            eprintln!(
                "{}",
                problem::full_parsing_error(&error, filename, &original, &stripped)
            );
            std::process::exit(1);
        }
    };

    let output = rendering::render(&document);
    for diagnostic in &output.diagnostics {
        eprintln!("{}", problem::concise_diagnostic(diagnostic, filename));
    }

    let result = match templating::fill(&article, &output) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            std::process::exit(1);
        }
    };

    match matches.get_one::<String>("output") {
        Some(target) => {
            if let Err(error) = std::fs::write(target, &result) {
                eprintln!(
                    "{}: {}: {}",
                    "error".bright_red(),
                    target,
                    error
                        .kind()
                        .bold()
                );
                std::process::exit(1);
            }
            debug!("Wrote {} bytes to {}", result.len(), target);
        }
        None => print!("{}", result),
    }
}
