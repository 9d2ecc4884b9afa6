// Command-line interface for html-to-textile
//
// Usage:
//  html-to-textile [INPUT] [--output <file>] [--ignore <tag>]...
//
// INPUT is an HTML file; without it, or with `-`, HTML is read from stdin.
// The Textile result goes to stdout unless --output names a file.
// Set RUST_LOG=debug to see how unclosed or ignored elements were handled.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use html_to_textile::{Options, TextileError, TextileService};

#[derive(Debug, Parser)]
#[command(name = "html-to-textile", version, about = "Convert HTML to Textile")]
struct Cli {
    /// HTML file to convert (`-` or omitted reads stdin)
    input: Option<PathBuf>,

    /// Write the Textile to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Keep source indentation instead of collapsing it before parsing
    #[arg(long)]
    keep_source_whitespace: bool,

    /// Do not trim leading and trailing whitespace from the result
    #[arg(long)]
    no_trim: bool,

    /// Skip elements with this tag name and everything inside them
    #[arg(long = "ignore", value_name = "TAG")]
    ignored_tags: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },

    #[error(transparent)]
    Convert(#[from] TextileError),
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            normalize_source: !self.keep_source_whitespace,
            trim_output: !self.no_trim,
            ignored_tags: self.ignored_tags.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    fn read_input(&self) -> Result<String, CliError> {
        match self.input.as_deref() {
            Some(path) if path.as_os_str() != "-" => {
                fs::read_to_string(path).map_err(|source| CliError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
            _ => {
                let mut html = String::new();
                io::stdin()
                    .read_to_string(&mut html)
                    .map_err(|source| CliError::Read {
                        path: "stdin".to_string(),
                        source,
                    })?;
                Ok(html)
            }
        }
    }

    fn write_output(&self, textile: &str) -> Result<(), CliError> {
        let mut content = textile.to_string();
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }

        match &self.output {
            Some(path) => fs::write(path, content).map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            }),
            None => io::stdout()
                .write_all(content.as_bytes())
                .map_err(|source| CliError::Write {
                    path: "stdout".to_string(),
                    source,
                }),
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let html = cli.read_input()?;
    let service = TextileService::with_options(cli.options());
    let textile = service.convert(&html)?;
    log::debug!("converted {} bytes of HTML into {} bytes of Textile", html.len(), textile.len());
    cli.write_output(&textile)
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("html-to-textile: {err}");
            ExitCode::FAILURE
        }
    }
}
