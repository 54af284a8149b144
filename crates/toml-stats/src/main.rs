use clap::{Parser, ValueEnum};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use std::path::PathBuf;
use std::process::ExitCode;
use toml_cursor::Document;

mod stats;

#[derive(Debug, Parser)]
#[command(name = "toml-stats")]
#[command(about = "Count the tables, keys and values of TOML files", long_about = None)]
struct Cli {
    /// Print every key path with its decoded value
    #[arg(long)]
    values: bool,
    #[arg(long, value_enum, default_value_t = Color::Auto)]
    color: Color,
    #[arg(required = true, help = "TOML files to inspect")]
    files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Color {
    Auto,
    Always,
    Never,
}

impl From<Color> for ColorChoice {
    fn from(color: Color) -> Self {
        match color {
            Color::Auto => ColorChoice::Auto,
            Color::Always => ColorChoice::Always,
            Color::Never => ColorChoice::Never,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let writer = StandardStream::stderr(cli.color.into());
    let config = codespan_reporting::term::Config::default();
    let mut failed = false;

    for path in &cli.files {
        let content = match std::fs::read(path) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                failed = true;
                continue;
            }
        };
        let doc = match Document::new(&content) {
            Ok(doc) => doc,
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                failed = true;
                continue;
            }
        };
        let report = stats::walk(&doc, cli.values);

        println!("Statistics for file: {}\n", path.display());
        println!("{}", report.stats);
        if cli.values {
            println!();
            for line in &report.values {
                println!("  {line}");
            }
        }
        println!();

        let name = path.display().to_string();
        match std::str::from_utf8(doc.as_bytes()) {
            Ok(text) => {
                let file = SimpleFile::new(name, text);
                for diag in &report.diags {
                    if let Err(err) = codespan_reporting::term::emit_to_io_write(
                        &mut writer.lock(),
                        &config,
                        &file,
                        diag,
                    ) {
                        eprintln!("failed to emit diagnostic: {err}");
                    }
                }
            }
            // Spans would not line up with a lossy copy, so fall back to
            // plain positions.
            Err(_) => {
                for diag in &report.diags {
                    let start = diag.labels.first().map_or(0, |l| l.range.start);
                    let (line, col) = doc.line_col(start as u32);
                    let code = diag.code.as_deref().unwrap_or("error");
                    eprintln!("{name}:{}:{}: {code} {}", line + 1, col + 1, diag.message);
                }
            }
        }
        failed |= report.has_errors();
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
