//! CLI tool for spangrid - resolves merged cells of a grid file
//!
//! Usage:
//!   spangrid_cli <grid.json|grid.csv|grid.tsv>               # Resolved matrix as JSON
//!   spangrid_cli <grid.csv> --span 0:region:2:1 --html        # HTML table
//!   spangrid_cli <grid.json> -o out.json --clamp-negative --clip
//!
//! Set `SPANGRID_LOG=debug` (or `trace`) to see resolution events on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use spangrid::csv::Delimiter;
use spangrid::render::render_table;
use spangrid::{GridDocument, NegativeSpanPolicy, SpanDirective, SpanOverflow};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: spangrid_cli <grid.json|grid.csv|grid.tsv> [-o output] [--html] \
                     [--span ROW:KEY:ROWSPAN:COLSPAN]... [--clamp-negative] [--clip]";

struct Args {
    input: String,
    output: Option<String>,
    html: bool,
    spans: Vec<SpanDirective>,
    clamp_negative: bool,
    clip: bool,
}

fn parse_args(argv: &[String]) -> Result<Args, String> {
    let mut args = Args {
        input: String::new(),
        output: None,
        html: false,
        spans: Vec::new(),
        clamp_negative: false,
        clip: false,
    };

    let mut it = argv.iter().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-o" => args.output = Some(it.next().ok_or("-o needs a path")?.clone()),
            "--html" => args.html = true,
            "--span" => {
                let directive = it.next().ok_or("--span needs ROW:KEY:ROWSPAN:COLSPAN")?;
                args.spans.push(directive.parse::<SpanDirective>().map_err(|e| format!("{e}"))?);
            }
            "--clamp-negative" => args.clamp_negative = true,
            "--clip" => args.clip = true,
            other if other.starts_with('-') => return Err(format!("unknown flag {other}")),
            other if args.input.is_empty() => args.input = other.to_string(),
            other => return Err(format!("unexpected argument {other}")),
        }
    }

    if args.input.is_empty() {
        return Err("missing input file".to_string());
    }
    Ok(args)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SPANGRID_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    init_logging();

    let argv: Vec<String> = env::args().collect();
    let args = match parse_args(&argv) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            std::process::exit(1);
        }
    };

    // Read input file
    let data = match fs::read(&args.input) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    let ext = Path::new(&args.input)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let parsed = if ext == "json" {
        String::from_utf8(data)
            .map_err(|e| spangrid::SpangridError::Parse(e.to_string()))
            .and_then(|text| GridDocument::from_json(&text))
    } else {
        GridDocument::from_delimited(&data, Delimiter::from_extension(&ext))
    };
    let mut doc = match parsed {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error parsing {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    doc.spans.extend(args.spans);
    if args.clamp_negative {
        doc.options.negative_spans = NegativeSpanPolicy::Clamp;
    }
    if args.clip {
        doc.options.overflow = SpanOverflow::Clip;
    }

    let table = match doc.resolve() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error resolving spans: {}", e);
            std::process::exit(1);
        }
    };

    let rendered = if args.html {
        render_table(&table, &doc.columns, |row, col| doc.cell_text(row, col))
    } else {
        match serde_json::to_string_pretty(&table) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Error serializing JSON: {}", e);
                std::process::exit(1);
            }
        }
    };

    // Output
    match args.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &rendered) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(rendered.as_bytes()).unwrap();
            println!();
        }
    }
}
