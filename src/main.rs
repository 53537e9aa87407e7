//! # folio CLI
//!
//! Usage:
//!   folio output.pdf < document.json
//!   folio layout.json --format json < document.json
//!   folio --example > document.json
//!   folio --measure "Some text" --font Helvetica --size 16

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process;

use log::warn;

use folio::diagnostics::LogSink;
use folio::error::FolioError;
use folio::font::{FontSpec, Measure, StandardMetrics};
use folio::model::{Document, FontStyle, FontWeight};
use folio::surface::RecordingSurface;
use folio::units::to_points;

const USAGE: &str = "Usage: folio <output> [--format pdf|json] < document.json
       folio --example
       folio --measure <text> [--font <family>] [--size <px>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Pdf,
    Json,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();

    // Handle --example flag
    if args.iter().any(|a| a == "--example") {
        print!("{}", example_json());
        return;
    }

    if let Some(text) = flag_value(&args, "--measure") {
        let family = flag_value(&args, "--font").unwrap_or("Helvetica");
        let size_px = match flag_value(&args, "--size").map(str::parse::<f64>) {
            None => 16.0,
            Some(Ok(v)) if v > 0.0 => v,
            Some(_) => exit_usage("--size must be a positive number"),
        };
        let font = FontSpec {
            family: family.to_string(),
            size: to_points(size_px),
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
        };
        let metrics = StandardMetrics.measure(text, &font);
        match serde_json::to_string(&metrics) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("✗ {}", FolioError::Render(e.to_string()));
                process::exit(1);
            }
        }
        return;
    }

    let format = match flag_value(&args, "--format") {
        None | Some("pdf") => Format::Pdf,
        Some("json") => Format::Json,
        Some(other) => exit_usage(&format!("unknown format '{other}'")),
    };

    let Some(output) = positional(&args) else {
        exit_usage("missing output path");
    };

    match run(Path::new(output), format) {
        Ok(bytes) => {
            eprintln!("✓ Written {} bytes to {}", bytes, output);
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            process::exit(1);
        }
    }
}

fn run(output: &Path, format: Format) -> Result<usize, FolioError> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| FolioError::io("<stdin>", e))?;
    let document = Document::from_json(&input)?;

    let bytes = match format {
        Format::Pdf => {
            let mut sink = LogSink::default();
            let pdf = folio::render(&document, &mut sink)?;
            if sink.count > 0 {
                warn!("{} layout diagnostics; output may be incomplete", sink.count);
            }
            pdf
        }
        Format::Json => {
            let mut diagnostics = Vec::new();
            let mut surface = RecordingSurface::new();
            folio::render_with(&document, &mut surface, &mut diagnostics)?;
            for d in &diagnostics {
                warn!("{d}");
            }
            let dump = folio::LayoutDump {
                pages: surface.into_pages(),
                diagnostics,
            };
            serde_json::to_vec_pretty(&dump).map_err(|e| FolioError::Render(e.to_string()))?
        }
    };

    fs::write(output, &bytes).map_err(|e| FolioError::io(output, e))?;
    Ok(bytes.len())
}

/// Value following `flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Flags that consume the following argument.
const VALUE_FLAGS: [&str; 4] = ["--format", "--font", "--size", "--measure"];

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            skip_next = VALUE_FLAGS.contains(&arg.as_str());
            continue;
        }
        return Some(arg.as_str());
    }
    None
}

fn exit_usage(msg: &str) -> ! {
    eprintln!("✗ {}\n{}", msg, USAGE);
    process::exit(2);
}

fn example_json() -> &'static str {
    r##"{
  "width": 794,
  "height": 1123,
  "metadata": { "title": "Mixed-direction sample" },
  "pages": [
    {
      "items": [
        {
          "class": "ItemList",
          "direction": "Vertical",
          "shiftX": 96,
          "shiftY": 96,
          "list": [
            {
              "class": "TextBox",
              "text": "Commentary on the Physics",
              "fontFamily": "Times",
              "fontSize": 24,
              "fontWeight": "bold",
              "width": 330,
              "height": 40
            },
            {
              "class": "ItemList",
              "direction": "Horizontal",
              "textDirection": "ltr",
              "height": 24,
              "list": [
                { "class": "TextBox", "text": "The term ", "fontFamily": "Times", "fontSize": 16, "width": 62 },
                { "class": "TextBox", "text": "طبيعة", "fontFamily": "Times", "fontSize": 16, "textDirection": "rtl", "width": 38 },
                { "class": "TextBox", "text": " renders physis.", "fontFamily": "Times", "fontSize": 16, "fontStyle": "italic", "width": 104 }
              ]
            },
            {
              "class": "ItemList",
              "direction": "Horizontal",
              "textDirection": "rtl",
              "shiftX": 500,
              "height": 24,
              "list": [
                { "class": "TextBox", "text": "قال ", "fontFamily": "Times", "fontSize": 16, "width": 26 },
                { "class": "TextBox", "text": "Aristotle", "fontFamily": "Times", "fontSize": 16, "textDirection": "ltr", "width": 60 },
                { "class": "TextBox", "text": " في الكتاب", "fontFamily": "Times", "fontSize": 16, "width": 64 }
              ]
            }
          ]
        }
      ]
    },
    {
      "width": 400,
      "height": 300,
      "items": [
        { "class": "TextBox", "text": "Colophon", "fontFamily": "Helvetica", "fontSize": 12, "shiftX": 20, "shiftY": 20, "width": 60, "height": 16 }
      ]
    }
  ]
}
"##
}
