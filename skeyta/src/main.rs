//! binary glyph patching tool
//!
//! Takes a font file and one or more glyph specs naming SVG artwork, and
//! writes a new font file with the artwork installed as glyph outlines.

use clap::Parser;
use skeyta::{load_font, parse_glyph_spec, patch_font, GlyphRequest};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The input font file.
    #[arg(short, long)]
    path: std::path::PathBuf,

    /// The output font file.
    #[arg(short, long)]
    output_file: std::path::PathBuf,

    /// A glyph to install:
    /// svg_path,glyph_name,codepoint_hex[,advance_width[,x_offset]].
    /// May be repeated.
    #[arg(short, long = "glyph", value_name = "SPEC")]
    glyphs: Vec<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let requests = match args
        .glyphs
        .iter()
        .map(|spec| parse_glyph_spec(spec))
        .collect::<Result<Vec<GlyphRequest>, _>>()
    {
        Ok(requests) => requests,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let font_bytes = match std::fs::read(&args.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("failed to read {}: {e}", args.path.display());
            std::process::exit(1);
        }
    };
    let font = match load_font(&font_bytes) {
        Ok(font) => font,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let (output, report) = match patch_font(&font, &requests) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(&args.output_file, output) {
        eprintln!("failed to write {}: {e}", args.output_file.display());
        std::process::exit(1);
    }
    println!(
        "font saved to {}: {} glyphs added, {} requests skipped",
        args.output_file.display(),
        report.added(),
        report.skipped(),
    );
}
