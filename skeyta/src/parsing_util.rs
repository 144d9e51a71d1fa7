//! Input parsing util functions for the command line tool.

use std::path::PathBuf;

use crate::{GlyphRequest, PatchError};

/// Parse one glyph spec:
/// `svg_path,glyph_name,codepoint_hex[,advance_width[,x_offset]]`.
///
/// For example `--glyph cup.svg,cup,222A,600` installs `cup.svg` as the
/// glyph "cup" at U+222A with a 600-unit advance. A missing advance
/// width (or `0`) means "compute a default"; a missing offset means
/// zero.
pub fn parse_glyph_spec(spec: &str) -> Result<GlyphRequest, PatchError> {
    let invalid = |reason: &str| PatchError::InvalidGlyphSpec {
        spec: spec.to_owned(),
        reason: reason.to_owned(),
    };
    let mut fields = spec.split(',').map(str::trim);
    let svg_path = fields
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid("missing svg path"))?;
    let name = fields
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid("missing glyph name"))?;
    let codepoint = parse_codepoint(fields.next().ok_or_else(|| invalid("missing codepoint"))?)?;
    let advance_width = match fields.next() {
        Some(width) => width
            .parse::<u16>()
            .map_err(|_| invalid("advance width must be a non-negative integer"))?,
        None => 0,
    };
    let x_offset = match fields.next() {
        Some(offset) => offset
            .parse::<f64>()
            .map_err(|_| invalid("x offset must be a number"))?,
        None => 0.0,
    };
    if fields.next().is_some() {
        return Err(invalid("too many fields"));
    }
    Ok(GlyphRequest {
        svg_path: PathBuf::from(svg_path),
        name: name.to_owned(),
        codepoint,
        advance_width,
        x_offset,
    })
}

/// Parse a hex codepoint such as `222A`, optionally prefixed with `U+`
/// or `0x`.
pub fn parse_codepoint(raw: &str) -> Result<char, PatchError> {
    let digits = raw
        .strip_prefix("U+")
        .or_else(|| raw.strip_prefix("u+"))
        .or_else(|| raw.strip_prefix("0x"))
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| PatchError::InvalidCodepoint(raw.to_owned()))
}
