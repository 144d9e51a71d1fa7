//! Patch SVG artwork into a font file as glyph outlines.
//!
//! Takes a font and a batch of glyph requests, each naming an SVG file, a
//! glyph name, a Unicode codepoint, an advance width and an optional
//! horizontal nudge. Each SVG's path data is scaled and centered for the
//! font's em square, converted to a quadratic outline, and installed in
//! the font: the outline goes into 'glyf'/'loca', the name into 'post',
//! the codepoint into every Unicode 'cmap' subtable, and the advance
//! width into 'hmtx'. All other tables are copied unchanged.
//!
//! Requests are processed strictly in order. A request whose SVG file is
//! missing or unusable is skipped and recorded in the [`BatchReport`];
//! only font-level preconditions (no Unicode cmap, compressed input)
//! fail the whole run.

mod cmap;
mod glyf_loca;
mod head;
mod hmtx;
mod maxp;
mod outline;
mod parsing_util;
mod post;
mod svg;
mod transform;

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;
use write_fonts::{
    read::{FontRef, ReadError, TableProvider},
    tables::glyf::{Bbox, Glyph},
    types::Tag,
    BuilderError, FontBuilder,
};

pub use parsing_util::{parse_codepoint, parse_glyph_spec};
pub use svg::{clean_svg_text, find_view_box, ViewBox};
pub use transform::design_transform;

/// Advance width stored for a request that asked for the default,
/// as a fraction of the em.
const DEFAULT_ADVANCE: f64 = 0.6;

/// A single glyph to install in the font.
#[derive(Clone, Debug)]
pub struct GlyphRequest {
    /// The SVG file holding the artwork.
    pub svg_path: PathBuf,
    /// Name for the new glyph. A glyph of the same name, whether already
    /// in the font or added earlier in the batch, is replaced in place.
    pub name: String,
    /// Codepoint to map to the new glyph in every Unicode cmap subtable.
    pub codepoint: char,
    /// Advance width in font units. Zero means "use 60% of the em".
    pub advance_width: u16,
    /// Extra horizontal nudge, in SVG user units.
    pub x_offset: f64,
}

impl GlyphRequest {
    /// Build a request from a hex codepoint string such as `"222A"`.
    pub fn from_hex(
        svg_path: impl Into<PathBuf>,
        name: impl Into<String>,
        codepoint_hex: &str,
        advance_width: u16,
        x_offset: f64,
    ) -> Result<Self, PatchError> {
        Ok(GlyphRequest {
            svg_path: svg_path.into(),
            name: name.into(),
            codepoint: parse_codepoint(codepoint_hex)?,
            advance_width,
            x_offset,
        })
    }
}

/// What happened to one request.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// The glyph was installed at `glyph_id`.
    Added {
        name: String,
        glyph_id: u32,
        advance_width: u16,
        /// `None` for an empty outline.
        bbox: Option<Bbox>,
    },
    /// The SVG file did not exist; the request was skipped.
    SkippedMissingFile { name: String, svg_path: PathBuf },
    /// The SVG could not be turned into an outline; the request was skipped.
    Failed { name: String, reason: String },
}

/// Per-request outcomes of one batch run, in request order.
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<Outcome>,
}

impl BatchReport {
    /// The number of glyphs installed in the font.
    pub fn added(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Added { .. }))
            .count()
    }

    /// The number of requests skipped, for any reason.
    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.added()
    }
}

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("failed to read font: {0}")]
    Font(#[from] ReadError),

    #[error("compressed font input is not supported; decompress to TTF first")]
    CompressedInput,

    #[error("font has no Unicode cmap subtable")]
    NoUnicodeCmap,

    #[error("font cannot hold more than {} glyphs", u16::MAX)]
    TooManyGlyphs,

    #[error("invalid glyph spec '{spec}': {reason}")]
    InvalidGlyphSpec { spec: String, reason: String },

    #[error("invalid codepoint '{0}'")]
    InvalidCodepoint(String),

    #[error("failed to build '{0}' table: {1}")]
    Table(Tag, String),
}

impl From<BuilderError> for PatchError {
    fn from(err: BuilderError) -> Self {
        PatchError::Table(err.tag, err.inner.to_string())
    }
}

/// A per-request failure. Never escapes the batch loop; folded into the
/// report instead.
#[derive(Debug, Error)]
enum RequestError {
    #[error("failed to read SVG: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse SVG document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("failed to parse path data: {0}")]
    PathData(String),

    #[error("viewBox declares a zero-area canvas ({0} x {1})")]
    DegenerateViewBox(f64, f64),

    #[error("failed to convert outline: {0}")]
    Outline(String),
}

/// One accepted outline, ready for the table rebuild.
pub(crate) struct NewGlyph {
    pub(crate) name: String,
    pub(crate) codepoint: char,
    pub(crate) advance_width: u16,
    pub(crate) glyph: Glyph,
    pub(crate) bbox: Option<Bbox>,
}

/// Everything the per-table rebuild steps need, computed up front so the
/// rebuild never sees partially-applied state.
pub(crate) struct Plan {
    pub(crate) units_per_em: u16,
    /// Names of the glyphs already in the font, in glyph id order.
    pub(crate) glyph_names: Vec<String>,
    /// Outlines replacing an existing glyph, keyed by glyph id.
    pub(crate) replaced: HashMap<usize, NewGlyph>,
    /// Outlines appended after the existing glyphs, in request order.
    pub(crate) appended: Vec<NewGlyph>,
}

impl Plan {
    pub(crate) fn num_glyphs(&self) -> usize {
        self.glyph_names.len() + self.appended.len()
    }

    /// All new outlines with the glyph id each will occupy.
    pub(crate) fn new_glyphs(&self) -> impl Iterator<Item = (usize, &NewGlyph)> {
        let appended_base = self.glyph_names.len();
        self.replaced.iter().map(|(gid, glyph)| (*gid, glyph)).chain(
            self.appended
                .iter()
                .enumerate()
                .map(move |(i, glyph)| (appended_base + i, glyph)),
        )
    }
}

/// Parse font bytes, rejecting compressed containers.
///
/// WOFF and WOFF2 files are detected by magic and refused with a
/// distinct error; everything else is handed to [`FontRef`].
pub fn load_font(bytes: &[u8]) -> Result<FontRef, PatchError> {
    if bytes.starts_with(b"wOFF") || bytes.starts_with(b"wOF2") {
        return Err(PatchError::CompressedInput);
    }
    Ok(FontRef::new(bytes)?)
}

/// Install the requested glyphs in `font`, returning the rebuilt font
/// bytes and a per-request report.
///
/// The output is always an uncompressed TrueType font, serialized once
/// after every request has been attempted.
pub fn patch_font(
    font: &FontRef,
    requests: &[GlyphRequest],
) -> Result<(Vec<u8>, BatchReport), PatchError> {
    cmap::require_unicode_cmap(font)?;
    let units_per_em = font.head()?.units_per_em();
    log::info!("font units per em: {units_per_em}");

    let glyph_names = post::glyph_names(font)?;
    if glyph_names.len() + requests.len() > u16::MAX as usize {
        return Err(PatchError::TooManyGlyphs);
    }

    let mut plan = Plan {
        units_per_em,
        glyph_names,
        replaced: HashMap::new(),
        appended: Vec::new(),
    };
    let mut report = BatchReport::default();
    // names added earlier in this batch, so a later request overwrites
    // rather than appending twice
    let mut appended_by_name: HashMap<String, usize> = HashMap::new();

    for request in requests {
        log::info!(
            "processing {} -> {} (U+{:04X})",
            request.svg_path.display(),
            request.name,
            request.codepoint as u32,
        );
        if !request.svg_path.exists() {
            log::error!("SVG file {} not found", request.svg_path.display());
            report.outcomes.push(Outcome::SkippedMissingFile {
                name: request.name.clone(),
                svg_path: request.svg_path.clone(),
            });
            continue;
        }
        let new_glyph = match build_glyph(request, units_per_em) {
            Ok(glyph) => glyph,
            Err(err) => {
                log::error!("error processing {}: {err}", request.svg_path.display());
                report.outcomes.push(Outcome::Failed {
                    name: request.name.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let (name, advance_width, bbox) = (
            new_glyph.name.clone(),
            new_glyph.advance_width,
            new_glyph.bbox,
        );
        let glyph_id = if let Some(gid) = plan.glyph_names.iter().position(|n| *n == new_glyph.name)
        {
            plan.replaced.insert(gid, new_glyph);
            gid
        } else if let Some(&i) = appended_by_name.get(&new_glyph.name) {
            plan.appended[i] = new_glyph;
            plan.glyph_names.len() + i
        } else {
            appended_by_name.insert(new_glyph.name.clone(), plan.appended.len());
            plan.appended.push(new_glyph);
            plan.num_glyphs() - 1
        };
        log::info!("added glyph '{name}' (bounds: {bbox:?}) with advance width {advance_width}");
        report.outcomes.push(Outcome::Added {
            name,
            glyph_id: glyph_id as u32,
            advance_width,
            bbox,
        });
    }

    let mut builder = FontBuilder::new();
    let loca_format = glyf_loca::rebuild(font, &plan, &mut builder)?;
    head::rebuild(font, &plan, loca_format, &mut builder)?;
    maxp::rebuild(font, &plan, &mut builder)?;
    hmtx::rebuild(font, &plan, &mut builder)?;
    cmap::rebuild(font, &plan, &mut builder)?;
    post::rebuild(font, &plan, &mut builder)?;
    builder.copy_missing_tables(font.clone());
    Ok((builder.build(), report))
}

fn build_glyph(request: &GlyphRequest, units_per_em: u16) -> Result<NewGlyph, RequestError> {
    let raw = std::fs::read(&request.svg_path)?;
    let text = String::from_utf8_lossy(&raw);
    let cleaned = svg::clean_svg_text(&text);
    let view_box = svg::find_view_box(&text);
    // a viewBox without area cannot be scaled into the em
    if let Some(vb) = view_box {
        if vb.width <= 0.0 || vb.height <= 0.0 {
            return Err(RequestError::DegenerateViewBox(vb.width, vb.height));
        }
    }
    let transform = transform::design_transform(
        view_box,
        units_per_em,
        request.advance_width,
        request.x_offset,
    );
    log::info!("using transform: {transform:?}");

    let (glyph, bbox, num_points) = outline::import(&cleaned, transform, units_per_em)?;
    if num_points == 0 {
        log::warn!(
            "no points found in glyph for {}",
            request.svg_path.display()
        );
    }
    let advance_width = if request.advance_width == 0 {
        (units_per_em as f64 * DEFAULT_ADVANCE).round() as u16
    } else {
        request.advance_width
    };
    Ok(NewGlyph {
        name: request.name.clone(),
        codepoint: request.codepoint,
        advance_width,
        glyph,
        bbox,
    })
}
