//! Glyph names: reading the existing order, appending the new names.

use write_fonts::{
    read::{FontRef, TableProvider},
    tables::post::Post,
    types::GlyphId16,
    FontBuilder,
};

use crate::{PatchError, Plan};

/// Names for the glyphs already in the font, in glyph id order.
///
/// A version 2 'post' table provides real names; anything else gets the
/// synthesized `gidN` form.
pub(crate) fn glyph_names(font: &FontRef) -> Result<Vec<String>, PatchError> {
    let num_glyphs = font.maxp()?.num_glyphs();
    let post = font.post().ok();
    Ok((0..num_glyphs)
        .map(|gid| {
            post.as_ref()
                .and_then(|post| post.glyph_name(GlyphId16::new(gid)))
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .unwrap_or_else(|| format!("gid{gid}"))
        })
        .collect())
}

/// Rebuild 'post' as version 2 with the full name order: existing names
/// first (replaced glyphs keep their position), appended names last.
///
/// The font-wide fields of an existing 'post' (italic angle, underline
/// metrics, fixed pitch flag) are carried over.
pub(crate) fn rebuild(
    font: &FontRef,
    plan: &Plan,
    builder: &mut FontBuilder,
) -> Result<(), PatchError> {
    let names = plan
        .glyph_names
        .iter()
        .map(String::as_str)
        .chain(plan.appended.iter().map(|new| new.name.as_str()));
    let mut post = Post::new_v2(names);
    if let Ok(existing) = font.post() {
        post.italic_angle = existing.italic_angle();
        post.underline_position = existing.underline_position();
        post.underline_thickness = existing.underline_thickness();
        post.is_fixed_pitch = existing.is_fixed_pitch();
    }
    builder.add_table(&post)?;
    Ok(())
}
