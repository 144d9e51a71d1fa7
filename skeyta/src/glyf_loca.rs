//! Rebuilding 'glyf' and 'loca' with the new outlines in place.

use write_fonts::{
    from_obj::FromTableRef,
    read::{FontRef, TableProvider, TopLevelTable},
    tables::{
        glyf::{Glyf, GlyfLocaBuilder, Glyph},
        loca::LocaFormat,
    },
    types::GlyphId,
    FontBuilder,
};

use crate::{PatchError, Plan};

/// Rebuild 'glyf' and 'loca', carrying every existing glyph over and
/// placing the new outlines at their assigned glyph ids.
///
/// A font without 'glyf'/'loca' (both tables are created from scratch)
/// contributes empty outlines for its existing glyph ids.
pub(crate) fn rebuild(
    font: &FontRef,
    plan: &Plan,
    builder: &mut FontBuilder,
) -> Result<LocaFormat, PatchError> {
    let existing = font.loca(None).ok().zip(font.glyf().ok());
    let mut glyphs = GlyfLocaBuilder::new();

    for gid in 0..plan.glyph_names.len() {
        if let Some(new) = plan.replaced.get(&gid) {
            add_glyph(&mut glyphs, &new.glyph)?;
            continue;
        }
        let glyph = match &existing {
            Some((loca, glyf)) => loca
                .get_glyf(GlyphId::new(gid as u32), glyf)?
                .map(|glyph| Glyph::from_table_ref(&glyph))
                .unwrap_or(Glyph::Empty),
            None => Glyph::Empty,
        };
        add_glyph(&mut glyphs, &glyph)?;
    }
    for new in &plan.appended {
        add_glyph(&mut glyphs, &new.glyph)?;
    }

    let (glyf, loca, format) = glyphs.build();
    builder.add_table(&glyf)?;
    builder.add_table(&loca)?;
    Ok(format)
}

fn add_glyph(glyphs: &mut GlyfLocaBuilder, glyph: &Glyph) -> Result<(), PatchError> {
    glyphs
        .add_glyph(glyph)
        .map_err(|e| PatchError::Table(Glyf::TAG, e.to_string()))?;
    Ok(())
}
