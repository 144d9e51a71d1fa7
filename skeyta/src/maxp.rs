//! Updating 'maxp' for the new glyph count.

use write_fonts::{
    from_obj::FromTableRef,
    read::{FontRef, TableProvider},
    tables::{glyf::Glyph, maxp::Maxp},
    FontBuilder,
};

use crate::{PatchError, Plan};

pub(crate) fn rebuild(
    font: &FontRef,
    plan: &Plan,
    builder: &mut FontBuilder,
) -> Result<(), PatchError> {
    let mut maxp = Maxp::from_table_ref(&font.maxp()?);
    maxp.num_glyphs = plan.num_glyphs() as u16;
    // a version 0.5 maxp carries no profile fields to update
    for (_, new) in plan.new_glyphs() {
        let Glyph::Simple(glyph) = &new.glyph else {
            continue;
        };
        let points = clamp_to_u16(glyph.contours.iter().map(|c| c.len()).sum());
        let contours = clamp_to_u16(glyph.contours.len());
        if let Some(max_points) = maxp.max_points.as_mut() {
            *max_points = (*max_points).max(points);
        }
        if let Some(max_contours) = maxp.max_contours.as_mut() {
            *max_contours = (*max_contours).max(contours);
        }
    }
    builder.add_table(&maxp)?;
    Ok(())
}

// the profile fields are u16; a pathological outline must saturate
// rather than wrap
fn clamp_to_u16(count: usize) -> u16 {
    count.try_into().unwrap_or(u16::MAX)
}
