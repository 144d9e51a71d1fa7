//! Rebuilding 'hmtx' with one long metric per glyph, and updating 'hhea'
//! to match.

use write_fonts::{
    from_obj::FromTableRef,
    read::{FontRef, TableProvider},
    tables::{
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
    },
    types::{GlyphId, UfWord},
    FontBuilder,
};

use crate::{PatchError, Plan};

/// Left side bearing stored for every new glyph.
const NEW_GLYPH_LSB: i16 = 0;

pub(crate) fn rebuild(
    font: &FontRef,
    plan: &Plan,
    builder: &mut FontBuilder,
) -> Result<(), PatchError> {
    let existing = font.hmtx().ok();
    let mut metrics = Vec::with_capacity(plan.num_glyphs());
    for gid in 0..plan.glyph_names.len() {
        if let Some(new) = plan.replaced.get(&gid) {
            metrics.push(LongMetric {
                advance: new.advance_width,
                side_bearing: NEW_GLYPH_LSB,
            });
            continue;
        }
        let (advance, side_bearing) = match &existing {
            Some(hmtx) => {
                let gid = GlyphId::new(gid as u32);
                (
                    hmtx.advance(gid).unwrap_or_default(),
                    hmtx.side_bearing(gid).unwrap_or_default(),
                )
            }
            None => (0, 0),
        };
        metrics.push(LongMetric {
            advance,
            side_bearing,
        });
    }
    for new in &plan.appended {
        metrics.push(LongMetric {
            advance: new.advance_width,
            side_bearing: NEW_GLYPH_LSB,
        });
    }

    let advance_width_max = metrics.iter().map(|m| m.advance).max().unwrap_or_default();
    let hmtx = Hmtx {
        h_metrics: metrics,
        left_side_bearings: Vec::new(),
    };
    builder.add_table(&hmtx)?;

    let mut hhea = Hhea::from_table_ref(&font.hhea()?);
    hhea.number_of_h_metrics = plan.num_glyphs() as u16;
    hhea.advance_width_max = UfWord::new(advance_width_max);
    builder.add_table(&hhea)?;
    Ok(())
}
