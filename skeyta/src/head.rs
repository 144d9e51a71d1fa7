//! Updating 'head' for the rebuilt 'loca' and the new font bounds.

use write_fonts::{
    from_obj::FromTableRef,
    read::{FontRef, TableProvider},
    tables::{head::Head, loca::LocaFormat},
    FontBuilder,
};

use crate::{PatchError, Plan};

pub(crate) fn rebuild(
    font: &FontRef,
    plan: &Plan,
    loca_format: LocaFormat,
    builder: &mut FontBuilder,
) -> Result<(), PatchError> {
    let mut head = Head::from_table_ref(&font.head()?);
    head.index_to_loc_format = match loca_format {
        LocaFormat::Short => 0,
        LocaFormat::Long => 1,
    };
    for (_, new) in plan.new_glyphs() {
        if let Some(bbox) = new.bbox {
            head.x_min = head.x_min.min(bbox.x_min);
            head.y_min = head.y_min.min(bbox.y_min);
            head.x_max = head.x_max.max(bbox.x_max);
            head.y_max = head.y_max.max(bbox.y_max);
        }
    }
    builder.add_table(&head)?;
    Ok(())
}
