//! Unicode character map: precondition check and rebuild.

use std::collections::BTreeMap;

use write_fonts::{
    read::{
        tables::cmap::{CmapSubtable, PlatformId},
        FontRef, TableProvider, TopLevelTable,
    },
    tables::cmap::Cmap,
    types::GlyphId,
    FontBuilder,
};

use crate::{PatchError, Plan};

const WINDOWS_BMP_ENCODING: u16 = 1;
const WINDOWS_FULL_REPERTOIRE_ENCODING: u16 = 10;

fn is_unicode(platform: PlatformId, encoding: u16) -> bool {
    match platform {
        PlatformId::Unicode => true,
        PlatformId::Windows => matches!(
            encoding,
            WINDOWS_BMP_ENCODING | WINDOWS_FULL_REPERTOIRE_ENCODING
        ),
        _ => false,
    }
}

/// A font without any Unicode mapping cannot host the new codepoints;
/// the whole run is refused before any request is processed.
pub(crate) fn require_unicode_cmap(font: &FontRef) -> Result<(), PatchError> {
    let cmap = font.cmap().map_err(|_| PatchError::NoUnicodeCmap)?;
    cmap.encoding_records()
        .iter()
        .any(|record| is_unicode(record.platform_id(), record.encoding_id()))
        .then_some(())
        .ok_or(PatchError::NoUnicodeCmap)
}

/// Rebuild 'cmap' from the font's existing Unicode mappings plus one
/// mapping per new glyph.
///
/// New mappings win over existing ones for the same codepoint, and a
/// later request wins over an earlier one. The rebuilt table carries
/// format 4 and (when needed) format 12 subtables for the Unicode and
/// Windows platforms; mappings in other subtable formats are not
/// carried over.
pub(crate) fn rebuild(
    font: &FontRef,
    plan: &Plan,
    builder: &mut FontBuilder,
) -> Result<(), PatchError> {
    let cmap = font.cmap()?;
    let mut mappings: BTreeMap<char, GlyphId> = BTreeMap::new();
    for record in cmap.encoding_records() {
        if !is_unicode(record.platform_id(), record.encoding_id()) {
            continue;
        }
        let Ok(subtable) = record.subtable(cmap.offset_data()) else {
            continue;
        };
        match subtable {
            CmapSubtable::Format4(subtable) => {
                for (codepoint, gid) in subtable.iter() {
                    if let Some(c) = char::from_u32(codepoint) {
                        mappings.entry(c).or_insert(gid);
                    }
                }
            }
            CmapSubtable::Format12(subtable) => {
                for (codepoint, gid) in subtable.iter() {
                    if let Some(c) = char::from_u32(codepoint) {
                        mappings.entry(c).or_insert(gid);
                    }
                }
            }
            _ => (),
        }
    }
    for (gid, new) in plan.new_glyphs() {
        mappings.insert(new.codepoint, GlyphId::new(gid as u32));
    }

    let cmap = Cmap::from_mappings(mappings)
        .map_err(|e| PatchError::Table(Cmap::TAG, e.to_string()))?;
    builder.add_table(&cmap)?;
    Ok(())
}
