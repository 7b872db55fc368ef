use crate::font::GlyphId;
use crate::gsub::{GsubError, Result, TableReader, tag_name};

const KANA: [u8; 4] = *b"kana";

/// Vertical-writing features, in the order they are tried.
pub const VERTICAL_FEATURES: [[u8; 4]; 3] = [*b"vrt2", *b"vert", *b"vkna"];

const SINGLE: u16 = 1;
const ALTERNATE: u16 = 3;
const EXTENSION: u16 = 7;

/// The three lists of a GSUB table, ready to walk.
#[derive(Debug, Clone, Copy)]
pub struct GsubTable<'a> {
    script_list: TableReader<'a>,
    feature_list: TableReader<'a>,
    lookup_list: TableReader<'a>,
}

impl<'a> GsubTable<'a> {
    /// Read the header: a 4-byte version followed by the ScriptList,
    /// FeatureList and LookupList offsets.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let root = TableReader::new(data);
        Ok(Self {
            script_list: root.subtable_at_u16(4)?,
            feature_list: root.subtable_at_u16(6)?,
            lookup_list: root.subtable_at_u16(8)?,
        })
    }

    /// Vertical alternate for `glyph` from the `kana` script.
    ///
    /// Features are tried in [`VERTICAL_FEATURES`] order; a feature whose
    /// walk fails is logged and the next one is tried. Script-level
    /// failures are returned.
    pub fn vertical_substitute(&self, glyph: GlyphId) -> Result<Option<GlyphId>> {
        let lang_sys = self.default_lang_sys(KANA)?;
        for feature in VERTICAL_FEATURES {
            match self.feature_substitute(lang_sys, feature, glyph) {
                Ok(Some(substitute)) => return Ok(Some(substitute)),
                Ok(None) => {}
                Err(err) => tracing::debug!(
                    feature = %tag_name(feature),
                    glyph,
                    %err,
                    "GSUB feature walk failed"
                ),
            }
        }
        Ok(None)
    }

    fn default_lang_sys(&self, script: [u8; 4]) -> Result<TableReader<'a>> {
        let count = self.script_list.u16_at(0)? as usize;
        let mut found = false;
        for i in 0..count {
            let record = 2 + i * 6;
            if self.script_list.tag_at(record)? != script {
                continue;
            }
            found = true;
            let table = self.script_list.subtable_at_u16(record + 4)?;
            let offset = table.u16_at(0)?;
            if offset != 0 {
                return table.subtable(offset as usize);
            }
        }
        if found {
            Err(GsubError::NoDefaultLangSys)
        } else {
            Err(GsubError::MissingScript(tag_name(script)))
        }
    }

    /// Walk the first feature record tagged `feature` that the language
    /// system references. Later records with the same tag are ignored.
    pub fn feature_substitute(
        &self,
        lang_sys: TableReader<'a>,
        feature: [u8; 4],
        glyph: GlyphId,
    ) -> Result<Option<GlyphId>> {
        // LookupOrder and ReqFeatureIndex precede the feature index list.
        let count = lang_sys.u16_at(4)? as usize;
        for i in 0..count {
            let feature_index = lang_sys.u16_in_array(6, i)? as usize;
            let record = 2 + feature_index * 6;
            if self.feature_list.tag_at(record)? != feature {
                continue;
            }

            let table = self.feature_list.subtable_at_u16(record + 4)?;
            let lookup_count = table.u16_at(2)? as usize;
            for j in 0..lookup_count {
                let lookup_index = table.u16_in_array(4, j)? as usize;
                if let Some(substitute) = self.lookup_substitute(lookup_index, glyph)? {
                    return Ok(Some(substitute));
                }
            }
            return Ok(None);
        }
        Ok(None)
    }

    fn lookup_substitute(&self, index: usize, glyph: GlyphId) -> Result<Option<GlyphId>> {
        let offset = self.lookup_list.u16_in_array(2, index)?;
        let lookup = self.lookup_list.subtable(offset as usize)?;
        let kind = lookup.u16_at(0)?;
        let subtables = lookup.u16_at(4)? as usize;
        for k in 0..subtables {
            let offset = lookup.u16_in_array(6, k)?;
            let subtable = lookup.subtable(offset as usize)?;
            match substitute_in_subtable(kind, subtable, glyph, false)? {
                Some(substitute) if substitute != 0 => return Ok(Some(substitute)),
                _ => {}
            }
        }
        Ok(None)
    }
}

fn substitute_in_subtable(
    kind: u16,
    subtable: TableReader<'_>,
    glyph: GlyphId,
    in_extension: bool,
) -> Result<Option<GlyphId>> {
    match kind {
        SINGLE => {
            let format = subtable.u16_at(0)?;
            let Some(index) = coverage_index(subtable.subtable_at_u16(2)?, glyph)? else {
                return Ok(None);
            };
            match format {
                2 => {
                    let count = subtable.u16_at(4)? as usize;
                    if index >= count {
                        return Err(GsubError::IndexOutOfRange { index, count });
                    }
                    subtable.u16_in_array(6, index).map(Some)
                }
                format => Err(GsubError::UnsupportedFormat {
                    what: "single substitution",
                    format,
                }),
            }
        }
        ALTERNATE => {
            let Some(index) = coverage_index(subtable.subtable_at_u16(2)?, glyph)? else {
                return Ok(None);
            };
            let count = subtable.u16_at(4)? as usize;
            if index >= count {
                return Err(GsubError::IndexOutOfRange { index, count });
            }
            let offset = subtable.u16_in_array(6, index)?;
            let set = subtable.subtable(offset as usize)?;
            if set.u16_at(0)? == 0 {
                return Ok(None);
            }
            set.u16_at(2).map(Some)
        }
        EXTENSION => {
            if in_extension {
                return Err(GsubError::NestedExtension);
            }
            let real_kind = subtable.u16_at(2)?;
            let offset = subtable.u32_at(4)?;
            let real = subtable.subtable(offset as usize)?;
            substitute_in_subtable(real_kind, real, glyph, true)
        }
        _ => Ok(None),
    }
}

/// Coverage index of `glyph`, or `None` if the table does not cover it.
fn coverage_index(coverage: TableReader<'_>, glyph: GlyphId) -> Result<Option<usize>> {
    let format = coverage.u16_at(0)?;
    let count = coverage.u16_at(2)? as usize;
    match format {
        1 => {
            for i in 0..count {
                if coverage.u16_in_array(4, i)? == glyph {
                    return Ok(Some(i));
                }
            }
            Ok(None)
        }
        2 => {
            for i in 0..count {
                let record = 4 + i * 6;
                let start = coverage.u16_at(record)?;
                let end = coverage.u16_at(record + 2)?;
                if (start..=end).contains(&glyph) {
                    let start_index = coverage.u16_at(record + 4)? as usize;
                    return Ok(Some(start_index + (glyph - start) as usize));
                }
            }
            Ok(None)
        }
        format => Err(GsubError::UnsupportedFormat {
            what: "coverage",
            format,
        }),
    }
}
