//! Coarse script classification used for font fallback.
//!
//! A code point is first mapped to its Unicode block through an ordered
//! table of half-open ranges, then the block is mapped to a [`Script`]
//! through fixed membership lists. The first matching entry wins in both
//! steps.

use core::ops::Range;

use serde::{Deserialize, Serialize};

/// Named Unicode blocks known to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnicodeBlock {
    C0Control,
    BasicLatin,
    C1Control,
    Latin1Supplement,
    LatinExtendedA,
    LatinExtendedB,
    IpaExtensions,
    SpacingModifierLetters,
    CombiningDiacriticalMarks,
    GreekAndCoptic,
    Cyrillic,
    CyrillicSupplement,
    Armenian,
    Hebrew,
    Arabic,
    Syriac,
    ArabicSupplement,
    Thaana,
    Nko,
    Samaritan,
    Mandaic,
    SyriacSupplement,
    ArabicExtendedB,
    ArabicExtendedA,
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Oriya,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Sinhala,
    Thai,
    Lao,
    Tibetan,
    Myanmar,
    Georgian,
    HangulJamo,
    Ethiopic,
    EthiopicSupplement,
    Cherokee,
    UnifiedCanadianAboriginalSyllabics,
    Ogham,
    Runic,
    Tagalog,
    Hanunoo,
    Buhid,
    Tagbanwa,
    Khmer,
    Mongolian,
    UnifiedCanadianAboriginalSyllabicsExtended,
    Limbu,
    TaiLe,
    NewTaiLue,
    KhmerSymbols,
    Buginese,
    TaiTham,
    CombiningDiacriticalMarksExtended,
    Balinese,
    Sundanese,
    Batak,
    Lepcha,
    OlChiki,
    CyrillicExtendedC,
    GeorgianExtended,
    SundaneseSupplement,
    VedicExtensions,
    PhoneticExtensions,
    PhoneticExtensionsSupplement,
    CombiningDiacriticalMarksSupplement,
    LatinExtendedAdditional,
    GreekExtended,
    GeneralPunctuation,
    SuperscriptsAndSubscripts,
    CurrencySymbols,
    CombiningDiacriticalMarksForSymbols,
    LetterlikeSymbols,
    NumberForms,
    Arrows,
    MathematicalOperators,
    MiscellaneousTechnical,
    ControlPictures,
    OpticalCharacterRecognition,
    EnclosedAlphanumerics,
    BoxDrawing,
    BlockElements,
    GeometricShapes,
    MiscellaneousSymbols,
    Dingbats,
    MiscellaneousMathematicalSymbolsA,
    SupplementalArrowsA,
    BraillePatterns,
    SupplementalArrowsB,
    MiscellaneousMathematicalSymbolsB,
    SupplementalMathematicalOperators,
    MiscellaneousSymbolsAndArrows,
    Glagolitic,
    LatinExtendedC,
    Coptic,
    GeorgianSupplement,
    Tifinagh,
    EthiopicExtended,
    CyrillicExtendedA,
    SupplementalPunctuation,
    CjkRadicalsSupplement,
    KangxiRadicals,
    IdeographicDescriptionCharacters,
    CjkSymbolsAndPunctuation,
    Hiragana,
    Katakana,
    Bopomofo,
    HangulCompatibilityJamo,
    Kanbun,
    BopomofoExtended,
    CjkStrokes,
    KatakanaPhoneticExtensions,
    EnclosedCjkLettersAndMonths,
    CjkCompatibility,
    CjkUnifiedIdeographsExtensionA,
    YijingHexagramSymbols,
    CjkUnifiedIdeographs,
    YiSyllables,
    YiRadicals,
    Lisu,
    Vai,
    CyrillicExtendedB,
    Bamum,
    ModifierToneLetters,
    LatinExtendedD,
    SylotiNagri,
    CommonIndicNumberForms,
    PhagsPa,
    Saurashtra,
    DevanagariExtended,
    KayahLi,
    Rejang,
    HangulJamoExtendedA,
    Javanese,
    MyanmarExtendedB,
    Cham,
    MyanmarExtendedA,
    TaiViet,
    MeeteiMayekExtensions,
    EthiopicExtendedA,
    LatinExtendedE,
    CherokeeSupplement,
    MeeteiMayek,
    HangulSyllables,
    HangulJamoExtendedB,
    HighSurrogates,
    HighPrivateUseSurrogates,
    LowSurrogates,
    PrivateUseArea,
    CjkCompatibilityIdeographs,
    AlphabeticPresentationForms,
    ArabicPresentationFormsA,
    VariationSelectors,
    VerticalForms,
    CombiningHalfMarks,
    CjkCompatibilityForms,
    SmallFormVariants,
    ArabicPresentationFormsB,
    HalfwidthAndFullwidthForms,
    Specials,
    MiscellaneousSymbolsAndPictographs,
    Emoticons,
    OrnamentalDingbats,
    TransportAndMapSymbols,
    AlchemicalSymbols,
    GeometricShapesExtended,
    SupplementalArrowsC,
    SupplementalSymbolsAndPictographs,
    ChessSymbols,
    SymbolsAndPictographsExtendedA,
    SymbolsForLegacyComputing,
    Unassigned,
}

use UnicodeBlock as B;

/// Ordered block table; lookups scan front to back.
const BLOCKS: &[(Range<u32>, UnicodeBlock)] = &[
    (0x0000..0x0020, B::C0Control),
    (0x0020..0x0080, B::BasicLatin),
    (0x0080..0x00a0, B::C1Control),
    (0x00a0..0x0100, B::Latin1Supplement),
    (0x0100..0x0180, B::LatinExtendedA),
    (0x0180..0x0250, B::LatinExtendedB),
    (0x0250..0x02b0, B::IpaExtensions),
    (0x02b0..0x0300, B::SpacingModifierLetters),
    (0x0300..0x0370, B::CombiningDiacriticalMarks),
    (0x0370..0x0400, B::GreekAndCoptic),
    (0x0400..0x0500, B::Cyrillic),
    (0x0500..0x0530, B::CyrillicSupplement),
    (0x0530..0x0590, B::Armenian),
    (0x0590..0x0600, B::Hebrew),
    (0x0600..0x0700, B::Arabic),
    (0x0700..0x0750, B::Syriac),
    (0x0750..0x0780, B::ArabicSupplement),
    (0x0780..0x07c0, B::Thaana),
    (0x07c0..0x0800, B::Nko),
    (0x0800..0x0840, B::Samaritan),
    (0x0840..0x0860, B::Mandaic),
    (0x0860..0x0870, B::SyriacSupplement),
    (0x0870..0x08a0, B::ArabicExtendedB),
    (0x08a0..0x0900, B::ArabicExtendedA),
    (0x0900..0x0980, B::Devanagari),
    (0x0980..0x0a00, B::Bengali),
    (0x0a00..0x0a80, B::Gurmukhi),
    (0x0a80..0x0b00, B::Gujarati),
    (0x0b00..0x0b80, B::Oriya),
    (0x0b80..0x0c00, B::Tamil),
    (0x0c00..0x0c80, B::Telugu),
    (0x0c80..0x0d00, B::Kannada),
    (0x0d00..0x0d80, B::Malayalam),
    (0x0d80..0x0e00, B::Sinhala),
    (0x0e00..0x0e80, B::Thai),
    (0x0e80..0x0f00, B::Lao),
    (0x0f00..0x1000, B::Tibetan),
    (0x1000..0x10a0, B::Myanmar),
    (0x10a0..0x1100, B::Georgian),
    (0x1100..0x1200, B::HangulJamo),
    (0x1200..0x1380, B::Ethiopic),
    (0x1380..0x13a0, B::EthiopicSupplement),
    (0x13a0..0x1400, B::Cherokee),
    (0x1400..0x1680, B::UnifiedCanadianAboriginalSyllabics),
    (0x1680..0x16a0, B::Ogham),
    (0x16a0..0x1700, B::Runic),
    (0x1700..0x1720, B::Tagalog),
    (0x1720..0x1740, B::Hanunoo),
    (0x1740..0x1760, B::Buhid),
    (0x1760..0x1780, B::Tagbanwa),
    (0x1780..0x1800, B::Khmer),
    (0x1800..0x18b0, B::Mongolian),
    (0x18b0..0x1900, B::UnifiedCanadianAboriginalSyllabicsExtended),
    (0x1900..0x1950, B::Limbu),
    (0x1950..0x1980, B::TaiLe),
    (0x1980..0x19e0, B::NewTaiLue),
    (0x19e0..0x1a00, B::KhmerSymbols),
    (0x1a00..0x1a20, B::Buginese),
    (0x1a20..0x1ab0, B::TaiTham),
    (0x1ab0..0x1b00, B::CombiningDiacriticalMarksExtended),
    (0x1b00..0x1b80, B::Balinese),
    (0x1b80..0x1bc0, B::Sundanese),
    (0x1bc0..0x1c00, B::Batak),
    (0x1c00..0x1c50, B::Lepcha),
    (0x1c50..0x1c80, B::OlChiki),
    (0x1c80..0x1c90, B::CyrillicExtendedC),
    (0x1c90..0x1cc0, B::GeorgianExtended),
    (0x1cc0..0x1cd0, B::SundaneseSupplement),
    (0x1cd0..0x1d00, B::VedicExtensions),
    (0x1d00..0x1d80, B::PhoneticExtensions),
    (0x1d80..0x1dc0, B::PhoneticExtensionsSupplement),
    (0x1dc0..0x1e00, B::CombiningDiacriticalMarksSupplement),
    (0x1e00..0x1f00, B::LatinExtendedAdditional),
    (0x1f00..0x2000, B::GreekExtended),
    (0x2000..0x2070, B::GeneralPunctuation),
    (0x2070..0x20a0, B::SuperscriptsAndSubscripts),
    (0x20a0..0x20d0, B::CurrencySymbols),
    (0x20d0..0x2100, B::CombiningDiacriticalMarksForSymbols),
    (0x2100..0x2150, B::LetterlikeSymbols),
    (0x2150..0x2190, B::NumberForms),
    (0x2190..0x2200, B::Arrows),
    (0x2200..0x2300, B::MathematicalOperators),
    (0x2300..0x2400, B::MiscellaneousTechnical),
    (0x2400..0x2440, B::ControlPictures),
    (0x2440..0x2460, B::OpticalCharacterRecognition),
    (0x2460..0x2500, B::EnclosedAlphanumerics),
    (0x2500..0x2580, B::BoxDrawing),
    (0x2580..0x25a0, B::BlockElements),
    (0x25a0..0x2600, B::GeometricShapes),
    (0x2600..0x2700, B::MiscellaneousSymbols),
    (0x2700..0x27c0, B::Dingbats),
    (0x27c0..0x27f0, B::MiscellaneousMathematicalSymbolsA),
    (0x27f0..0x2800, B::SupplementalArrowsA),
    (0x2800..0x2900, B::BraillePatterns),
    (0x2900..0x2980, B::SupplementalArrowsB),
    (0x2980..0x2a00, B::MiscellaneousMathematicalSymbolsB),
    (0x2a00..0x2b00, B::SupplementalMathematicalOperators),
    (0x2b00..0x2c00, B::MiscellaneousSymbolsAndArrows),
    (0x2c00..0x2c60, B::Glagolitic),
    (0x2c60..0x2c80, B::LatinExtendedC),
    (0x2c80..0x2d00, B::Coptic),
    (0x2d00..0x2d30, B::GeorgianSupplement),
    (0x2d30..0x2d80, B::Tifinagh),
    (0x2d80..0x2de0, B::EthiopicExtended),
    (0x2de0..0x2e00, B::CyrillicExtendedA),
    (0x2e00..0x2e80, B::SupplementalPunctuation),
    (0x2e80..0x2f00, B::CjkRadicalsSupplement),
    (0x2f00..0x2fe0, B::KangxiRadicals),
    (0x2ff0..0x3000, B::IdeographicDescriptionCharacters),
    (0x3000..0x3040, B::CjkSymbolsAndPunctuation),
    (0x3040..0x30a0, B::Hiragana),
    (0x30a0..0x3100, B::Katakana),
    (0x3100..0x3130, B::Bopomofo),
    (0x3130..0x3190, B::HangulCompatibilityJamo),
    (0x3190..0x31a0, B::Kanbun),
    (0x31a0..0x31c0, B::BopomofoExtended),
    (0x31c0..0x31f0, B::CjkStrokes),
    (0x31f0..0x3200, B::KatakanaPhoneticExtensions),
    (0x3200..0x3300, B::EnclosedCjkLettersAndMonths),
    (0x3300..0x3400, B::CjkCompatibility),
    (0x3400..0x4dc0, B::CjkUnifiedIdeographsExtensionA),
    (0x4dc0..0x4e00, B::YijingHexagramSymbols),
    (0x4e00..0xa000, B::CjkUnifiedIdeographs),
    (0xa000..0xa490, B::YiSyllables),
    (0xa490..0xa4d0, B::YiRadicals),
    (0xa4d0..0xa500, B::Lisu),
    (0xa500..0xa640, B::Vai),
    (0xa640..0xa6a0, B::CyrillicExtendedB),
    (0xa6a0..0xa700, B::Bamum),
    (0xa700..0xa720, B::ModifierToneLetters),
    (0xa720..0xa800, B::LatinExtendedD),
    (0xa800..0xa830, B::SylotiNagri),
    (0xa830..0xa840, B::CommonIndicNumberForms),
    (0xa840..0xa880, B::PhagsPa),
    (0xa880..0xa8e0, B::Saurashtra),
    (0xa8e0..0xa900, B::DevanagariExtended),
    (0xa900..0xa930, B::KayahLi),
    (0xa930..0xa960, B::Rejang),
    (0xa960..0xa980, B::HangulJamoExtendedA),
    (0xa980..0xa9e0, B::Javanese),
    (0xa9e0..0xaa00, B::MyanmarExtendedB),
    (0xaa00..0xaa60, B::Cham),
    (0xaa60..0xaa80, B::MyanmarExtendedA),
    (0xaa80..0xaae0, B::TaiViet),
    (0xaae0..0xab00, B::MeeteiMayekExtensions),
    (0xab00..0xab30, B::EthiopicExtendedA),
    (0xab30..0xab70, B::LatinExtendedE),
    (0xab70..0xabc0, B::CherokeeSupplement),
    (0xabc0..0xac00, B::MeeteiMayek),
    (0xac00..0xd7b0, B::HangulSyllables),
    (0xd7b0..0xd800, B::HangulJamoExtendedB),
    (0xd800..0xdb80, B::HighSurrogates),
    (0xdb80..0xdc00, B::HighPrivateUseSurrogates),
    (0xdc00..0xe000, B::LowSurrogates),
    (0xe000..0xf900, B::PrivateUseArea),
    (0xf900..0xfb00, B::CjkCompatibilityIdeographs),
    (0xfb00..0xfb50, B::AlphabeticPresentationForms),
    (0xfb50..0xfe00, B::ArabicPresentationFormsA),
    (0xfe00..0xfe10, B::VariationSelectors),
    (0xfe10..0xfe20, B::VerticalForms),
    (0xfe20..0xfe30, B::CombiningHalfMarks),
    (0xfe30..0xfe50, B::CjkCompatibilityForms),
    (0xfe50..0xfe70, B::SmallFormVariants),
    (0xfe70..0xff00, B::ArabicPresentationFormsB),
    (0xff00..0xfff0, B::HalfwidthAndFullwidthForms),
    (0xfff0..0x10000, B::Specials),
    (0x1f300..0x1f600, B::MiscellaneousSymbolsAndPictographs),
    (0x1f600..0x1f650, B::Emoticons),
    (0x1f650..0x1f680, B::OrnamentalDingbats),
    (0x1f680..0x1f700, B::TransportAndMapSymbols),
    (0x1f700..0x1f780, B::AlchemicalSymbols),
    (0x1f780..0x1f800, B::GeometricShapesExtended),
    (0x1f800..0x1f900, B::SupplementalArrowsC),
    (0x1f900..0x1fa00, B::SupplementalSymbolsAndPictographs),
    (0x1fa00..0x1fa70, B::ChessSymbols),
    (0x1fa70..0x1fb00, B::SymbolsAndPictographsExtendedA),
    (0x1fb00..0x1fc00, B::SymbolsForLegacyComputing),
    (0x1ff80..0x20000, B::Unassigned),
];

impl UnicodeBlock {
    /// Find the block containing `ch`, if it is in the table.
    pub fn of(ch: char) -> Option<UnicodeBlock> {
        let value = ch as u32;
        BLOCKS
            .iter()
            .find(|(range, _)| range.contains(&value))
            .map(|(_, block)| *block)
    }

    /// Code point range covered by this block.
    pub fn range(self) -> Option<Range<u32>> {
        BLOCKS
            .iter()
            .find(|(_, block)| *block == self)
            .map(|(range, _)| range.clone())
    }
}

/// Typographic script category used to pick fallback fonts.
///
/// Declaration order is the enumeration order used when flattening the
/// per-script font lists into font ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Latin,
    Japanese,
    Emoji,
}

impl Script {
    /// All scripts in enumeration order.
    pub const ALL: [Script; 3] = [Script::Latin, Script::Japanese, Script::Emoji];

    /// Classify a character, returning `None` when no script claims its block.
    pub fn of(ch: char) -> Option<Script> {
        let block = UnicodeBlock::of(ch)?;
        Self::ALL
            .into_iter()
            .find(|script| script.blocks().contains(&block))
    }

    /// Blocks that belong to this script.
    pub fn blocks(self) -> &'static [UnicodeBlock] {
        match self {
            Script::Latin => &[B::BasicLatin],
            Script::Japanese => &[
                B::CjkCompatibility,
                B::CjkCompatibilityForms,
                B::CjkCompatibilityIdeographs,
                B::CjkRadicalsSupplement,
                B::CjkStrokes,
                B::CjkSymbolsAndPunctuation,
                B::CjkUnifiedIdeographs,
                B::CjkUnifiedIdeographsExtensionA,
                B::EnclosedCjkLettersAndMonths,
                B::HalfwidthAndFullwidthForms,
                B::Hiragana,
                B::Katakana,
                B::KatakanaPhoneticExtensions,
            ],
            Script::Emoji => &[
                B::Dingbats,
                B::Emoticons,
                B::MiscellaneousSymbols,
                B::MiscellaneousSymbolsAndPictographs,
                B::SupplementalSymbolsAndPictographs,
                B::SymbolsAndPictographsExtendedA,
                B::TransportAndMapSymbols,
            ],
        }
    }

    /// Scripts set upright in vertical writing; everything else is rotated
    /// a quarter turn clockwise.
    pub fn is_upright_in_vertical(self) -> bool {
        matches!(self, Script::Japanese | Script::Emoji)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_core_scripts() {
        assert_eq!(Script::of('A'), Some(Script::Latin));
        assert_eq!(Script::of(' '), Some(Script::Latin));
        assert_eq!(Script::of('あ'), Some(Script::Japanese));
        assert_eq!(Script::of('カ'), Some(Script::Japanese));
        assert_eq!(Script::of('漢'), Some(Script::Japanese));
        assert_eq!(Script::of('、'), Some(Script::Japanese));
        assert_eq!(Script::of('＜'), Some(Script::Japanese));
        assert_eq!(Script::of('😀'), Some(Script::Emoji));
        assert_eq!(Script::of('✂'), Some(Script::Emoji));
    }

    #[test]
    fn unclaimed_blocks_have_no_script() {
        assert_eq!(Script::of('\n'), None);
        assert_eq!(Script::of('é'), None);
        assert_eq!(Script::of('Ж'), None);
        assert_eq!(Script::of('\u{10000}'), None);
    }

    #[test]
    fn block_lookup_is_half_open() {
        assert_eq!(UnicodeBlock::of('\u{7f}'), Some(UnicodeBlock::BasicLatin));
        assert_eq!(UnicodeBlock::of('\u{80}'), Some(UnicodeBlock::C1Control));
        assert_eq!(UnicodeBlock::of('\u{3040}'), Some(UnicodeBlock::Hiragana));
        assert_eq!(UnicodeBlock::Hiragana.range(), Some(0x3040..0x30a0));
    }

    #[test]
    fn rotation_exemption() {
        assert!(!Script::Latin.is_upright_in_vertical());
        assert!(Script::Japanese.is_upright_in_vertical());
        assert!(Script::Emoji.is_upright_in_vertical());
    }
}
