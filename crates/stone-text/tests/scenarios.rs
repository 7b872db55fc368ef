use std::sync::Arc;

use anyhow::{Context as _, Result};
use stone_text::font::fixed_glyph;
use stone_text::{
    Context, Direction, FixedBackend, FixedFont, FontManager, PunctuationMode, Script, Size,
    TextAlign, TextConfig, VerticalSubstitutions, Visibility,
};

fn push16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// GSUB table with one `kana` script whose `vrt2` feature runs a single
/// substitution (format 2) over a format 1 coverage list.
fn vrt2_table(pairs: &[(u16, u16)]) -> Vec<u8> {
    let mut script_list = Vec::new();
    push16(&mut script_list, 1);
    script_list.extend_from_slice(b"kana");
    push16(&mut script_list, 8);
    push16(&mut script_list, 4);
    push16(&mut script_list, 0);
    push16(&mut script_list, 0);
    push16(&mut script_list, 0xffff);
    push16(&mut script_list, 1);
    push16(&mut script_list, 0);

    let mut feature_list = Vec::new();
    push16(&mut feature_list, 1);
    feature_list.extend_from_slice(b"vrt2");
    push16(&mut feature_list, 8);
    push16(&mut feature_list, 0);
    push16(&mut feature_list, 1);
    push16(&mut feature_list, 0);

    let mut subtable = Vec::new();
    push16(&mut subtable, 2);
    push16(&mut subtable, (6 + pairs.len() * 2) as u16);
    push16(&mut subtable, pairs.len() as u16);
    pairs.iter().for_each(|&(_, to)| push16(&mut subtable, to));
    push16(&mut subtable, 1);
    push16(&mut subtable, pairs.len() as u16);
    pairs.iter().for_each(|&(from, _)| push16(&mut subtable, from));

    let mut lookup_list = Vec::new();
    push16(&mut lookup_list, 1);
    push16(&mut lookup_list, 4);
    push16(&mut lookup_list, 1);
    push16(&mut lookup_list, 0);
    push16(&mut lookup_list, 1);
    push16(&mut lookup_list, 8);
    lookup_list.extend(subtable);

    let script_at = 10;
    let feature_at = script_at + script_list.len();
    let lookup_at = feature_at + feature_list.len();
    let mut out = vec![0, 1, 0, 0];
    push16(&mut out, script_at as u16);
    push16(&mut out, feature_at as u16);
    push16(&mut out, lookup_at as u16);
    out.extend(script_list);
    out.extend(feature_list);
    out.extend(lookup_list);
    out
}

fn japanese_font() -> FixedFont {
    FixedFont::new()
        .covering('\u{3000}'..='\u{30ff}')
        .covering('\u{4e00}'..='\u{9fff}')
        .covering('\u{fe10}'..='\u{fe4f}')
        .covering('\u{ff00}'..='\u{ffef}')
}

fn context(backend: FixedBackend, config: TextConfig, size: Size) -> Context {
    Context::with_config(Arc::new(backend), config).with_render_size(size)
}

fn vertical() -> TextConfig {
    TextConfig {
        direction: Direction::Vertical,
        ..TextConfig::default()
    }
}

#[test]
fn gsub_single_substitution_through_the_cache() -> Result<()> {
    let backend = FixedBackend::new().with_font(
        "HiraginoSans-W3",
        japanese_font().with_table(*b"GSUB", vrt2_table(&[(5, 42)])),
    );
    let fonts = FontManager::new();
    let font_id = fonts
        .font_names(Script::Japanese)
        .iter()
        .position(|name| &**name == "HiraginoSans-W3")
        .context("japanese font missing from the stock list")?;
    // Latin has one stock font, so Japanese ids start right after it.
    let handle = fonts.font_handle(font_id + 1, 17.0, false);
    assert_eq!(&*handle.name, "HiraginoSans-W3");

    let substitutions = VerticalSubstitutions::new();
    assert_eq!(substitutions.vertical_substitute(&backend, &handle, 5), Some(42));
    assert_eq!(substitutions.vertical_substitute(&backend, &handle, 6), None);
    // Answers are cached per font.
    assert_eq!(substitutions.vertical_substitute(&backend, &handle, 5), Some(42));
    assert_eq!(substitutions.len(), 1);
    Ok(())
}

#[test]
fn vertical_parse_uses_gsub_forms() {
    let a = fixed_glyph('あ');
    let backend = FixedBackend::with_default_fonts().with_font(
        "HiraginoSans-W3",
        japanese_font().with_table(*b"GSUB", vrt2_table(&[(a, 42)])),
    );

    let mut ctx = context(backend.clone(), vertical(), Size::new(100.0, 100.0));
    ctx.parse("あい");
    assert_eq!(ctx.runs()[0].glyph, 42);
    assert_eq!(ctx.runs()[1].glyph, fixed_glyph('い'));

    // Horizontal text keeps the nominal glyph.
    let mut ctx = context(backend, TextConfig::default(), Size::new(100.0, 100.0));
    ctx.parse("あい");
    assert_eq!(ctx.runs()[0].glyph, a);
}

#[test]
fn shared_substitution_cache() {
    let backend = FixedBackend::with_default_fonts();
    let shared = Arc::new(VerticalSubstitutions::new());
    let mut first = context(backend.clone(), vertical(), Size::new(100.0, 100.0))
        .with_substitutions(shared.clone());
    let mut second =
        context(backend, vertical(), Size::new(100.0, 100.0)).with_substitutions(shared.clone());

    first.parse("＜");
    second.parse("－");
    assert_eq!(first.runs()[0].glyph, fixed_glyph('︿'));
    assert_eq!(second.runs()[0].glyph, fixed_glyph('｜'));
    assert_eq!(shared.len(), 1);
}

#[test]
fn malformed_gsub_tables_never_panic() {
    let a = fixed_glyph('あ');
    let full = vrt2_table(&[(a, 42)]);
    for cut in 0..full.len() {
        let backend = FixedBackend::with_default_fonts().with_font(
            "HiraginoSans-W3",
            japanese_font().with_table(*b"GSUB", full[..cut].to_vec()),
        );
        let mut ctx = context(backend, vertical(), Size::new(100.0, 100.0));
        ctx.parse("あ");
        assert_eq!(ctx.runs()[0].glyph, a, "truncated at {cut}");
    }
}

#[test]
fn substitution_cache_overflow_returns_nothing() {
    let table = vrt2_table(&[(5, 42)]);
    let backend = FixedBackend::new()
        .with_font("First", japanese_font().with_table(*b"GSUB", table.clone()))
        .with_font("Second", japanese_font().with_table(*b"GSUB", table));
    let mut fonts = FontManager::new();
    fonts.set_font_names(Script::Japanese, ["First", "Second"]);
    fonts.refresh();
    let first = fonts.font_handle(1, 17.0, false);
    let second = fonts.font_handle(2, 17.0, false);
    assert_eq!(&*second.name, "Second");

    let substitutions = VerticalSubstitutions::with_capacity(1);
    assert_eq!(substitutions.vertical_substitute(&backend, &first, 5), Some(42));
    assert_eq!(substitutions.vertical_substitute(&backend, &second, 5), None);
    assert_eq!(substitutions.vertical_substitute(&backend, &second, 5), None);
    assert_eq!(substitutions.overflows(), 2);
    // Fonts already cached keep working.
    assert_eq!(substitutions.vertical_substitute(&backend, &first, 5), Some(42));
}

#[test]
fn stale_font_ids_fall_back_to_default() {
    let mut fonts = FontManager::new();
    let count = fonts.font_count();
    assert_eq!(&*fonts.font_name(count + 10), "HelveticaNeue");

    fonts.set_font_names(Script::Emoji, ["AppleColorEmoji"]);
    // Old ids stay valid until the next refresh.
    assert_eq!(fonts.font_count(), count);
    fonts.refresh();
    assert_eq!(fonts.font_count(), 3);
    assert_eq!(&*fonts.font_name(5), "HelveticaNeue");
}

#[test]
fn stone_punctuation_halves_adjacent_marks() {
    let mut ctx = context(
        FixedBackend::with_default_fonts(),
        TextConfig::default(),
        Size::new(200.0, 50.0),
    );
    ctx.parse("、。");
    ctx.layout();
    for run in ctx.runs() {
        assert_eq!(run.frame.width(), run.advance.width * 0.5);
    }

    ctx.config.punctuation = PunctuationMode::Whole;
    ctx.parse("、。");
    ctx.layout();
    for run in ctx.runs() {
        assert_eq!(run.frame.width(), run.advance.width);
    }
}

#[test]
fn tate_chu_yoko_pair_is_centered_in_its_cell() {
    let mut ctx = context(
        FixedBackend::with_default_fonts(),
        vertical(),
        Size::new(100.0, 100.0),
    );
    ctx.parse("12");
    ctx.layout();
    let runs = ctx.runs();
    assert!(ctx.is_tate_chu_yoko(0) && ctx.is_tate_chu_yoko(1));
    assert_eq!(runs[0].frame.min_y(), runs[1].frame.min_y());
    assert!((runs[1].frame.min_x() - runs[0].frame.max_x()).abs() < 1e-3);

    let cell = ctx.adjust_font_size();
    let left = runs[0].frame.min_x() - (100.0 - cell);
    let right = 100.0 - runs[1].frame.max_x();
    assert!((left - right).abs() < 1e-3, "left {left} right {right}");
    assert!(left > 0.0);
    assert!(!ctx.is_truncated());
}

#[test]
fn justified_lines_fill_the_box() {
    let config = TextConfig {
        text_align: TextAlign::Justify,
        ..TextConfig::default()
    };
    let mut ctx = context(FixedBackend::with_default_fonts(), config, Size::new(100.0, 200.0));
    ctx.parse("ab cd ef gh ij kl mn");
    ctx.layout();
    assert!(ctx.line_count() > 1);

    let first = ctx.run_indexes(0);
    let runs = &ctx.runs()[first];
    assert_eq!(runs[0].frame.min_x(), 0.0);
    assert!((runs[runs.len() - 1].frame.max_x() - 100.0).abs() < 1e-3);

    let last = ctx.run_indexes(ctx.line_count() - 1);
    assert_eq!(ctx.runs()[last.start].frame.min_x(), 0.0);
}

#[test]
fn kinsoku_pulls_the_word_before_a_closing_mark() -> Result<()> {
    let mut ctx = context(
        FixedBackend::with_default_fonts(),
        TextConfig::default(),
        Size::new(51.0, 100.0),
    );
    ctx.parse("あいう」え");
    ctx.layout();
    let closing = ctx
        .runs()
        .iter()
        .position(|run| run.ch == '」')
        .context("closing bracket run")?;
    let line = ctx.runs()[closing].line;
    let start = ctx.run_indexes(line).start;
    assert!(start < closing, "closing bracket must not start a line");
    Ok(())
}

#[test]
fn truncation_leaves_a_single_ellipsis() {
    let mut ctx = context(
        FixedBackend::with_default_fonts(),
        TextConfig::default(),
        Size::new(60.0, 20.0),
    );
    ctx.parse_and_layout("ab cd ef gh ij kl");
    let ellipses: Vec<_> = ctx
        .runs()
        .iter()
        .enumerate()
        .filter(|(_, run)| run.visibility == Visibility::Ellipsis)
        .map(|(index, _)| index)
        .collect();
    assert_eq!(ellipses.len(), 1);
    let ellipsis = ellipses[0];
    assert!(ctx.runs()[..ellipsis].iter().all(|run| !run.is_hidden()));
    assert!(ctx.runs()[ellipsis + 1..].iter().all(|run| run.is_hidden()));
    assert_eq!(ctx.ellipsis_glyph_for(ellipsis), Some(fixed_glyph('…')));
}

#[test]
fn size_that_fits_measures_without_touching_runs() {
    let ctx = context(
        FixedBackend::with_default_fonts(),
        TextConfig::default(),
        Size::new(10.0, 10.0),
    );
    let size = ctx.size_that_fits("あい\nうえお", Size::new(500.0, 500.0));
    assert_eq!(size.width, 51.0);
    assert!((size.height - 34.0).abs() < 1e-3);
    assert!(ctx.runs().is_empty());
}
