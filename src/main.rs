use std::io::Read;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use stone_config::StoneConfig;
use stone_text::font::FontFace;
use stone_text::{Context, FixedBackend, ShapingBackend, SystemFontBackend, Visibility};

/// Lays out text given on the command line (or stdin) and prints the runs.
///
/// Flags: `--config=PATH` reads settings from PATH instead of `stone.toml`,
/// `--fixed` measures with synthetic metrics instead of system fonts,
/// `--font=PATH` loads a font file under its full name so the font lists
/// in the configuration can refer to it.
fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let mut config_path = None;
    let mut font_files = Vec::new();
    let mut fixed = false;
    let mut words = Vec::new();
    for arg in std::env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--config=") {
            config_path = Some(path.to_string());
        } else if let Some(path) = arg.strip_prefix("--font=") {
            font_files.push(path.to_string());
        } else if arg == "--fixed" {
            fixed = true;
        } else {
            words.push(arg);
        }
    }

    let mut config = match &config_path {
        Some(path) => StoneConfig::load_from_file(path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => StoneConfig::load_or_default(),
    };
    config.merge_with_env();

    let text = if words.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading text from stdin")?;
        text
    } else {
        words.join(" ")
    };

    let backend: Arc<dyn ShapingBackend> = if fixed {
        if !font_files.is_empty() {
            log::warn!("--font is ignored with --fixed");
        }
        Arc::new(FixedBackend::with_default_fonts())
    } else {
        log::info!("discovering system fonts");
        let system = SystemFontBackend::new();
        for path in &font_files {
            let face = FontFace::from_path(path, 0)
                .with_context(|| format!("loading font file {path}"))?;
            let name = face.full_name().to_string();
            log::info!("loaded {path} as {name:?}");
            system.insert_face(&name, face);
        }
        Arc::new(system)
    };

    let mut ctx = Context::with_config(backend, config.text.clone())
        .with_render_size(config.render.size());
    config.fonts.apply(&mut ctx.fonts);
    ctx.parse_and_layout(&text);

    log::info!(
        "laid out {} runs on {} lines at scale {}",
        ctx.runs().len(),
        ctx.line_count(),
        ctx.adjust_font_scale
    );
    if ctx.is_truncated() {
        log::warn!("text does not fit {}x{}", config.render.width, config.render.height);
    }

    for (index, run) in ctx.runs().iter().enumerate() {
        let glyph = match run.visibility {
            Visibility::Invisible => continue,
            Visibility::Ellipsis => ctx.ellipsis_glyph_for(index).unwrap_or(run.glyph),
            Visibility::Visible => run.glyph,
        };
        let font = ctx.fonts.font_name(run.font_id);
        println!(
            "{index:>4} line {:>2} {:?} in {:?} glyph {glyph:>5} font {font} frame ({:.2}, {:.2}, {:.2}, {:.2}){}",
            run.line,
            run.text(ctx.text()),
            ctx.token_string_at(index).unwrap_or_default(),
            run.frame.min_x(),
            run.frame.min_y(),
            run.frame.width(),
            run.frame.height(),
            if ctx.is_clockwise(index) { " rotated" } else { "" },
        );
    }

    let size = ctx.rendered_size();
    println!("rendered {:.2} x {:.2}", size.width, size.height);
    Ok(())
}
