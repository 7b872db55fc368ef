/// Example program to print the loaded configuration
///
/// Run with: cargo run -p stone-config --example print_config

fn main() {
    // Load configuration from stone.toml
    let config = stone_config::StoneConfig::load();

    println!("=== Stone Configuration ===\n");

    println!("Text Settings:");
    println!("  Font Size: {}", config.text.font_size);
    println!("  Line Height Scale: {}", config.text.line_height_scale);
    println!("  Direction: {:?}", config.text.direction);
    println!("  Text Align: {:?}", config.text.text_align);
    println!("  Direction Align: {:?}", config.text.direction_align);
    println!("  Punctuation: {:?}", config.text.punctuation);
    println!("  Kinsoku: {}", config.text.kinsoku);
    println!("  Tate-chu-yoko: {}", config.text.tate_chu_yoko);
    println!("  Auto Shrink: {} (min scale {})", config.text.auto_shrink, config.text.min_scale);
    println!();

    println!("Font Overrides:");
    println!("  Latin: {:?}", config.fonts.latin);
    println!("  Japanese: {:?}", config.fonts.japanese);
    println!("  Emoji: {:?}", config.fonts.emoji);
    println!();

    println!("Render Box: {} x {}", config.render.width, config.render.height);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
