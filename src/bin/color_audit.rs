use chatcolors::{hash_color, to_id};

fn main() {
    let names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        eprintln!("usage: color_audit <name>...");
        std::process::exit(2);
    }

    for name in &names {
        let id = to_id(name);
        let hashed = hash_color(&id);
        println!("{} ({})", name, if id.is_empty() { "<empty>" } else { id.as_str() });
        println!("  md5: {}", hashed.digest);
        println!(
            "  seed hsl: {}/{}/{}",
            hashed.seed.hue, hashed.seed.saturation, hashed.seed.lightness
        );
        println!("  luminance: {:.4}", hashed.luminance);
        println!("  correction: {:+.2}", hashed.correction);
        println!("  final lightness: {:.2}", hashed.adjusted.lightness);
        println!("  color: {}", hashed.hex);
    }
}
