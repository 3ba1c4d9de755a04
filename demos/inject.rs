use neptune_thumb::{Config, Model, Script, SNAPSHOT_SIZE};
use std::env;

fn print_usage() {
    println!("Usage: cargo run --example inject [SNAPSHOT] [MODEL]");
    println!("Arguments:");
    println!("  SNAPSHOT   Path to a screenshot of the sliced scene (PNG)");
    println!("  MODEL      Printer model: base or pro (default: base)");
    println!("\nThe vendor library for 'pro' is expected in ./lib");
}

fn main() {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{}:{}] {} - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let snapshot = match image::open(&args[1]) {
        Ok(img) => img.resize(
            SNAPSHOT_SIZE,
            SNAPSHOT_SIZE,
            image::imageops::FilterType::Lanczos3,
        ),
        Err(err) => {
            eprintln!("Error: could not open '{}': {}", args[1], err);
            return;
        }
    };

    let model_text = args.get(2).map(String::as_str).unwrap_or("base");
    let model = Model::from_settings(true, model_text);

    let script = Script::new(Config::new(model).lib_dir("lib"));

    let mut layers = vec![
        ";FLAVOR:Marlin\n;Generated with Cura_SteamEngine 5.3.0\nM140 S60\nM104 S200".to_string(),
        ";LAYER:0\nG1 X10 Y10 E5".to_string(),
    ];
    script.execute(Some(&snapshot), &mut layers);

    for layer in &layers {
        println!("{}", layer);
    }
}
