use cavegen::{GenerationParams, GeneratorKind, Map, build_generator};
use clap::Parser;
use std::path::PathBuf;

/// Генератор подземелий для Chronicles of Realms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML
    #[arg(short, long)]
    config: PathBuf,

    /// Путь для сохранения dungeon.png (по умолчанию: ./dungeon.png)
    #[arg(short, long, default_value = "dungeon.png")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    println!("🔍 Загрузка конфигурации...");
    let params = GenerationParams::from_toml_file(cli.config.to_str().unwrap())?;

    println!(
        "Генерация карты {}×{} ({:?})...",
        params.rows, params.cols, params.generator
    );
    let mut map = Map::new(params.rows, params.cols);
    let mut generator = build_generator(&params);
    generator.start(&mut map)?;
    generator.generate(&mut map)?;

    // Клеточному автомату полная генерация — один проход; дополнительные
    // сглаживающие проходы берутся из конфигурации
    if generator.kind() == GeneratorKind::CellAutomata {
        for _ in 1..params.automata_steps {
            generator.step(&mut map)?;
        }
    }

    println!("Доля пола: {:.2}", map.empty_ratio());
    println!("Сохранение в {:?}", cli.output);
    map.save_as_png(cli.output.to_str().unwrap())?;

    println!("\nГотово! Карта сохранена.");
    Ok(())
}
