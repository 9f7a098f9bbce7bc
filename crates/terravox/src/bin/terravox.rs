//! # TERRAVOX Generator
//!
//! Generates a world from a TOML configuration and prints a report.
//!
//! ```bash
//! # Defaults (128 x 200 x 128, seed 1337)
//! terravox
//!
//! # Custom configuration
//! terravox config/world.toml
//!
//! # Dump the effective configuration
//! terravox --print-config config/world.toml
//! ```

use std::process::ExitCode;

use terravox::procedural::GenerationConfig;
use terravox::WorldGenerator;

fn usage() {
    println!("Usage: terravox [--print-config] [CONFIG.toml]");
}

fn main() -> ExitCode {
    let mut print_config = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                usage();
                return ExitCode::SUCCESS;
            }
            "--print-config" => print_config = true,
            _ if path.is_none() => path = Some(arg),
            _ => {
                eprintln!("Unexpected argument: {arg}");
                usage();
                return ExitCode::FAILURE;
            }
        }
    }

    let config = match &path {
        Some(path) => GenerationConfig::from_toml_file(path),
        None => Ok(GenerationConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if print_config {
        match config.to_toml_string() {
            Ok(text) => {
                println!("{text}");
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                eprintln!("✗ {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    TERRAVOX GENERATOR v{}", env!("CARGO_PKG_VERSION"));
    println!("═══════════════════════════════════════════════════════════════════");
    println!();
    println!("  Config:  {}", path.as_deref().unwrap_or("<defaults>"));
    println!("  Seed:    {}", config.seed);
    println!();

    let generator = match WorldGenerator::new(config) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("✗ {e}");
            return ExitCode::FAILURE;
        }
    };
    let world = generator.generate();

    println!("{}", world.report);
    for (i, body) in world.water.placed.iter().enumerate() {
        println!(
            "    lake #{i}: origin {:?}, surface y={}, {} cells",
            body.origin, body.surface_y, body.volume
        );
    }
    ExitCode::SUCCESS
}
