//! Superpose command-line interface.
//!
//! Render plane-wave superpositions from TOML job files or built-in presets:
//! ```sh
//! superpose-cli run job.toml
//! superpose-cli preset circular -o out/
//! superpose-cli validate job.toml
//! superpose-cli presets
//! ```

mod config;
mod plotly;
mod render;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use anyhow::Context;
use superpose_core::presets::{preset, PRESETS};

#[derive(Parser)]
#[command(name = "superpose-cli")]
#[command(about = "Superpose: plane-wave mode superposition visualiser")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene from a TOML job file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a built-in preset with default outputs.
    Preset {
        /// Preset name (see `presets`).
        name: String,
        /// Output directory.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
    },
    /// Validate a job file and build its scene without rendering.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// List the built-in presets.
    Presets,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Superpose");
            println!("=========");
            let job = config::load_config(&config)
                .with_context(|| format!("Failed to load {}", config.display()))?;
            println!("Configuration: {}", config.display());

            let scene = runner::build_scene(&job)?;
            println!("Scene: {}", scene.kind());
            let result = runner::compute(&scene)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            let options =
                runner::RenderOptions::new(job.animation.limit, job.animation.fps, &job.output);
            runner::write_outputs(&result, &out_dir, &job.output, &options)?;

            println!("Done.");
            Ok(())
        }
        Commands::Preset { name, output } => {
            let scene = preset(&name)?;
            println!("Preset '{}' ({})", name, scene.kind());
            let result = runner::compute(&scene)?;

            let flags = config::OutputConfig::default();
            let animation = config::AnimationConfig::default();
            let options = runner::RenderOptions::new(animation.limit, animation.fps, &flags);
            runner::write_outputs(&result, &output, &flags, &options)?;

            println!("Done.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)
                .with_context(|| format!("Failed to load {}", config.display()))?;
            let scene = runner::build_scene(&job)?;
            println!(
                "Configuration is valid: {} ({}, {} modes)",
                config.display(),
                scene.kind(),
                scene.mode_count()
            );
            Ok(())
        }
        Commands::Presets => {
            println!("Available presets:");
            println!();
            for (name, description) in PRESETS {
                println!("  {:<20} {}", name, description);
            }
            Ok(())
        }
    }
}
