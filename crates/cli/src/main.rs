#![deny(unsafe_code)]
//! CLI binary for the marbling engine.
//!
//! Subcommands:
//! - `render -m <method>`: apply random tools to a blank or loaded canvas, write PNG
//! - `replay <recipe>`: re-render a saved recipe
//! - `list`: print available tool methods and interpolation modes

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use marbling_core::{Channel, ChannelDepth, Interpolation, Rgb, WarpStats};
use marbling_studio::{snapshot, Recipe, ToolMethod};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "marbling", about = "Generate randomized mathematical marbling images")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Print the seed and enable debug logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply a tool N times with random parameters and write a PNG.
    Render {
        /// Tool method: I (ink-drop) or T (tine-line).
        #[arg(short, long)]
        method: String,

        /// Canvas width in pixels (ignored with --init).
        #[arg(short = 'W', long, default_value_t = 112)]
        width: usize,

        /// Canvas height in pixels (ignored with --init).
        #[arg(short = 'H', long, default_value_t = 112)]
        height: usize,

        /// Number of tool applications.
        #[arg(short, long, default_value_t = 1)]
        count: usize,

        /// PRNG seed; the same seed produces the same image. Defaults to the
        /// current unix time.
        #[arg(long)]
        seed: Option<u64>,

        /// Resampling mode (nearest, bilinear).
        #[arg(short, long, default_value = "nearest")]
        interpolation: String,

        /// Blank canvas color as #rrggbb.
        #[arg(short, long, default_value = "#ffffff")]
        background: String,

        /// Also write the recipe JSON to this path.
        #[arg(long)]
        recipe: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Re-render a recipe written by `render --recipe`.
    Replay {
        /// Recipe JSON file.
        recipe: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List available tool methods and interpolation modes.
    List,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Start from this image instead of a blank canvas. For `replay`,
    /// overrides the recipe's init image.
    #[arg(long)]
    init: Option<PathBuf>,

    /// Output file path. Defaults to a timestamped name.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Working channel depth in bits (8 or 16). `render` defaults to 16;
    /// `replay` defaults to the recipe's depth.
    #[arg(long)]
    depth: Option<u32>,
}

impl OutputArgs {
    fn depth(&self) -> Result<Option<ChannelDepth>, CliError> {
        self.depth
            .map(ChannelDepth::from_bits)
            .transpose()
            .map_err(|e| CliError::Input(e.to_string()))
    }
}

/// Seconds and milliseconds since the unix epoch.
fn now() -> (u64, u32) {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs(), d.subsec_millis()))
        .unwrap_or_default()
}

fn default_save_path() -> PathBuf {
    let (secs, millis) = now();
    PathBuf::from(format!("{secs}.{millis:03}.png"))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Builds the canvas, renders the recipe onto it and writes the PNG.
///
/// An init image overrides the recipe dimensions.
fn compose<C: Channel>(recipe: &mut Recipe, save: &Path) -> Result<WarpStats, CliError> {
    let mut canvas = match recipe.init.clone() {
        Some(path) => {
            let canvas = snapshot::read_png::<C>(&path)?;
            recipe.width = canvas.width();
            recipe.height = canvas.height();
            canvas
        }
        None => recipe.blank_canvas::<C>()?,
    };
    let stats = recipe.render(&mut canvas)?;
    snapshot::write_png(&canvas, save)?;
    Ok(stats)
}

/// Renders at the recipe's channel depth and returns the output path.
fn compose_at_depth(
    recipe: &mut Recipe,
    save: Option<PathBuf>,
) -> Result<(PathBuf, WarpStats), CliError> {
    let save = save.unwrap_or_else(default_save_path);
    let stats = match recipe.depth {
        ChannelDepth::Eight => compose::<u8>(recipe, &save)?,
        ChannelDepth::Sixteen => compose::<u16>(recipe, &save)?,
    };
    Ok((save, stats))
}

fn report(
    json: bool,
    recipe: &Recipe,
    output: &Path,
    stats: &WarpStats,
) -> Result<(), CliError> {
    if json {
        let info = serde_json::json!({
            "recipe": recipe,
            "stats": stats,
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {} x{} ({}x{}, seed {}, {} clamped pickups) -> {}",
            recipe.method,
            recipe.count,
            recipe.width,
            recipe.height,
            recipe.seed,
            stats.clamped,
            output.display()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let methods = ToolMethod::list_names();
            let interpolations = Interpolation::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "methods": methods,
                    "interpolations": interpolations,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Methods:");
                for name in methods {
                    println!("  {name}");
                }
                println!("Interpolations:");
                println!("  {}", interpolations.join(", "));
            }
        }
        Command::Render {
            method,
            width,
            height,
            count,
            seed,
            interpolation,
            background,
            recipe: recipe_path,
            output,
        } => {
            let method = ToolMethod::from_name(&method)?;
            let interpolation =
                Interpolation::from_name(&interpolation).map_err(|e| CliError::Input(e.to_string()))?;
            let background = Rgb::<u8>::from_hex(&background)?;
            let seed = seed.unwrap_or_else(|| now().0);
            if cli.verbose && !cli.json {
                println!("Current seed: {seed}");
            }

            let mut recipe = Recipe::new(method, width, height, seed);
            recipe.count = count;
            recipe.interpolation = interpolation;
            recipe.background = background;
            recipe.depth = output.depth()?.unwrap_or_default();
            recipe.init = output.init;
            if recipe.init.is_none() {
                recipe.validate()?;
            }

            let (save, stats) = compose_at_depth(&mut recipe, output.save)?;

            if let Some(path) = recipe_path {
                let json = serde_json::to_string_pretty(&recipe)?;
                std::fs::write(&path, json)
                    .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            }
            report(cli.json, &recipe, &save, &stats)?;
        }
        Command::Replay {
            recipe: recipe_path,
            output,
        } => {
            let text = std::fs::read_to_string(&recipe_path)
                .map_err(|e| CliError::Io(format!("{}: {e}", recipe_path.display())))?;
            let mut recipe: Recipe = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid recipe JSON: {e}")))?;
            recipe.validate()?;
            if let Some(depth) = output.depth()? {
                recipe.depth = depth;
            }
            if let Some(init) = output.init {
                recipe.init = Some(init);
            }
            if cli.verbose && !cli.json {
                println!("Current seed: {}", recipe.seed);
            }

            let (save, stats) = compose_at_depth(&mut recipe, output.save)?;
            report(cli.json, &recipe, &save, &stats)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
