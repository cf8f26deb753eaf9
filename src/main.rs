use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};

use molpaint::renderer::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use molpaint::{imaging, ImageRenderer, RenderOptions};

/// Telmisartan.
const DEMO_SMILES: &str = "CCCc1nc2c(n1Cc1ccc(cc1)c1ccccc1C(=O)O)cc(cc2C)c1nc2c(n1C)cccc2";

#[derive(Parser)]
#[command(author, version, about = "Render SMILES structures to images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a single structure
    Render {
        /// SMILES string to draw
        #[arg(default_value = DEMO_SMILES)]
        smiles: String,
        #[arg(short, long, default_value = "molecule.png")]
        output: PathBuf,
        #[arg(long, default_value_t = 400)]
        width: u32,
        #[arg(long, default_value_t = 400)]
        height: u32,
        /// Resample the rendered image to WIDTHxHEIGHT
        #[arg(long, value_parser = parse_size)]
        resize: Option<(u32, u32)>,
        #[arg(long, value_enum, default_value_t = Format::Png)]
        format: Format,
        /// JSON file overriding renderer options
        #[arg(long)]
        options: Option<PathBuf>,
    },
    /// Render one PNG per line of a SMILES file
    Batch {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u32,
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: u32,
        #[arg(long)]
        options: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Png,
    Svg,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            smiles,
            output,
            width,
            height,
            resize,
            format,
            options,
        } => {
            let mut renderer = ImageRenderer::with_options(load_options(options.as_deref())?);
            renderer.set_width(width);
            renderer.set_height(height);
            render(&renderer, &smiles, &output, resize, format)
        }
        Command::Batch {
            input,
            output,
            width,
            height,
            options,
        } => {
            let mut renderer = ImageRenderer::with_options(load_options(options.as_deref())?);
            batch(&mut renderer, &input, &output, width, height)
        }
    }
}

fn load_options(path: Option<&Path>) -> Result<RenderOptions> {
    let Some(path) = path else {
        return Ok(RenderOptions::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse options file {}", path.display()))
}

fn render(
    renderer: &ImageRenderer,
    smiles: &str,
    output: &Path,
    resize: Option<(u32, u32)>,
    format: Format,
) -> Result<()> {
    match format {
        Format::Svg => {
            if resize.is_some() {
                bail!("--resize only applies to PNG output");
            }
            let svg = renderer.render_svg(smiles)?;
            fs::write(output, svg)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
        Format::Png => {
            let mut image = renderer.render_one(smiles)?;
            if let Some((width, height)) = resize {
                image = imaging::resize(&image, width, height);
            }
            imaging::write_png(&image, output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
    }
    info!("wrote {}", output.display());
    Ok(())
}

fn batch(renderer: &mut ImageRenderer, input: &Path, output: &Path, width: u32, height: u32) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read SMILES file {}", input.display()))?;
    let smiles: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let mut written = 0usize;
    for (index, outcome) in renderer.render_array(&smiles, width, height).into_iter().enumerate() {
        // Failures were already logged by the renderer.
        let Ok(image) = outcome else {
            continue;
        };
        let path = output.join(format!("{index}.png"));
        match imaging::write_png(&image, &path) {
            Ok(()) => written += 1,
            Err(err) => error!("Failed to write {}: {err}", path.display()),
        }
    }
    info!("rendered {written} of {} structures into {}", smiles.len(), output.display());
    Ok(())
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| format!("invalid dimension {v:?} in {s:?}"))
    };
    Ok((parse(w)?, parse(h)?))
}
