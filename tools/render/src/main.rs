//! Relief renderer: shades an SRTM tile and writes the figure next to it.
//!
//!   render shade --config relief.json
//!   render profiles --axis east-west --output data/profiles.json
//!   render synthetic --output data/S32W070.hgt

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::{Rgb, RgbImage};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relief_core::profiles::DEFAULT_PROFILE_STRIDE;
use relief_core::synthetic::{synthetic_tile, SyntheticParams};
use relief_core::{
    encode_grid, extract_profiles, read_grid, sanitize, HeightField, IntensityField, ProfileAxis,
    ReliefConfig, ReliefPipeline,
};

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "render", about = "Hillshade rendering for SRTM elevation tiles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode, repair and shade a tile, then write results.png to the data dir.
    Shade {
        #[command(flatten)]
        tile: TileArgs,

        /// Fail when the fill value is negative instead of only warning
        #[arg(long)]
        strict: bool,
    },
    /// Write elevation profiles of the repaired tile as JSON.
    Profiles {
        #[command(flatten)]
        tile: TileArgs,

        #[arg(long, value_enum, default_value = "north-south")]
        axis: AxisArg,

        /// Spacing between profiles, in samples
        #[arg(long, default_value_t = DEFAULT_PROFILE_STRIDE)]
        stride: usize,

        #[arg(short, long, default_value = "data/profiles.json")]
        output: PathBuf,
    },
    /// Write a synthetic fBm tile in .hgt layout.
    Synthetic {
        #[arg(short, long, default_value = "data/S32W070.hgt")]
        output: PathBuf,

        #[arg(long, default_value_t = 1201)]
        samples: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Fraction of cells written as voids (-32768)
        #[arg(long, default_value_t = 0.001)]
        void_fraction: f64,
    },
}

/// Tile selection and lighting. Flags override the JSON config.
#[derive(Args, Debug)]
struct TileArgs {
    /// JSON config file (missing keys take defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[arg(long)]
    data_file: Option<String>,

    /// Latitude of the south-west corner
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<i32>,

    /// Longitude of the south-west corner
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<i32>,

    /// Take the corner from the tile name (e.g. S32W070.hgt)
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    origin_from_name: bool,

    /// Samples per side (1201 or 3601)
    #[arg(long)]
    samples: Option<usize>,

    /// Light azimuth, degrees
    #[arg(long)]
    azimuth: Option<f64>,

    /// Light altitude, degrees
    #[arg(long)]
    altitude: Option<f64>,

    #[arg(long)]
    exaggeration: Option<f64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AxisArg {
    NorthSouth,
    EastWest,
}

impl From<AxisArg> for ProfileAxis {
    fn from(a: AxisArg) -> Self {
        match a {
            AxisArg::NorthSouth => ProfileAxis::NorthSouth,
            AxisArg::EastWest => ProfileAxis::EastWest,
        }
    }
}

impl TileArgs {
    fn resolve(&self) -> Result<ReliefConfig> {
        let mut cfg = match &self.config {
            Some(path) => ReliefConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ReliefConfig::default(),
        };
        if let Some(dir) = &self.data_dir {
            cfg.data_dir = dir.clone();
        }
        if let Some(file) = &self.data_file {
            cfg.data_file = file.clone();
        }
        if let Some(lat) = self.lat {
            cfg.init_lat = lat;
        }
        if let Some(lon) = self.lon {
            cfg.init_lon = lon;
        }
        if let Some(samples) = self.samples {
            cfg.samples = samples;
        }
        if let Some(az) = self.azimuth {
            cfg.light.azimuth_deg = az;
        }
        if let Some(alt) = self.altitude {
            cfg.light.altitude_deg = alt;
        }
        if let Some(z) = self.exaggeration {
            cfg.vertical_exaggeration = z;
        }
        if self.origin_from_name {
            cfg = cfg.with_tile_origin()?;
        }
        Ok(cfg)
    }
}

// ── Image helpers ────────────────────────────────────────────────────────────

/// Intensity → gray, clamped to [0, 255].
fn gray(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Soft-light blend of a base value with a shade, both in [0, 1].
fn soft_blend(base: f64, shade: f64) -> f64 {
    2.0 * shade * base + base * base * (1.0 - 2.0 * shade)
}

/// Left: hillshade. Right: elevation ramp softened by the hillshade.
fn render_figure(hf: &HeightField, intensity: &IntensityField) -> RgbImage {
    let n = hf.size();
    let min_z = hf.min_elevation() as f64;
    let z_range = (hf.max_elevation() as f64 - min_z).max(1.0);

    let mut img = RgbImage::new(2 * n as u32, n as u32);
    for r in 0..n {
        for c in 0..n {
            let shade = intensity.get(r, c);
            let s = gray(shade);
            img.put_pixel(c as u32, r as u32, Rgb([s, s, s]));

            let base = (hf.get(r, c) as f64 - min_z) / z_range;
            let blended = soft_blend(base, (shade / 255.0).clamp(0.0, 1.0));
            let b = gray(blended * 255.0);
            img.put_pixel((n + c) as u32, r as u32, Rgb([b, b, b]));
        }
    }
    img
}

// ── Commands ─────────────────────────────────────────────────────────────────

fn cmd_shade(tile: &TileArgs, strict: bool) -> Result<()> {
    let cfg = tile.resolve()?;
    let output = cfg.output_path();
    let pipeline = ReliefPipeline::new(cfg).strict(strict);
    let products = pipeline
        .run()
        .with_context(|| format!("processing {}", pipeline.config().data_path().display()))?;

    let (lat_min, lat_max, lon_min, lon_max) = products.coords.extent();
    info!(lat_min, lat_max, lon_min, lon_max, "rendering figure");

    let img = render_figure(&products.heightfield, &products.intensity);
    img.save(&output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("Wrote {}", output.display());
    Ok(())
}

fn cmd_profiles(tile: &TileArgs, axis: AxisArg, stride: usize, output: &Path) -> Result<()> {
    let cfg = tile.resolve()?;
    let mut hf = read_grid(cfg.data_path(), cfg.samples)
        .with_context(|| format!("reading {}", cfg.data_path().display()))?;
    let report = sanitize(&mut hf)?;
    if report.is_degenerate() {
        warn!(remaining = report.remaining, "profiles include unrepaired samples");
    }

    let profiles = extract_profiles(&hf, axis.into(), stride)?;
    write_parent_dir(output)?;
    let json = serde_json::to_string(&profiles)?;
    fs::write(output, json).with_context(|| format!("writing {}", output.display()))?;
    info!(count = profiles.len(), "Wrote {}", output.display());
    Ok(())
}

fn cmd_synthetic(output: &Path, samples: usize, seed: u64, void_fraction: f64) -> Result<()> {
    ensure!(samples > 0, "--samples must be at least 1");
    let params = SyntheticParams {
        samples,
        seed,
        void_fraction,
        ..SyntheticParams::default()
    };
    info!(samples, seed, void_fraction, "generating synthetic tile");
    let hf = synthetic_tile(&params)?;
    write_parent_dir(output)?;
    fs::write(output, encode_grid(&hf)).with_context(|| format!("writing {}", output.display()))?;
    info!("Wrote {}", output.display());
    Ok(())
}

fn write_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    Ok(())
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "render=info,relief_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Shade { tile, strict } => cmd_shade(tile, *strict),
        Command::Profiles { tile, axis, stride, output } => cmd_profiles(tile, *axis, *stride, output),
        Command::Synthetic { output, samples, seed, void_fraction } => {
            cmd_synthetic(output, *samples, *seed, *void_fraction)
        }
    }
}
