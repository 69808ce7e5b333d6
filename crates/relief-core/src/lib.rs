//! Relief shading for SRTM elevation tiles.
//!
//! Decodes raw big-endian `.hgt` grids, repairs void samples, builds the
//! latitude/longitude axes of the tile and computes a hillshade from a
//! distant light source.
//!
//! ```no_run
//! use relief_core::{ReliefConfig, ReliefPipeline};
//!
//! let products = ReliefPipeline::new(ReliefConfig::default()).run()?;
//! println!("{} x {}", products.intensity.width, products.intensity.height);
//! # Ok::<(), relief_core::ReliefError>(())
//! ```
pub mod config;
pub mod coords;
pub mod decode;
mod error;
pub mod gradient;
pub mod heightfield;
pub mod hillshade;
pub mod pipeline;
pub mod profiles;
pub mod sanitize;
pub mod synthetic;

pub use config::ReliefConfig;
pub use coords::{CoordinateGrid, TileOrigin};
pub use decode::{decode_grid, encode_grid, read_grid};
pub use error::ReliefError;
pub use heightfield::HeightField;
pub use hillshade::{hillshade, hillshade_exaggerated, IntensityField, LightSource};
pub use pipeline::{ReliefPipeline, ReliefProducts};
pub use profiles::{extract_profiles, Profile, ProfileAxis};
pub use sanitize::{sanitize, SanitizeReport};

/// Result type for relief operations.
pub type Result<T> = std::result::Result<T, ReliefError>;
