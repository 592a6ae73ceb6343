//! Skills-showcase collage generator.
//!
//! A run moves through a few stages, each usable on its own:
//!
//! - [`acquire_icons`] fetches the icon SVGs, converts them to rasters and keeps a JSON
//!   [`IconIndex`] so later runs skip the network
//! - [`load_image`] turns a local path or URL into an RGBA8 image
//! - [`LayoutStrategy::plan`] decides where each icon instance goes
//! - [`place_image`] rotates, optionally tints and pastes an icon onto the canvas
//! - [`run`] wires them together and writes `skills-showcase-<n>.png`
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod layout;
pub(crate) mod render;

/// Icon acquisition and the on-disk cache.
pub mod acquire;
/// Run configuration.
pub mod config;
/// SVG to raster conversion backends.
pub mod convert;
/// Blocking HTTP transport.
pub mod net;
/// End-to-end orchestration.
pub mod pipeline;

pub use crate::foundation::core::{Placement, Rgba8, Size};
pub use crate::foundation::error::{ShowcaseError, ShowcaseResult};
pub use crate::foundation::math::Rng64;

pub use crate::acquire::{acquire_icons, leaf_file_name};
pub use crate::assets::decode::{decode_rgba, is_svg_source};
pub use crate::assets::index::{IconIndex, IndexEntry};
pub use crate::assets::loader::{load_image, load_svg};
pub use crate::config::{ConverterKind, DEFAULT_ICON_SOURCES, ShowcaseConfig};
pub use crate::convert::{DEFAULT_CONVERT_ENDPOINT, LocalConverter, RemoteConverter, SvgConverter};
pub use crate::layout::planner::{GRID_ORIGIN, LayoutStrategy, grid_position, random_position};
pub use crate::net::{HttpResponse, ReqwestTransport, Transport, is_remote};
pub use crate::pipeline::{RunSummary, run};
pub use crate::render::composite::{
    TINT_MIX, blend, paste_with_alpha, place_image, prepare_overlay, rotate_expand, tint,
};
