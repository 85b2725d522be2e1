//! SealMaker Render Library
//!
//! Surface abstraction, the seal renderer and a CPU raster backend.
//! The default backend uses tiny-skia for paths and fontdue for glyphs.

pub mod fonts;
mod raster;
mod renderer;

pub use fonts::{FontBook, find_system_font};
pub use raster::{PixmapSurface, PngRenderResult, encode_png};
pub use renderer::{DrawState, FontSpec, RenderResult, RendererError, SealRenderer, Surface};
