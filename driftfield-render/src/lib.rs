// Driftfield Renderer
//
// Turns engine scenes into terminal output. Each cell is one pseudo-pixel
// wide and two tall via the upper-half-block glyph, a viewport maps terminal
// geometry to surface units, and frames are diffed row-by-row so only
// changed spans are re-emitted. Also owns the terminal surface itself:
// acquisition, size queries, and unconditional restore on drop.

mod ansi;
mod error;
mod raster;
mod terminal;
mod theme;

pub use ansi::{Cell, DirtySpan, FrameEmitter};
pub use error::{RenderError, RenderResult};
pub use raster::{PixelBuffer, Rasterizer, Viewport, DEFAULT_SCALE};
pub use terminal::TerminalSurface;
pub use theme::{Rgb, Theme, ThemeName};
