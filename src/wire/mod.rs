//! Byte-oriented wire reader/renderer with bounded sub-ranges and a
//! name-compression table (spec §4.6).

mod reader;
mod renderer;

pub use reader::Reader;
pub use renderer::Renderer;
