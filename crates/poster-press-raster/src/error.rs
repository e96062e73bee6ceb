use core::fmt;
use poster_press_render::LayoutError;
use std::io;
use std::path::PathBuf;

/// Render failure surfaced to callers. Output at the target path is unreliable.
#[derive(Debug)]
pub enum RasterError {
    /// Layout could not be computed.
    Layout(LayoutError),
    /// Canvas pixel buffer would overflow addressable memory.
    CanvasAllocation { width: u32, height: u32 },
    /// Output directory could not be created.
    CreateDir { path: PathBuf, source: io::Error },
    /// Output file could not be opened or flushed.
    Write { path: PathBuf, source: io::Error },
    /// JPEG encoding failed.
    Encode(image::ImageError),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "layout failed: {}", err),
            Self::CanvasAllocation { width, height } => {
                write!(f, "canvas allocation failed ({}x{})", width, height)
            }
            Self::CreateDir { path, source } => {
                write!(f, "create dir {} failed: {}", path.display(), source)
            }
            Self::Write { path, source } => {
                write!(f, "write {} failed: {}", path.display(), source)
            }
            Self::Encode(err) => write!(f, "jpeg encode failed: {}", err),
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::CreateDir { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::CanvasAllocation { .. } => None,
        }
    }
}

impl From<LayoutError> for RasterError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

impl From<image::ImageError> for RasterError {
    fn from(value: image::ImageError) -> Self {
        Self::Encode(value)
    }
}
