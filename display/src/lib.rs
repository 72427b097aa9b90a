pub use palette::{Color, ParseColorError};
pub use texture::{frame_to_rgba32, frame_to_text, BYTES_PER_PIXEL};

#[cfg(feature = "sdl")]
pub use beeper::Beeper;
#[cfg(feature = "sdl")]
pub use display::Display;

mod palette;
mod texture;

#[cfg(feature = "sdl")]
mod beeper;
#[cfg(feature = "sdl")]
mod display;

/// An error reported by SDL2, which mostly describes failures as strings
#[cfg(feature = "sdl")]
#[derive(Debug, thiserror::Error)]
#[error("sdl: {0}")]
pub struct SdlError(pub String);

#[cfg(feature = "sdl")]
impl SdlError {
    fn from_display(error: impl std::fmt::Display) -> Self {
        SdlError(error.to_string())
    }
}
