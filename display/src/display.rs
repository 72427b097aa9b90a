use log::debug;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::BlendMode;

use crate::palette::Color;
use crate::texture::{frame_to_rgba32, BYTES_PER_PIXEL};
use crate::SdlError;

/// # Display
/// The Chip-8 display is composed of `width * height` on/off pixels,
/// 64x32 on the base machine and 128x64 on SUPER-CHIP.
/// The on/off state of these pixels is encoded as 1/0 respectively in a flat row-major buffer.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
    foreground: Color,
    background: Color,
    texture: Vec<u8>,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `width` the horizontal size of the display measured in pixels
    /// * `height` the vertical size of the display measured in pixels
    /// * `scale` the size multiplier for each pixel
    pub fn new(
        sdl: &sdl2::Sdl,
        width: usize,
        height: usize,
        scale: u32,
        foreground: Color,
        background: Color,
    ) -> Result<Self, SdlError> {
        let video_subsystem = sdl.video().map_err(SdlError)?;
        let window = video_subsystem
            .window("chip8", width as u32 * scale, height as u32 * scale)
            .position_centered()
            .opengl()
            .build()
            .map_err(SdlError::from_display)?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(SdlError::from_display)?;
        debug!("opened {}x{} window at scale {}", width, height, scale);

        Ok(Display {
            canvas,
            width,
            height,
            foreground,
            background,
            texture: vec![0; width * height * BYTES_PER_PIXEL],
        })
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGBA32 texture and blends it over black.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer of `width * height` pixels
    pub fn render(&mut self, frame: &[u8]) -> Result<(), SdlError> {
        frame_to_rgba32(frame, self.foreground, self.background, &mut self.texture);

        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGBA32,
                self.width as u32,
                self.height as u32,
            )
            .map_err(SdlError::from_display)?;
        texture.set_blend_mode(BlendMode::Blend);
        texture
            .update(None, &self.texture, self.width * BYTES_PER_PIXEL)
            .map_err(SdlError::from_display)?;

        self.canvas.set_draw_color(sdl2::pixels::Color::RGB(0, 0, 0));
        self.canvas.clear();
        self.canvas.copy(&texture, None, None).map_err(SdlError)?;
        self.canvas.present();
        Ok(())
    }
}
