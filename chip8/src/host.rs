use chip8_core::constants::DEFAULT_CYCLES_PER_FRAME;
use chip8_core::{Chip8, Chip8Error};
use log::info;

/// How far one speed key press moves the cycles per frame
pub const SPEED_STEP: u32 = 50;

/// # Host
/// Drives a Chip8 at a fixed number of cycles per 60Hz frame.
///
/// Each frame runs the cycles first and then ticks the timers once,
/// so the timers count down at 60Hz whatever the speed.
pub struct Host {
    chip8: Chip8,
    cycles_per_frame: u32,
}

impl Host {
    pub fn new(chip8: Chip8, cycles_per_frame: u32) -> Self {
        Host {
            chip8,
            cycles_per_frame,
        }
    }

    /// Runs one frame of cycles, stopping early if the program exits
    pub fn run_frame(&mut self) -> Result<(), Chip8Error> {
        for _ in 0..self.cycles_per_frame {
            if self.chip8.is_halted() {
                break;
            }
            self.chip8.run_cycle()?;
        }
        self.chip8.tick_timers();
        Ok(())
    }

    pub fn speed_up(&mut self) {
        self.cycles_per_frame += SPEED_STEP;
        info!("cycles per frame: {}", self.cycles_per_frame);
    }

    /// Slows down by one step, falling back to the default once a step would reach zero
    pub fn slow_down(&mut self) {
        self.cycles_per_frame = if self.cycles_per_frame <= SPEED_STEP {
            DEFAULT_CYCLES_PER_FRAME
        } else {
            self.cycles_per_frame - SPEED_STEP
        };
        info!("cycles per frame: {}", self.cycles_per_frame);
    }

    pub fn cycles_per_frame(&self) -> u32 {
        self.cycles_per_frame
    }

    pub fn chip8(&self) -> &Chip8 {
        &self.chip8
    }

    pub fn chip8_mut(&mut self) -> &mut Chip8 {
        &mut self.chip8
    }
}
