use std::fmt;
use std::str::FromStr;

use crate::constants::{
    CHIP8_DISPLAY_HEIGHT, CHIP8_DISPLAY_WIDTH, CHIP8_STACK_SIZE, SCHIP_DISPLAY_HEIGHT,
    SCHIP_DISPLAY_WIDTH, SCHIP_STACK_SIZE,
};
use crate::quirks::Quirks;

/// # Profile
/// Which instruction set the machine implements.
///
/// - `Chip8` is the base machine: 64x32 screen and a 12 deep stack
/// - `SuperChip` adds a 128x64 screen (with a low resolution mode that doubles pixels),
///   scrolling, 16x16 sprites, a wide font and a 16 deep stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    #[default]
    Chip8,
    SuperChip,
}

impl Profile {
    pub fn is_extended(self) -> bool {
        self == Profile::SuperChip
    }

    pub fn stack_size(self) -> usize {
        match self {
            Profile::Chip8 => CHIP8_STACK_SIZE,
            Profile::SuperChip => SCHIP_STACK_SIZE,
        }
    }

    /// Physical (width, height) of the framebuffer
    pub fn screen_size(self) -> (usize, usize) {
        match self {
            Profile::Chip8 => (CHIP8_DISPLAY_WIDTH, CHIP8_DISPLAY_HEIGHT),
            Profile::SuperChip => (SCHIP_DISPLAY_WIDTH, SCHIP_DISPLAY_HEIGHT),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chip8" | "chip-8" => Ok(Profile::Chip8),
            "schip" | "superchip" | "super-chip" => Ok(Profile::SuperChip),
            other => Err(format!("unknown profile `{}`, expected chip8 or schip", other)),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Chip8 => write!(f, "chip8"),
            Profile::SuperChip => write!(f, "schip"),
        }
    }
}

/// Everything a machine needs to know before it is created.
/// None of it changes for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub profile: Profile,
    pub quirks: Quirks,
    /// Seeds the random source used by Cxkk; entropy is used when absent
    pub seed: Option<u64>,
}
