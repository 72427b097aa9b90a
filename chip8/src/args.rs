use std::path::PathBuf;

use chip8_core::constants::DEFAULT_CYCLES_PER_FRAME;
use chip8_core::{Config, Profile, Quirks};
use chip8_display::Color;
use clap::Parser;

/// Runs a CHIP-8 or SUPER-CHIP program
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the ROM file to run
    pub rom: PathBuf,

    /// Instruction set to interpret: chip8 or schip
    #[arg(short, long, default_value_t = Profile::Chip8)]
    pub profile: Profile,

    /// Compatibility quirk to enable; repeat for more than one
    /// (vfreset, memory, clipping, shifting, jumping)
    #[arg(short, long = "quirk", value_name = "QUIRK")]
    pub quirks: Vec<Quirks>,

    /// Instructions executed per 60Hz frame
    #[arg(short, long, default_value_t = DEFAULT_CYCLES_PER_FRAME)]
    pub cycles_per_frame: u32,

    /// Window pixels per CHIP-8 pixel
    #[arg(short, long, default_value_t = 10)]
    pub scale: u32,

    /// Colour of lit pixels as r,g,b,a
    #[arg(short = 'f', long, default_value_t = Color::FOREGROUND)]
    pub fg: Color,

    /// Colour of unlit pixels as r,g,b,a
    #[arg(short = 'b', long, default_value_t = Color::BACKGROUND)]
    pub bg: Color,

    /// Seed for the random number instruction
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run without a window, printing the screen after this many frames
    #[arg(long)]
    pub headless: bool,

    /// Number of frames a headless run lasts
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Log more; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            profile: self.profile,
            quirks: self.quirks.iter().copied().collect(),
            seed: self.seed,
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
