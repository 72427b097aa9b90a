use std::fs;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use chip8_core::Chip8;

use crate::args::Args;
use crate::host::Host;

mod args;
mod headless;
mod host;
#[cfg(feature = "sdl")]
mod keymap;
#[cfg(feature = "sdl")]
mod run;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let rom = fs::read(&args.rom)
        .with_context(|| format!("unable to read ROM {}", args.rom.display()))?;
    let config = args.config();
    info!(
        "loaded {} bytes from {} ({}, quirks: {})",
        rom.len(),
        args.rom.display(),
        config.profile,
        config.quirks
    );

    let mut chip8 = Chip8::new(config);
    chip8.load_rom(&rom)?;
    let mut host = Host::new(chip8, args.cycles_per_frame);

    if !args.headless && !cfg!(feature = "sdl") {
        warn!("built without the sdl feature, running headless");
    }
    if args.headless || !cfg!(feature = "sdl") {
        print!("{}", headless::run(&mut host, args.frames)?);
        return Ok(());
    }

    #[cfg(feature = "sdl")]
    run::run(&mut host, &args)?;
    Ok(())
}
