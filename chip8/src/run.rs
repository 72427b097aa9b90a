use std::time::{Duration, Instant};

use anyhow::Context;
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::constants::TIMER_HZ;
use chip8_display::{Beeper, Display};

use crate::args::Args;
use crate::host::Host;
use crate::keymap::keymap;

pub fn run(host: &mut Host, args: &Args) -> anyhow::Result<()> {
    // Get SDL2 context
    let sdl = sdl2::init()
        .map_err(anyhow::Error::msg)
        .context("unable to initialise SDL2")?;
    let (width, height) = (host.chip8().width(), host.chip8().height());
    let mut display = Display::new(&sdl, width, height, args.scale, args.fg, args.bg)?;
    let mut beeper = Beeper::new(&sdl)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    let frame_time = Duration::from_secs(1) / TIMER_HZ;
    let mut last_frame = Instant::now();
    display.render(host.chip8().frame_buffer())?;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => host.chip8_mut().key_press(kc),
                    (Keycode::Escape, _) => break 'event,
                    (Keycode::Equals, _) => host.speed_up(),
                    (Keycode::Minus, _) => host.slow_down(),
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        host.chip8_mut().key_release(kc);
                    }
                }
                _ => continue,
            };
        }

        // Update state
        host.run_frame()?;
        if host.chip8().is_halted() {
            info!("program exited");
            break 'event;
        }

        // If the draw flag is set, unset it and render the current frame
        if host.chip8_mut().take_redraw() {
            display.render(host.chip8().frame_buffer())?;
        }
        beeper.set_playing(host.chip8().is_sound_timer_active());

        // Handle timing
        let elapsed = last_frame.elapsed();
        if frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
        last_frame = Instant::now();
    }
    Ok(())
}
