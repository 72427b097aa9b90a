use chip8_display::frame_to_text;
use log::info;

use crate::host::Host;

/// Runs `frames` frames without any input and returns the final screen as text
pub fn run(host: &mut Host, frames: u64) -> anyhow::Result<String> {
    for frame in 0..frames {
        host.run_frame()?;
        if host.chip8().is_halted() {
            info!("program exited after {} frames", frame + 1);
            break;
        }
    }
    let chip8 = host.chip8();
    Ok(frame_to_text(chip8.frame_buffer(), chip8.width()))
}
