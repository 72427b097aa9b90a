use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

use crate::SdlError;

const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.25;

struct SquareWave {
    phase_inc: f32,
    phase: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 { VOLUME } else { -VOLUME };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// A fixed tone that plays while the sound timer is non-zero
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, SdlError> {
        let audio_subsystem = sdl.audio().map_err(SdlError)?;
        let desired_spec = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio_subsystem
            .open_playback(None, &desired_spec, |spec| SquareWave {
                phase_inc: TONE_HZ / spec.freq as f32,
                phase: 0.0,
            })
            .map_err(SdlError)?;

        Ok(Beeper {
            device,
            playing: false,
        })
    }

    /// Starts or stops the tone, touching the device only on a change
    pub fn set_playing(&mut self, playing: bool) {
        if playing == self.playing {
            return;
        }
        if playing {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.playing = playing;
    }
}
