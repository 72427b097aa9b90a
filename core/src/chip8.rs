use log::trace;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::{MAX_ROM_SIZE, PROGRAM_START};
use crate::error::Chip8Error;
use crate::instruction::Instruction;
use crate::operations;
use crate::profile::Config;
use crate::state::State;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the random source used by Cxkk
///
/// Supplies interfaces for:
/// - loading roms
/// - updating the held keys
/// - advancing the CPU by one fetch-decode-execute cycle
/// - advancing its timers, at whatever rate the host chooses
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    rng: Box<dyn RngCore>,
}

impl Chip8 {
    /// Creates a machine whose random source is seeded from `config.seed`,
    /// or from system entropy when there is none.
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, Box::new(rng))
    }

    /// Creates a machine that draws its random bytes from `rng`
    pub fn with_rng(config: Config, rng: Box<dyn RngCore>) -> Self {
        Chip8 {
            state: State::new(&config),
            rng,
        }
    }

    /// Load a rom into memory at 0x200
    ///
    /// # Arguments
    /// * `rom` the raw bytes of a ROM
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Replace the held keys and the last key pressed
    ///
    /// # Arguments
    /// * `input` bit n is set while key n is held
    /// * `last_key` the key Fx0A stores once any key is held
    pub fn update_input(&mut self, input: u16, last_key: u8) {
        self.state.input = input;
        self.state.last_key = last_key & 0xF;
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        let key = key & 0xF;
        self.update_input(self.state.input | 1u16 << key, key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.input &= !(1u16 << (key & 0xF));
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at pc and moves pc past it
    /// - decodes and executes it
    ///
    /// Does nothing once the program has exited.
    pub fn run_cycle(&mut self) -> Result<(), Chip8Error> {
        if self.state.halted {
            return Ok(());
        }

        let address = self.state.pc;
        let op = self.state.get_op()?;
        self.state.pc = address.wrapping_add(2);

        let instruction = Instruction::decode(op, self.state.profile)
            .ok_or(Chip8Error::UnsupportedOpcode { opcode: op, address })?;
        trace!(
            "{:03X}: {:04X} {:?} v{:02X?} i{:03X}",
            address,
            op,
            instruction,
            self.state.v,
            self.state.i
        );
        operations::execute(instruction, &mut self.state, self.rng.as_mut())
    }

    /// Decrements both timers, stopping at 0
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Whether a tone should currently be playing
    pub fn is_sound_timer_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// The FrameBuffer, row-major with one byte (0 or 1) per pixel
    pub fn frame_buffer(&self) -> &[u8] {
        &self.state.frame_buffer
    }

    pub fn width(&self) -> usize {
        self.state.width
    }

    pub fn height(&self) -> usize {
        self.state.height
    }

    /// Returns whether the FrameBuffer changed since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.state.draw_flag, false)
    }

    /// Whether the program ended itself with 00FD
    pub fn is_halted(&self) -> bool {
        self.state.halted
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
