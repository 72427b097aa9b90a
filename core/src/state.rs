use crate::constants::{
    FLAG_REGISTER, FONT, FONT_ADDRESS, LARGE_FONT, LARGE_FONT_ADDRESS, MEMORY_SIZE,
    PROGRAM_START, REGISTER_COUNT, RPL_FLAG_COUNT, SCHIP_STACK_SIZE,
};
use crate::error::Chip8Error;
use crate::opcode::Opcode;
use crate::profile::{Config, Profile};
use crate::quirks::Quirks;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented by the host rather than per cycle
///
/// ## Memory
/// - a stack of return addresses, 12 deep (16 for SUPER-CHIP)
/// - 4096 bytes of addressable memory with the font(s) preloaded at 0x000
/// - a flat `width * height` frame buffer with one byte per pixel
///
/// ## Input
/// - a 16-bit mask of held keys 0..F
/// - the last key pressed, read by the blocking key wait
#[derive(Clone, Debug)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; SCHIP_STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub hires: bool,
    pub draw_flag: bool,
    pub halted: bool,
    pub input: u16,
    pub last_key: u8,
    pub rpl_flags: [u8; RPL_FLAG_COUNT],
    pub profile: Profile,
    pub quirks: Quirks,
}

impl State {
    pub fn new(config: &Config) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_ADDRESS as usize;
        memory[font..font + FONT.len()].copy_from_slice(&FONT);
        if config.profile.is_extended() {
            let large_font = LARGE_FONT_ADDRESS as usize;
            memory[large_font..large_font + LARGE_FONT.len()].copy_from_slice(&LARGE_FONT);
        }

        let (width, height) = config.profile.screen_size();

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; SCHIP_STACK_SIZE],
            memory,
            frame_buffer: vec![0; width * height],
            width,
            height,
            hires: false,
            draw_flag: false,
            halted: false,
            input: 0,
            last_key: 0,
            rpl_flags: [0; RPL_FLAG_COUNT],
            profile: config.profile,
            quirks: config.quirks,
        }
    }

    /// The (width, height) sprites are positioned in.
    /// SUPER-CHIP in low resolution mode draws every pixel as a 2x2 block on its larger screen.
    pub fn logical_size(&self) -> (usize, usize) {
        if self.profile.is_extended() && !self.hires {
            (self.width / 2, self.height / 2)
        } else {
            (self.width, self.height)
        }
    }

    pub fn set_flag(&mut self, value: u8) {
        self.v[FLAG_REGISTER] = value;
    }

    /// Reads `len` bytes starting at `address`
    pub fn read(&self, address: usize, len: usize) -> Result<&[u8], Chip8Error> {
        let end = bounded(address, len)?;
        Ok(&self.memory[address..end])
    }

    /// Borrows `len` bytes starting at `address` for writing
    pub fn write(&mut self, address: usize, len: usize) -> Result<&mut [u8], Chip8Error> {
        let end = bounded(address, len)?;
        Ok(&mut self.memory[address..end])
    }

    /// The big-endian word at the pc
    pub fn get_op(&self) -> Result<u16, Chip8Error> {
        let bytes = self.read(self.pc as usize, 2)?;
        Ok(u16::from_bytes(bytes[0], bytes[1]))
    }
}

/// The exclusive end of `len` bytes at `address`, or the first address past memory
fn bounded(address: usize, len: usize) -> Result<usize, Chip8Error> {
    let end = address + len;
    if end > MEMORY_SIZE {
        Err(Chip8Error::MemoryOutOfBounds {
            address: address.max(MEMORY_SIZE),
        })
    } else {
        Ok(end)
    }
}
