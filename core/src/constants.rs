/// Bytes of addressable memory (0x000..=0xFFF)
pub const MEMORY_SIZE: usize = 0x1000;

/// Where ROMs are loaded into memory and where execution begins
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of general purpose registers (V0..VF)
pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry, borrow and collision flag
pub const FLAG_REGISTER: usize = 0xF;

/// Call stack depth of the COSMAC VIP interpreter
pub const CHIP8_STACK_SIZE: usize = 12;
/// Call stack depth of SUPER-CHIP
pub const SCHIP_STACK_SIZE: usize = 16;

pub const CHIP8_DISPLAY_WIDTH: usize = 64;
pub const CHIP8_DISPLAY_HEIGHT: usize = 32;
pub const SCHIP_DISPLAY_WIDTH: usize = 128;
pub const SCHIP_DISPLAY_HEIGHT: usize = 64;

/// Sprites drawn by Dxyn are always 8 pixels wide
pub const SPRITE_WIDTH: usize = 8;
/// Sprites drawn by SUPER-CHIP's Dxy0 are 16x16
pub const LARGE_SPRITE_SIZE: usize = 16;

/// Number of RPL user flags SUPER-CHIP can persist with Fx75/Fx85
pub const RPL_FLAG_COUNT: usize = 8;

/// Timers are nominally decremented at 60Hz
pub const TIMER_HZ: u32 = 60;

/// Default number of CPU cycles executed for every timer tick
pub const DEFAULT_CYCLES_PER_FRAME: u32 = 20;

/// Address of the small hexadecimal font
pub const FONT_ADDRESS: u16 = 0x000;
/// Each small glyph is 4x5 pixels, one byte per row
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Font
/// Sixteen 4x5 glyphs for the hexadecimal digits 0..F.
///
/// Each byte is one row and only its high nibble is drawn, e.g. the "0" glyph:
/// ```text
/// 0xF0 -> 1111
/// 0x90 -> 1001
/// 0x90 -> 1001
/// 0x90 -> 1001
/// 0xF0 -> 1111
/// ```
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Address of the wide font; appended directly after the small one
pub const LARGE_FONT_ADDRESS: u16 = FONT_ADDRESS + FONT.len() as u16;
/// Each wide glyph is 8x10 pixels, one byte per row
pub const LARGE_FONT_GLYPH_SIZE: u16 = 10;

/// SUPER-CHIP's 8x10 glyphs for the decimal digits 0..9
pub const LARGE_FONT: [u8; 100] = [
    0x3C, 0x7E, 0xE7, 0xC3, 0xC3, 0xC3, 0xC3, 0xE7, 0x7E, 0x3C, // 0
    0x18, 0x38, 0x58, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, // 1
    0x3E, 0x7F, 0xC3, 0x06, 0x0C, 0x18, 0x30, 0x60, 0xFF, 0xFF, // 2
    0x3C, 0x7E, 0xC3, 0x03, 0x0E, 0x0E, 0x03, 0xC3, 0x7E, 0x3C, // 3
    0x06, 0x0E, 0x1E, 0x36, 0x66, 0xC6, 0xFF, 0xFF, 0x06, 0x06, // 4
    0xFF, 0xFF, 0xC0, 0xC0, 0xFC, 0xFE, 0x03, 0xC3, 0x7E, 0x3C, // 5
    0x3E, 0x7C, 0xE0, 0xC0, 0xFC, 0xFE, 0xC3, 0xC3, 0x7E, 0x3C, // 6
    0xFF, 0xFF, 0x03, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x60, 0x60, // 7
    0x3C, 0x7E, 0xC3, 0xC3, 0x7E, 0x7E, 0xC3, 0xC3, 0x7E, 0x3C, // 8
    0x3C, 0x7E, 0xC3, 0xC3, 0x7F, 0x3F, 0x03, 0x03, 0x3E, 0x7C, // 9
];
