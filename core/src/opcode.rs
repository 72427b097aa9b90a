/// # Opcodes
///
/// Every instruction is one big-endian 16-bit word, read as four nibbles `[o x y n]`.
/// The top nibble picks an instruction group; the rest either narrow the operation
/// down or carry its operands:
/// - `x`, `y` register indices
/// - `n` a 4-bit count (sprite height, scroll distance)
/// - `kk` an immediate byte
/// - `addr` a 12-bit address
pub trait Opcode {
    /// Joins a high and a low byte
    fn from_bytes(high: u8, low: u8) -> Self;

    /// `(o, x, y, n)`
    fn nibbles(&self) -> (u8, u8, u8, u8);

    fn x(&self) -> u8;

    fn y(&self) -> u8;

    fn n(&self) -> u8;

    fn kk(&self) -> u8;

    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn from_bytes(high: u8, low: u8) -> Self {
        u16::from(high) << 8 | u16::from(low)
    }

    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (((self & 0xF000) >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_words_are_big_endian() {
        assert_eq!(<u16 as Opcode>::from_bytes(0xD1, 0x25), 0xD125);
        assert_eq!(<u16 as Opcode>::from_bytes(0x00, 0xEE), 0x00EE);
    }

    #[test]
    fn test_draw_operands() {
        let op: u16 = 0xD12F;
        assert_eq!(op.nibbles(), (0xD, 0x1, 0x2, 0xF));
        assert_eq!((op.x(), op.y(), op.n()), (0x1, 0x2, 0xF));
    }

    #[test]
    fn test_immediate_and_address_operands() {
        assert_eq!(0x7A42u16.kk(), 0x42);
        assert_eq!(0x7A42u16.x(), 0xA);
        assert_eq!(0x2F00u16.addr(), 0xF00);
        assert_eq!(0xB123u16.addr(), 0x123);
    }
}
