use crate::opcode::Opcode;
use crate::profile::Profile;

/// A decoded opcode along with the operands its operation needs.
///
/// `x` and `y` name registers, `kk` is an immediate byte and `addr` a 12-bit address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 0nnn forms without a handler; time passes but nothing happens
    Nop,
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 00Cn (SUPER-CHIP)
    ScrollDown { n: u8 },
    /// 00FB (SUPER-CHIP)
    ScrollRight,
    /// 00FC (SUPER-CHIP)
    ScrollLeft,
    /// 00FD (SUPER-CHIP)
    Exit,
    /// 00FE (SUPER-CHIP)
    LowRes,
    /// 00FF (SUPER-CHIP)
    HighRes,
    /// 1nnn
    Jump { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    SkipEqImm { x: u8, kk: u8 },
    /// 4xkk
    SkipNeImm { x: u8, kk: u8 },
    /// 5xy0
    SkipEqReg { x: u8, y: u8 },
    /// 6xkk
    LoadImm { x: u8, kk: u8 },
    /// 7xkk
    AddImm { x: u8, kk: u8 },
    /// 8xy0
    Assign { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    Add { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8xy6
    ShiftRight { x: u8, y: u8 },
    /// 8xy7
    SubN { x: u8, y: u8 },
    /// 8xyE
    ShiftLeft { x: u8, y: u8 },
    /// 9xy0
    SkipNeReg { x: u8, y: u8 },
    /// Annn
    LoadIndex { addr: u16 },
    /// Bnnn
    JumpOffset { addr: u16 },
    /// Cxkk
    Random { x: u8, kk: u8 },
    /// Dxyn
    Draw { x: u8, y: u8, n: u8 },
    /// Dxy0 (SUPER-CHIP)
    DrawLarge { x: u8, y: u8 },
    /// Ex9E
    SkipKeyDown { x: u8 },
    /// ExA1
    SkipKeyUp { x: u8 },
    /// Fx07
    LoadDelay { x: u8 },
    /// Fx0A
    WaitKey { x: u8 },
    /// Fx15
    SetDelay { x: u8 },
    /// Fx18
    SetSound { x: u8 },
    /// Fx1E
    AddIndex { x: u8 },
    /// Fx29
    LoadFont { x: u8 },
    /// Fx30 (SUPER-CHIP)
    LoadLargeFont { x: u8 },
    /// Fx33
    StoreBcd { x: u8 },
    /// Fx55
    StoreRegisters { x: u8 },
    /// Fx65
    LoadRegisters { x: u8 },
    /// Fx75 (SUPER-CHIP)
    SaveFlags { x: u8 },
    /// Fx85 (SUPER-CHIP)
    LoadFlags { x: u8 },
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode.
    ///
    /// Returns `None` when the opcode has no handler in `profile`.
    pub fn decode(op: u16, profile: Profile) -> Option<Instruction> {
        use Instruction::*;

        let schip = profile.is_extended();
        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());

        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => ClearScreen,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x0, 0x0, 0xC, _) if schip => ScrollDown { n },
            (0x0, 0x0, 0xF, 0xB) if schip => ScrollRight,
            (0x0, 0x0, 0xF, 0xC) if schip => ScrollLeft,
            (0x0, 0x0, 0xF, 0xD) if schip => Exit,
            (0x0, 0x0, 0xF, 0xE) if schip => LowRes,
            (0x0, 0x0, 0xF, 0xF) if schip => HighRes,
            (0x0, ..) => Nop,
            (0x1, ..) => Jump { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => SkipEqImm { x, kk },
            (0x4, ..) => SkipNeImm { x, kk },
            (0x5, .., 0x0) => SkipEqReg { x, y },
            (0x5, ..) => Nop,
            (0x6, ..) => LoadImm { x, kk },
            (0x7, ..) => AddImm { x, kk },
            (0x8, .., 0x0) => Assign { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => Add { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x, y },
            (0x8, .., 0x7) => SubN { x, y },
            (0x8, .., 0xE) => ShiftLeft { x, y },
            (0x9, .., 0x0) => SkipNeReg { x, y },
            (0x9, ..) => Nop,
            (0xA, ..) => LoadIndex { addr },
            (0xB, ..) => JumpOffset { addr },
            (0xC, ..) => Random { x, kk },
            (0xD, .., 0x0) if schip => DrawLarge { x, y },
            (0xD, ..) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => SkipKeyDown { x },
            (0xE, _, 0xA, 0x1) => SkipKeyUp { x },
            (0xF, _, 0x0, 0x7) => LoadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadFont { x },
            (0xF, _, 0x3, 0x0) if schip => LoadLargeFont { x },
            (0xF, _, 0x3, 0x3) => StoreBcd { x },
            (0xF, _, 0x5, 0x5) => StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => LoadRegisters { x },
            (0xF, _, 0x7, 0x5) if schip => SaveFlags { x },
            (0xF, _, 0x8, 0x5) if schip => LoadFlags { x },
            _ => return None,
        };
        Some(instruction)
    }
}
