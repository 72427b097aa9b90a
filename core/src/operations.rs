use log::{debug, warn};
use rand::{Rng, RngCore};

use crate::constants::{
    FONT_ADDRESS, FONT_GLYPH_SIZE, LARGE_FONT_ADDRESS, LARGE_FONT_GLYPH_SIZE, LARGE_SPRITE_SIZE,
    RPL_FLAG_COUNT, SPRITE_WIDTH,
};
use crate::error::Chip8Error;
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::quirks::Quirks;
use crate::state::State;

/// Applies a decoded instruction to `state`.
///
/// The program counter has already been moved past the instruction, so every
/// control flow operation here overwrites or further adjusts it.
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    rng: &mut dyn RngCore,
) -> Result<(), Chip8Error> {
    use Instruction::*;

    match instruction {
        Nop => {}
        ClearScreen => clr(state),
        Return => rts(state),
        ScrollDown { n } => scroll_down(state, n),
        ScrollRight => scroll_right(state),
        ScrollLeft => scroll_left(state),
        Exit => exit(state),
        LowRes => set_resolution(state, false),
        HighRes => set_resolution(state, true),
        Jump { addr } => jump(state, addr),
        Call { addr } => call(state, addr)?,
        SkipEqImm { x, kk } => skip_if(state.v[x as usize] == kk, state),
        SkipNeImm { x, kk } => skip_if(state.v[x as usize] != kk, state),
        SkipEqReg { x, y } => skip_if(state.v[x as usize] == state.v[y as usize], state),
        SkipNeReg { x, y } => skip_if(state.v[x as usize] != state.v[y as usize], state),
        LoadImm { x, kk } => load(state, x, kk),
        AddImm { x, kk } => add(state, x, kk),
        Assign { x, y } => mv(state, x, y),
        Or { x, y } => logical(state, x, y, |a, b| a | b),
        And { x, y } => logical(state, x, y, |a, b| a & b),
        Xor { x, y } => logical(state, x, y, |a, b| a ^ b),
        Add { x, y } => addr(state, x, y),
        Sub { x, y } => sub(state, x, y),
        ShiftRight { x, y } => shr(state, x, y),
        SubN { x, y } => subn(state, x, y),
        ShiftLeft { x, y } => shl(state, x, y),
        LoadIndex { addr } => state.i = addr,
        JumpOffset { addr } => jumpi(state, addr),
        Random { x, kk } => rnd(state, x, kk, rng),
        Draw { x, y, n } => draw(state, x, y, n)?,
        DrawLarge { x, y } => draw_large(state, x, y)?,
        SkipKeyDown { x } => skip_if(is_pressed(state, x), state),
        SkipKeyUp { x } => skip_if(!is_pressed(state, x), state),
        LoadDelay { x } => state.v[x as usize] = state.delay_timer,
        WaitKey { x } => keyd(state, x),
        SetDelay { x } => state.delay_timer = state.v[x as usize],
        SetSound { x } => state.sound_timer = state.v[x as usize],
        AddIndex { x } => state.i = state.i.wrapping_add(u16::from(state.v[x as usize])),
        LoadFont { x } => ldspr(state, x, FONT_ADDRESS, FONT_GLYPH_SIZE),
        LoadLargeFont { x } => ldspr(state, x, LARGE_FONT_ADDRESS, LARGE_FONT_GLYPH_SIZE),
        StoreBcd { x } => bcd(state, x)?,
        StoreRegisters { x } => stor(state, x)?,
        LoadRegisters { x } => read(state, x)?,
        SaveFlags { x } => {
            let count = flag_count(x);
            state.rpl_flags[..count].copy_from_slice(&state.v[..count]);
        }
        LoadFlags { x } => {
            let count = flag_count(x);
            state.v[..count].copy_from_slice(&state.rpl_flags[..count]);
        }
    }
    Ok(())
}

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer.iter_mut().for_each(|px| *px = 0);
    state.draw_flag = true;
}

/// PC = STACK.pop()
/// Returning with nothing on the stack does nothing.
pub fn rts(state: &mut State) {
    if state.sp == 0 {
        warn!("return at {:#05X} with an empty stack ignored", state.pc.wrapping_sub(2));
        return;
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp];
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<(), Chip8Error> {
    let depth = state.profile.stack_size();
    if state.sp >= depth {
        return Err(Chip8Error::StackOverflow {
            address: state.pc.wrapping_sub(2),
            depth,
        });
    }
    state.stack[state.sp] = state.pc;
    state.sp += 1;
    state.pc = addr;
    Ok(())
}

/// if condition then pc += 2
fn skip_if(condition: bool, state: &mut State) {
    if condition {
        state.pc = state.pc.wrapping_add(2);
    }
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = kk;
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] = state.v[y as usize];
}

/// Vx = Vx op Vy for OR, AND and XOR; VF = 0 with the vfreset quirk
fn logical(state: &mut State, x: u8, y: u8, op: fn(u8, u8) -> u8) {
    state.v[x as usize] = op(state.v[x as usize], state.v[y as usize]);
    if state.quirks.contains(Quirks::VF_RESET) {
        state.set_flag(0x0);
    }
}

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: u8, y: u8) {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[x as usize] = res;
    state.set_flag(over as u8);
}

/// Vx -= Vy; VF = !underflow
pub fn sub(state: &mut State, x: u8, y: u8) {
    let (res, under) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    state.v[x as usize] = res;
    state.set_flag(!under as u8);
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(state: &mut State, x: u8, y: u8) {
    let (res, under) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    state.v[x as usize] = res;
    state.set_flag(!under as u8);
}

/// The register a shift reads from; Vx itself with the shifting quirk
fn shift_source(state: &State, x: u8, y: u8) -> u8 {
    if state.quirks.contains(Quirks::SHIFTING) {
        state.v[x as usize]
    } else {
        state.v[y as usize]
    }
}

/// Vx = Vy >> 1; VF = shifted out bit
pub fn shr(state: &mut State, x: u8, y: u8) {
    let src = shift_source(state, x, y);
    state.v[x as usize] = src >> 1;
    state.set_flag(src & 0x1);
}

/// Vx = Vy << 1; VF = shifted out bit
pub fn shl(state: &mut State, x: u8, y: u8) {
    let src = shift_source(state, x, y);
    state.v[x as usize] = src << 1;
    state.set_flag(src >> 7);
}

/// PC = V0 + addr, or Vx + addr with the jumping quirk
pub fn jumpi(state: &mut State, addr: u16) {
    let register = if state.quirks.contains(Quirks::JUMPING) {
        addr.x()
    } else {
        0x0
    };
    state.pc = addr + u16::from(state.v[register as usize]);
}

/// Vx = rand_byte & kk
pub fn rnd(state: &mut State, x: u8, kk: u8, rng: &mut dyn RngCore) {
    let rand_byte: u8 = rng.gen();
    state.v[x as usize] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs an 8 pixel wide sprite from memory i..i+n at position Vx, Vy on the FrameBuffer.
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<(), Chip8Error> {
    let mut rows = [0u16; LARGE_SPRITE_SIZE];
    let n = n as usize;
    for (row, byte) in rows.iter_mut().zip(state.read(state.i as usize, n)?) {
        *row = u16::from(*byte) << 8;
    }
    blit(state, x, y, &rows[..n], SPRITE_WIDTH);
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=16x16)
/// XORs a 16x16 sprite stored as 16 big-endian words from memory i..i+32.
pub fn draw_large(state: &mut State, x: u8, y: u8) -> Result<(), Chip8Error> {
    let mut rows = [0u16; LARGE_SPRITE_SIZE];
    let bytes = state.read(state.i as usize, LARGE_SPRITE_SIZE * 2)?;
    for (row, word) in rows.iter_mut().zip(bytes.chunks_exact(2)) {
        *row = u16::from_bytes(word[0], word[1]);
    }
    blit(state, x, y, &rows, LARGE_SPRITE_SIZE);
    Ok(())
}

/// XORs left-aligned sprite rows onto the FrameBuffer.
///
/// The origin always lands on screen; pixels past the right or bottom edge
/// wrap around unless the clipping quirk drops them.
/// On the base machine VF is set if any lit pixel was erased; SUPER-CHIP
/// instead counts every erased pixel.
fn blit(state: &mut State, x: u8, y: u8, rows: &[u16], sprite_width: usize) {
    let (width, height) = state.logical_size();
    let scale = state.width / width;
    let clip = state.quirks.contains(Quirks::CLIPPING);
    let origin_x = state.v[x as usize] as usize % width;
    let origin_y = state.v[y as usize] as usize % height;

    let mut collisions: u8 = 0;
    for (row, bits) in rows.iter().enumerate() {
        let mut py = origin_y + row;
        if py >= height {
            if clip {
                continue;
            }
            py %= height;
        }

        for col in 0..sprite_width {
            if bits & (0x8000 >> col) == 0 {
                continue;
            }
            let mut px = origin_x + col;
            if px >= width {
                if clip {
                    continue;
                }
                px %= width;
            }
            if toggle_pixel(state, px, py, scale) {
                collisions = collisions.saturating_add(1);
            }
        }
    }

    let flag = if state.profile.is_extended() {
        collisions
    } else {
        (collisions > 0) as u8
    };
    state.set_flag(flag);
    state.draw_flag = true;
}

/// XORs a logical pixel, covering a `scale` x `scale` block of the FrameBuffer.
/// Returns whether the pixel was lit before.
fn toggle_pixel(state: &mut State, px: usize, py: usize, scale: usize) -> bool {
    let stride = state.width;
    let origin = py * scale * stride + px * scale;
    let was_lit = state.frame_buffer[origin] == 1;
    for dy in 0..scale {
        for dx in 0..scale {
            state.frame_buffer[origin + dy * stride + dx] ^= 1;
        }
    }
    was_lit
}

/// Physical pixels moved per logical pixel in the current mode
fn scale(state: &State) -> usize {
    state.width / state.logical_size().0
}

/// scroll the FrameBuffer down by n rows (2n in low resolution)
pub fn scroll_down(state: &mut State, n: u8) {
    let shift = (n as usize * scale(state) * state.width).min(state.frame_buffer.len());
    let len = state.frame_buffer.len();
    state.frame_buffer.copy_within(0..len - shift, shift);
    state.frame_buffer[..shift].iter_mut().for_each(|px| *px = 0);
    state.draw_flag = true;
}

/// scroll the FrameBuffer right by 4 pixels (8 in low resolution)
pub fn scroll_right(state: &mut State) {
    let shift = 4 * scale(state);
    let width = state.width;
    for row in state.frame_buffer.chunks_exact_mut(width) {
        row.copy_within(0..width - shift, shift);
        row[..shift].iter_mut().for_each(|px| *px = 0);
    }
    state.draw_flag = true;
}

/// scroll the FrameBuffer left by 4 pixels (8 in low resolution)
pub fn scroll_left(state: &mut State) {
    let shift = 4 * scale(state);
    let width = state.width;
    for row in state.frame_buffer.chunks_exact_mut(width) {
        row.copy_within(shift.., 0);
        row[width - shift..].iter_mut().for_each(|px| *px = 0);
    }
    state.draw_flag = true;
}

/// stop executing
pub fn exit(state: &mut State) {
    debug!("exit requested at {:#05X}", state.pc.wrapping_sub(2));
    state.halted = true;
}

/// switch between 128x64 and doubled 64x32 drawing
pub fn set_resolution(state: &mut State, hires: bool) {
    debug!("switching to {} resolution", if hires { "high" } else { "low" });
    state.hires = hires;
}

fn is_pressed(state: &State, x: u8) -> bool {
    let key = state.v[x as usize] & 0xF;
    state.input & (1u16 << key) != 0
}

/// await keypress for Vx
/// With no key held the pc is rewound so this instruction runs again next cycle.
pub fn keyd(state: &mut State, x: u8) {
    if state.input == 0 {
        state.pc = state.pc.wrapping_sub(2);
    } else {
        state.v[x as usize] = state.last_key;
    }
}

/// I = base + (Vx & 0xF) * glyph_size
/// Set I to the memory address of the font glyph for the low nibble of Vx
pub fn ldspr(state: &mut State, x: u8, base: u16, glyph_size: u16) {
    let digit = u16::from(state.v[x as usize] & 0xF);
    state.i = base + digit * glyph_size;
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) -> Result<(), Chip8Error> {
    let vx = state.v[x as usize];
    let digits = [vx / 100 % 10, vx / 10 % 10, vx % 10];
    state.write(state.i as usize, 3)?.copy_from_slice(&digits);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
/// I += x + 1 unless the memory quirk is set
pub fn stor(state: &mut State, x: u8) -> Result<(), Chip8Error> {
    let count = x as usize + 1;
    let registers = state.v;
    state
        .write(state.i as usize, count)?
        .copy_from_slice(&registers[..count]);
    advance_index(state, x);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
/// I += x + 1 unless the memory quirk is set
pub fn read(state: &mut State, x: u8) -> Result<(), Chip8Error> {
    let count = x as usize + 1;
    let mut registers = [0u8; 16];
    registers[..count].copy_from_slice(state.read(state.i as usize, count)?);
    state.v[..count].copy_from_slice(&registers[..count]);
    advance_index(state, x);
    Ok(())
}

fn advance_index(state: &mut State, x: u8) {
    if !state.quirks.contains(Quirks::MEMORY) {
        state.i = state.i.wrapping_add(u16::from(x) + 1);
    }
}

fn flag_count(x: u8) -> usize {
    (x as usize).min(RPL_FLAG_COUNT - 1) + 1
}

#[cfg(test)]
mod test_operations {
    use super::*;
    use crate::profile::{Config, Profile};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_with(profile: Profile, quirks: Quirks) -> State {
        State::new(&Config {
            profile,
            quirks,
            seed: None,
        })
    }

    fn chip8() -> State {
        state_with(Profile::Chip8, Quirks::empty())
    }

    /// Decodes and executes `op` as if it had just been fetched from 0x200
    fn run(state: &mut State, op: u16) -> Result<(), Chip8Error> {
        let instruction = Instruction::decode(op, state.profile).expect("supported opcode");
        state.pc += 2;
        execute(instruction, state, &mut StdRng::seed_from_u64(0))
    }

    fn lit(state: &State) -> usize {
        state.frame_buffer.iter().filter(|px| **px == 1).count()
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = chip8();
        state.frame_buffer[0] = 1;
        run(&mut state, 0x00E0).unwrap();
        assert_eq!(state.frame_buffer[0], 0);
        assert!(state.draw_flag);
    }

    #[test]
    fn test_2nnn_call_then_00ee_ret() {
        let mut state = chip8();
        run(&mut state, 0x2ABC).unwrap();
        assert_eq!(state.sp, 1);
        assert_eq!(state.stack[0], 0x202);
        assert_eq!(state.pc, 0xABC);
        run(&mut state, 0x00EE).unwrap();
        assert_eq!(state.sp, 0);
        // + 2 for the fetch of the return itself
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_00ee_ret_with_empty_stack_is_ignored() {
        let mut state = chip8();
        run(&mut state, 0x00EE).unwrap();
        assert_eq!(state.sp, 0);
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_2nnn_call_overflows_at_stack_size() {
        let mut state = chip8();
        for _ in 0..12 {
            state.pc = 0x200;
            run(&mut state, 0x2200).unwrap();
        }
        state.pc = 0x200;
        assert_eq!(
            run(&mut state, 0x2200),
            Err(Chip8Error::StackOverflow {
                address: 0x200,
                depth: 12
            })
        );
    }

    #[test]
    fn test_superchip_stack_is_deeper() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        for _ in 0..16 {
            state.pc = 0x200;
            run(&mut state, 0x2200).unwrap();
        }
        assert_eq!(state.sp, 16);
        assert!(run(&mut state, 0x2200).is_err());
    }

    #[test]
    fn test_1nnn_jp_ignores_registers() {
        let mut state = chip8();
        state.v = [0xFF; 16];
        run(&mut state, 0x1ABC).unwrap();
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_3xkk_se() {
        let mut state = chip8();
        state.v[0x1] = 0x11;
        run(&mut state, 0x3111).unwrap();
        assert_eq!(state.pc, 0x0204);

        let mut state = chip8();
        run(&mut state, 0x3111).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_4xkk_sne() {
        let mut state = chip8();
        run(&mut state, 0x4111).unwrap();
        assert_eq!(state.pc, 0x0204);

        let mut state = chip8();
        state.v[0x1] = 0x11;
        run(&mut state, 0x4111).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_5xy0_and_9xy0_compare_registers() {
        let mut state = chip8();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        run(&mut state, 0x5120).unwrap();
        assert_eq!(state.pc, 0x0204);

        let mut state = chip8();
        state.v[0x1] = 0x11;
        run(&mut state, 0x9120).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_6xkk_ld_and_7xkk_add_wraps_without_flag() {
        let mut state = chip8();
        run(&mut state, 0x61FF).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        run(&mut state, 0x7102).unwrap();
        assert_eq!(state.v[0x1], 0x01);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy1_8xy2_8xy3_bitwise() {
        let mut state = chip8();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        state.v[0xF] = 0x9;
        run(&mut state, 0x8121).unwrap();
        assert_eq!(state.v[0x1], 0x7);
        run(&mut state, 0x8122).unwrap();
        assert_eq!(state.v[0x1], 0x3);
        run(&mut state, 0x8123).unwrap();
        assert_eq!(state.v[0x1], 0x0);
        // VF is left alone without the vfreset quirk
        assert_eq!(state.v[0xF], 0x9);
    }

    #[test]
    fn test_bitwise_resets_vf_with_quirk() {
        for op in [0x8121, 0x8122, 0x8123] {
            let mut state = state_with(Profile::Chip8, Quirks::VF_RESET);
            state.v[0xF] = 0x9;
            run(&mut state, op).unwrap();
            assert_eq!(state.v[0xF], 0x0, "{:04X}", op);
        }
    }

    #[test]
    fn test_8xy4_add_sets_carry_iff_sum_exceeds_255() {
        for a in (0..=255u16).step_by(15) {
            for b in (0..=255u16).step_by(17) {
                let mut state = chip8();
                state.v[0x1] = a as u8;
                state.v[0x2] = b as u8;
                run(&mut state, 0x8124).unwrap();
                assert_eq!(state.v[0x1], ((a + b) % 256) as u8);
                assert_eq!(state.v[0xF], (a + b > 255) as u8);
            }
        }
    }

    #[test]
    fn test_8xy5_sub_sets_flag_iff_no_borrow() {
        for a in (0..=255i16).step_by(15) {
            for b in (0..=255i16).step_by(17) {
                let mut state = chip8();
                state.v[0x1] = a as u8;
                state.v[0x2] = b as u8;
                run(&mut state, 0x8125).unwrap();
                assert_eq!(state.v[0x1], (a - b).rem_euclid(256) as u8);
                assert_eq!(state.v[0xF], (a >= b) as u8);
            }
        }
    }

    #[test]
    fn test_8xy7_subn_reverses_operands() {
        let mut state = chip8();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x33;
        run(&mut state, 0x8127).unwrap();
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);

        let mut state = chip8();
        state.v[0x1] = 0x12;
        state.v[0x2] = 0x11;
        run(&mut state, 0x8127).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_flag_wins_when_vf_is_the_destination() {
        let mut state = chip8();
        state.v[0xF] = 0xFF;
        state.v[0x1] = 0x01;
        run(&mut state, 0x8F14).unwrap();
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr_reads_vy() {
        let mut state = chip8();
        state.v[0x2] = 0b0000_0011;
        run(&mut state, 0x8126).unwrap();
        assert_eq!(state.v[0x1], 0x1);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr_in_place_with_quirk() {
        let mut state = state_with(Profile::Chip8, Quirks::SHIFTING);
        state.v[0x1] = 0x4;
        state.v[0x2] = 0xFF;
        run(&mut state, 0x8126).unwrap();
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl() {
        let mut state = chip8();
        state.v[0x2] = 0xFF;
        run(&mut state, 0x812E).unwrap();
        assert_eq!(state.v[0x1], 0xFE);
        assert_eq!(state.v[0xF], 0x1);

        let mut state = state_with(Profile::Chip8, Quirks::SHIFTING);
        state.v[0x1] = 0x4;
        run(&mut state, 0x812E).unwrap();
        assert_eq!(state.v[0x1], 0x8);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = chip8();
        run(&mut state, 0xAABC).unwrap();
        assert_eq!(state.i, 0xABC);
    }

    #[test]
    fn test_bnnn_jp_adds_v0() {
        let mut state = chip8();
        state.v[0x0] = 0x2;
        state.v[0xA] = 0x40;
        run(&mut state, 0xBABC).unwrap();
        assert_eq!(state.pc, 0xABE);
    }

    #[test]
    fn test_bxnn_jp_adds_vx_with_quirk() {
        let mut state = state_with(Profile::Chip8, Quirks::JUMPING);
        state.v[0x0] = 0x2;
        state.v[0xA] = 0x40;
        run(&mut state, 0xBABC).unwrap();
        assert_eq!(state.pc, 0xAFC);
    }

    #[test]
    fn test_cxkk_rnd_is_masked() {
        let mut state = chip8();
        for _ in 0..32 {
            run(&mut state, 0xC10F).unwrap();
            assert_eq!(state.v[0x1] & 0xF0, 0x0);
        }
        run(&mut state, 0xC100).unwrap();
        assert_eq!(state.v[0x1], 0x0);
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = chip8();
        state.v[0x0] = 0x1;
        // Draw the 0x0 sprite with a 1x 1y offset
        run(&mut state, 0xD005).unwrap();
        let row = |y: usize| &state.frame_buffer[y * 64 + 1..y * 64 + 5];
        assert_eq!(row(1), [1, 1, 1, 1]);
        assert_eq!(row(2), [1, 0, 0, 1]);
        assert_eq!(row(3), [1, 0, 0, 1]);
        assert_eq!(row(4), [1, 0, 0, 1]);
        assert_eq!(row(5), [1, 1, 1, 1]);
        assert_eq!(lit(&state), 14);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_dxyn_drw_xors() {
        let mut state = chip8();
        // 0 1 0 1 -> Set
        state.frame_buffer[2..6].copy_from_slice(&[0, 1, 0, 1]);
        // 1 1 1 1 -> Draw xor (top row of the 0 glyph drawn at 2, 0)
        state.v[0x1] = 0x2;
        run(&mut state, 0xD121).unwrap();
        assert_eq!(state.frame_buffer[2..6], [1, 0, 1, 0]);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_drawing_twice_restores_the_screen() {
        let mut state = chip8();
        state.v[0x1] = 10;
        state.v[0x2] = 7;
        state.i = 0x0A * 5;
        run(&mut state, 0xD125).unwrap();
        assert_eq!(state.v[0xF], 0x0);
        assert!(lit(&state) > 0);
        run(&mut state, 0xD125).unwrap();
        assert_eq!(state.v[0xF], 0x1);
        assert_eq!(lit(&state), 0);
        // a third draw on the now clear region collides with nothing
        run(&mut state, 0xD125).unwrap();
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_dxyn_origin_wraps_onto_screen() {
        let mut state = chip8();
        // 64 + 3 lands on column 3, 32 + 2 on row 2
        state.v[0x1] = 67;
        state.v[0x2] = 34;
        state.memory[0x300] = 0x80;
        state.i = 0x300;
        run(&mut state, 0xD121).unwrap();
        assert_eq!(state.frame_buffer[2 * 64 + 3], 1);
    }

    #[test]
    fn test_dxyn_wraps_past_the_edges() {
        let mut state = chip8();
        state.v[0x1] = 62;
        state.v[0x2] = 31;
        state.memory[0x300..0x302].copy_from_slice(&[0xF0, 0xF0]);
        state.i = 0x300;
        run(&mut state, 0xD122).unwrap();
        assert_eq!(state.frame_buffer[31 * 64 + 62..31 * 64 + 64], [1, 1]);
        assert_eq!(state.frame_buffer[31 * 64..31 * 64 + 2], [1, 1]);
        assert_eq!(state.frame_buffer[62..64], [1, 1]);
        assert_eq!(state.frame_buffer[0..2], [1, 1]);
        assert_eq!(lit(&state), 8);
    }

    #[test]
    fn test_dxyn_clips_past_the_edges_with_quirk() {
        let mut state = state_with(Profile::Chip8, Quirks::CLIPPING);
        state.v[0x1] = 62;
        state.v[0x2] = 31;
        state.memory[0x300..0x302].copy_from_slice(&[0xF0, 0xF0]);
        state.i = 0x300;
        run(&mut state, 0xD122).unwrap();
        assert_eq!(state.frame_buffer[31 * 64 + 62..31 * 64 + 64], [1, 1]);
        assert_eq!(lit(&state), 2);
    }

    #[test]
    fn test_dxyn_reading_past_memory_fails() {
        let mut state = chip8();
        state.i = 0xFFE;
        assert_eq!(
            run(&mut state, 0xD005),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn test_superchip_lowres_draws_doubled_pixels() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        state.memory[0x300] = 0x80;
        state.i = 0x300;
        state.v[0x1] = 1;
        state.v[0x2] = 1;
        run(&mut state, 0xD121).unwrap();
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            assert_eq!(state.frame_buffer[y * 128 + x], 1, "({}, {})", x, y);
        }
        assert_eq!(lit(&state), 4);
    }

    #[test]
    fn test_superchip_counts_colliding_pixels() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        run(&mut state, 0x00FF).unwrap();
        state.memory[0x300..0x303].copy_from_slice(&[0xC0, 0x80, 0x00]);
        state.i = 0x300;
        run(&mut state, 0xD123).unwrap();
        assert_eq!(state.v[0xF], 0);
        // two pixels collide in the first row and one in the second
        run(&mut state, 0xD123).unwrap();
        assert_eq!(state.v[0xF], 3);
    }

    #[test]
    fn test_superchip_counts_every_pixel_in_a_row() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        run(&mut state, 0x00FF).unwrap();
        state.memory[0x300] = 0xC0;
        state.i = 0x300;
        run(&mut state, 0xD121).unwrap();
        run(&mut state, 0xD121).unwrap();
        assert_eq!(state.v[0xF], 2);
    }

    #[test]
    fn test_superchip_collision_count_saturates() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        run(&mut state, 0x00FF).unwrap();
        state.memory[0x300..0x320].copy_from_slice(&[0xFF; 32]);
        state.i = 0x300;
        run(&mut state, 0xD120).unwrap();
        run(&mut state, 0xD120).unwrap();
        assert_eq!(state.v[0xF], 0xFF);
        assert_eq!(lit(&state), 0);
    }

    #[test]
    fn test_superchip_dxy0_draws_16x16() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        run(&mut state, 0x00FF).unwrap();
        state.memory[0x300..0x320].copy_from_slice(&[0xFF; 32]);
        state.i = 0x300;
        run(&mut state, 0xD120).unwrap();
        assert_eq!(lit(&state), 256);
        assert_eq!(state.frame_buffer[15 * 128 + 15], 1);
        assert_eq!(state.frame_buffer[16 * 128 + 16], 0);
    }

    #[test]
    fn test_superchip_lowres_wraps_blocks_past_the_right_edge() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        state.memory[0x300] = 0xC0;
        state.i = 0x300;
        state.v[0x1] = 63;
        run(&mut state, 0xD121).unwrap();
        // logical column 63 is the last block, column 64 wraps to the first
        for px in [126, 127, 128 + 126, 128 + 127, 0, 1, 128, 129] {
            assert_eq!(state.frame_buffer[px], 1, "{}", px);
        }
        assert_eq!(lit(&state), 8);
    }

    #[test]
    fn test_superchip_lowres_clips_blocks_with_quirk() {
        let mut state = state_with(Profile::SuperChip, Quirks::CLIPPING);
        state.memory[0x300] = 0xC0;
        state.i = 0x300;
        state.v[0x1] = 63;
        run(&mut state, 0xD121).unwrap();
        for px in [126, 127, 128 + 126, 128 + 127] {
            assert_eq!(state.frame_buffer[px], 1, "{}", px);
        }
        assert_eq!(state.frame_buffer[0], 0);
        assert_eq!(lit(&state), 4);
    }

    #[test]
    fn test_superchip_dxy0_wraps_past_the_corner() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        run(&mut state, 0x00FF).unwrap();
        state.memory[0x300..0x320].copy_from_slice(&[0xFF; 32]);
        state.i = 0x300;
        state.v[0x1] = 120;
        state.v[0x2] = 60;
        run(&mut state, 0xD120).unwrap();
        assert_eq!(lit(&state), 256);
        assert_eq!(state.frame_buffer[60 * 128 + 120], 1);
        // the bottom right corner of the sprite lands at (7, 11)
        assert_eq!(state.frame_buffer[11 * 128 + 7], 1);
        assert_eq!(state.frame_buffer[12 * 128 + 7], 0);
        assert_eq!(state.frame_buffer[11 * 128 + 8], 0);
    }

    #[test]
    fn test_superchip_dxy0_clips_past_the_corner_with_quirk() {
        let mut state = state_with(Profile::SuperChip, Quirks::CLIPPING);
        run(&mut state, 0x00FF).unwrap();
        state.memory[0x300..0x320].copy_from_slice(&[0xFF; 32]);
        state.i = 0x300;
        state.v[0x1] = 120;
        state.v[0x2] = 60;
        run(&mut state, 0xD120).unwrap();
        assert_eq!(lit(&state), 8 * 4);
        assert_eq!(state.frame_buffer[0], 0);
    }

    #[test]
    fn test_superchip_scrolls() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        run(&mut state, 0x00FF).unwrap();
        state.frame_buffer[0] = 1;
        run(&mut state, 0x00C3).unwrap();
        assert_eq!(state.frame_buffer[3 * 128], 1);
        run(&mut state, 0x00FB).unwrap();
        assert_eq!(state.frame_buffer[3 * 128 + 4], 1);
        run(&mut state, 0x00FC).unwrap();
        assert_eq!(state.frame_buffer[3 * 128], 1);
        run(&mut state, 0x00FC).unwrap();
        assert_eq!(lit(&state), 0);
    }

    #[test]
    fn test_superchip_lowres_scrolls_twice_as_far() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        state.frame_buffer[0] = 1;
        run(&mut state, 0x00C1).unwrap();
        assert_eq!(state.frame_buffer[2 * 128], 1);
        run(&mut state, 0x00FB).unwrap();
        assert_eq!(state.frame_buffer[2 * 128 + 8], 1);
    }

    #[test]
    fn test_superchip_exit_halts() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        run(&mut state, 0x00FD).unwrap();
        assert!(state.halted);
    }

    #[test]
    fn test_ex9e_and_exa1_test_the_low_nibble_of_vx() {
        let mut state = chip8();
        state.input = 1 << 0xE;
        state.v[0x1] = 0xFE;
        run(&mut state, 0xE19E).unwrap();
        assert_eq!(state.pc, 0x0204);

        let mut state = chip8();
        state.input = 1 << 0xE;
        state.v[0x1] = 0xE;
        run(&mut state, 0xE1A1).unwrap();
        assert_eq!(state.pc, 0x0202);

        let mut state = chip8();
        run(&mut state, 0xE1A1).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_timer_transfers() {
        let mut state = chip8();
        state.v[0x1] = 0xF;
        run(&mut state, 0xF115).unwrap();
        run(&mut state, 0xF118).unwrap();
        assert_eq!(state.delay_timer, 0xF);
        assert_eq!(state.sound_timer, 0xF);
        state.delay_timer = 0x3;
        run(&mut state, 0xF207).unwrap();
        assert_eq!(state.v[0x2], 0x3);
    }

    #[test]
    fn test_fx0a_rewinds_until_a_key_is_held() {
        let mut state = chip8();
        run(&mut state, 0xF10A).unwrap();
        assert_eq!(state.pc, 0x200);

        state.input = 1 << 0x7;
        state.last_key = 0x7;
        run(&mut state, 0xF10A).unwrap();
        assert_eq!(state.pc, 0x202);
        assert_eq!(state.v[0x1], 0x7);
    }

    #[test]
    fn test_fx1e_add_has_no_flag() {
        let mut state = chip8();
        state.i = 0xFFF;
        state.v[0x1] = 0x1;
        run(&mut state, 0xF11E).unwrap();
        assert_eq!(state.i, 0x1000);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_fx29_ld_uses_low_nibble() {
        let mut state = chip8();
        state.v[0x1] = 0x12;
        run(&mut state, 0xF129).unwrap();
        assert_eq!(state.i, 0xA);
    }

    #[test]
    fn test_fx30_ld_large_font() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        state.v[0x1] = 0x3;
        run(&mut state, 0xF130).unwrap();
        assert_eq!(state.i, 0x050 + 30);
        assert_eq!(state.memory[state.i as usize], 0x3C);
    }

    #[test]
    fn test_fx33_bcd() {
        let mut state = chip8();
        // 0x7B -> 123
        state.v[0x1] = 0x7B;
        state.i = 0x300;
        run(&mut state, 0xF133).unwrap();
        assert_eq!(state.memory[0x300..0x303], [0x1, 0x2, 0x3]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx55_stor_advances_i() {
        let mut state = chip8();
        state.i = 0x300;
        state.v[0x0..0x5].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        run(&mut state, 0xF455).unwrap();
        assert_eq!(state.memory[0x300..0x305], [0x1, 0x2, 0x3, 0x4, 0x5]);
        assert_eq!(state.memory[0x305], 0x0);
        assert_eq!(state.i, 0x305);
    }

    #[test]
    fn test_fx65_read_keeps_i_with_quirk() {
        let mut state = state_with(Profile::Chip8, Quirks::MEMORY);
        state.i = 0x300;
        state.memory[0x300..0x305].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        run(&mut state, 0xF465).unwrap();
        assert_eq!(state.v[0x0..0x5], [0x1, 0x2, 0x3, 0x4, 0x5]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_block_transfer_past_memory_fails() {
        let mut state = chip8();
        state.i = 0xFFC;
        assert_eq!(
            run(&mut state, 0xFF55),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn test_fx75_fx85_round_trip_rpl_flags() {
        let mut state = state_with(Profile::SuperChip, Quirks::empty());
        state.v[0x0..0x3].copy_from_slice(&[0x9, 0x8, 0x7]);
        run(&mut state, 0xF275).unwrap();
        state.v = [0; 16];
        run(&mut state, 0xFF85).unwrap();
        assert_eq!(state.v[0x0..0x3], [0x9, 0x8, 0x7]);
    }
}
