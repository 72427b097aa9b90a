/// Fatal conditions raised while loading or running a program.
///
/// Every variant stops the machine; the host is expected to report it and end the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Chip8Error {
    #[error("unsupported opcode {opcode:#06X} at {address:#05X}")]
    UnsupportedOpcode { opcode: u16, address: u16 },

    #[error("stack overflow: call at {address:#05X} exceeds a depth of {depth}")]
    StackOverflow { address: u16, depth: usize },

    #[error("memory access out of bounds at {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },
}
