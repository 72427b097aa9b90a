pub use chip8::Chip8;
pub use error::Chip8Error;
pub use instruction::Instruction;
pub use profile::{Config, Profile};
pub use quirks::{Quirks, UnknownQuirk};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
mod profile;
mod quirks;
pub mod state;
