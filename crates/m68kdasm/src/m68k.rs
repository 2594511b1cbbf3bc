//! M680x0 instruction decoding.
//!
//! A 64K-entry table maps every opcode word to the most specific matching
//! pattern; the pattern's handler then pulls extension words from an
//! [`InstructionStream`] and renders Motorola-syntax text. Opcodes the
//! selected CPU lacks render as `dc.w` data.

pub mod addressing;
pub mod decode;
pub mod handlers;
pub mod hex;
pub mod instruction;
pub mod opcodes;
pub mod stream;
pub mod variants;

pub use decode::{
    disassemble, disassemble_raw, is_valid_instruction, valid_opcode_count, Disassembly,
    StepFlag, DASMFLAG_LENGTHMASK, DASMFLAG_STEP_OUT, DASMFLAG_STEP_OVER, DASMFLAG_SUPPORTED,
};
pub use opcodes::{build_opcode_table, OpcodeTable};
pub use stream::{InstructionStream, MemoryImage};
pub use variants::{CpuSet, CpuType};
