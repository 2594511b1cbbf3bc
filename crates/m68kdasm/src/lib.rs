pub mod error;
pub mod m68k;
pub mod output;

pub use error::Error;
pub use m68k::instruction::{Condition, InstructionKind, Size};
pub use m68k::{
    build_opcode_table, disassemble, disassemble_raw, is_valid_instruction, valid_opcode_count,
    CpuSet, CpuType, Disassembly, InstructionStream, MemoryImage, OpcodeTable, StepFlag,
    DASMFLAG_LENGTHMASK, DASMFLAG_STEP_OUT, DASMFLAG_STEP_OVER, DASMFLAG_SUPPORTED,
};
pub use output::{
    format_disassembly, generate_listing, FormatOptions, FormattedInstruction, ListingLine,
    ListingOptions,
};
