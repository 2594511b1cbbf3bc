use std::sync::OnceLock;

use log::trace;

use super::opcodes::{build_opcode_table, OpcodeTable};
use super::stream::InstructionStream;
use super::variants::CpuType;
use crate::error::Error;

/// Packed-result flag: the disassembler supports step information.
pub const DASMFLAG_SUPPORTED: u32 = 0x8000_0000;
/// Packed-result flag: the instruction returns from a subroutine or exception.
pub const DASMFLAG_STEP_OUT: u32 = 0x4000_0000;
/// Packed-result flag: the instruction calls a subroutine or may trap.
pub const DASMFLAG_STEP_OVER: u32 = 0x2000_0000;
/// Packed-result mask selecting the consumed byte count.
pub const DASMFLAG_LENGTHMASK: u32 = 0x0000_ffff;

/// Debugger stepping hint attached to a decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepFlag {
    #[default]
    None,
    /// Call-like: bsr, jsr, dbcc, chk, trapcc, trapv.
    StepOver,
    /// Return-like: rts, rte, rtr, rtd, rtm.
    StepOut,
}

impl StepFlag {
    pub fn bits(self) -> u32 {
        match self {
            StepFlag::None => 0,
            StepFlag::StepOver => DASMFLAG_STEP_OVER,
            StepFlag::StepOut => DASMFLAG_STEP_OUT,
        }
    }
}

/// One disassembled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    /// Address of the opcode word.
    pub address: u32,
    /// The opcode word.
    pub opcode: u16,
    /// Motorola-syntax text, e.g. `move.l  D0, (A1)+`.
    pub text: String,
    /// Bytes consumed, opcode word included.
    pub length: u32,
    pub step: StepFlag,
    /// CPU the instruction was decoded for.
    pub cpu: CpuType,
}

impl Disassembly {
    /// Length and step bits packed the way debugger front-ends expect.
    pub fn packed(&self) -> u32 {
        (self.length & DASMFLAG_LENGTHMASK) | self.step.bits() | DASMFLAG_SUPPORTED
    }

    /// Bus address of the `index`th word of the instruction.
    pub fn word_address(&self, index: u32) -> u32 {
        self.address.wrapping_add(index * 2) & self.cpu.address_mask()
    }
}

/// Per-call decode state: fetch cursor, instruction register and CPU.
///
/// Every fetch is made at `pc & address_mask`; the cursor itself wraps
/// at 32 bits.
pub struct DisassemblerContext<'a, S: InstructionStream + ?Sized> {
    stream: &'a S,
    pc: u32,
    ir: u16,
    cpu: CpuType,
    address_mask: u32,
}

impl<'a, S: InstructionStream + ?Sized> DisassemblerContext<'a, S> {
    pub fn new(stream: &'a S, pc: u32, cpu: CpuType) -> Self {
        DisassemblerContext {
            stream,
            pc,
            ir: 0,
            cpu,
            address_mask: cpu.address_mask(),
        }
    }

    /// Address of the next unread word.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// The opcode word being rendered.
    pub fn ir(&self) -> u16 {
        self.ir
    }

    pub fn cpu(&self) -> CpuType {
        self.cpu
    }

    fn fetch_opcode(&mut self) -> u16 {
        self.ir = self.read_imm_16();
        self.ir
    }

    /// A byte immediate occupies a whole word; only its low byte counts.
    pub fn read_imm_8(&mut self) -> u8 {
        (self.read_imm_16() & 0xff) as u8
    }

    pub fn read_imm_16(&mut self) -> u16 {
        let value = self.peek_imm_16();
        self.pc = self.pc.wrapping_add(2);
        value
    }

    pub fn read_imm_32(&mut self) -> u32 {
        let value = self.peek_imm_32();
        self.pc = self.pc.wrapping_add(4);
        value
    }

    pub fn peek_imm_16(&self) -> u16 {
        self.stream.read_u16(self.pc & self.address_mask)
    }

    pub fn peek_imm_32(&self) -> u32 {
        self.stream.read_u32(self.pc & self.address_mask)
    }
}

static OPCODE_TABLE: OnceLock<OpcodeTable> = OnceLock::new();

fn opcode_table() -> &'static OpcodeTable {
    OPCODE_TABLE.get_or_init(build_opcode_table)
}

/// Disassemble the instruction at `pc`.
///
/// Never fails: unknown opcodes, and opcodes the selected CPU lacks,
/// render as `dc.w $xxxx; ILLEGAL` and consume one word.
pub fn disassemble<S: InstructionStream + ?Sized>(stream: &S, pc: u32, cpu: CpuType) -> Disassembly {
    let table = opcode_table();
    let mut ctx = DisassemblerContext::new(stream, pc, cpu);
    let opcode = ctx.fetch_opcode();
    let pattern = table.lookup(opcode);

    let (text, step) = if pattern.cpus.allows(cpu) {
        (pattern.kind.format(&mut ctx), pattern.kind.step_flag())
    } else {
        (illegal_text(opcode), StepFlag::None)
    };

    let length = ctx.pc().wrapping_sub(pc);
    trace!("{pc:08x}: {opcode:04x} {text} ({length} bytes)");
    Disassembly {
        address: pc,
        opcode,
        text,
        length,
        step,
        cpu,
    }
}

/// Disassemble with a Musashi numeric CPU type id (1 = 68000 ... 7 = 68040).
///
/// Unknown ids are rejected before the stream is touched.
pub fn disassemble_raw<S: InstructionStream + ?Sized>(
    stream: &S,
    pc: u32,
    cpu_type: u32,
) -> Result<Disassembly, Error> {
    let cpu = CpuType::from_id(cpu_type)?;
    Ok(disassemble(stream, pc, cpu))
}

/// Whether `opcode` decodes to a real instruction on `cpu`. Line-A and
/// line-F words count as valid. Reads no extension words.
pub fn is_valid_instruction(opcode: u16, cpu: CpuType) -> bool {
    let pattern = opcode_table().lookup(opcode);
    !pattern.is_illegal() && pattern.cpus.allows(cpu)
}

/// Number of opcode words that decode to a real instruction on `cpu`.
pub fn valid_opcode_count(cpu: CpuType) -> usize {
    (0..=u16::MAX)
        .filter(|&opcode| is_valid_instruction(opcode, cpu))
        .count()
}

pub(crate) fn illegal_text(opcode: u16) -> String {
    format!("dc.w ${opcode:04x}; ILLEGAL")
}
