use std::str::FromStr;

use crate::error::Error;

/// CPU type selection for instruction decoding.
///
/// Numeric ids follow the Musashi numbering (`1` = 68000 ... `7` = 68040),
/// `0` being the invalid type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CpuType {
    /// MC68000, 24-bit address bus.
    M68000,
    /// MC68008, 68000 core on an 8-bit bus with 22 address lines.
    M68008,
    /// MC68010, adds BKPT/MOVEC/MOVES/RTD and MOVE from CCR.
    M68010,
    /// MC68EC020, 68020 instruction set on a 24-bit address bus.
    M68EC020,
    /// MC68020, bit fields, 32-bit mul/div, memory indirect addressing.
    M68020,
    /// MC68030, decoded with the 68020 instruction set.
    M68030,
    /// MC68040, adds CINV/CPUSH/MOVE16.
    M68040,
}

impl CpuType {
    pub const ALL: [CpuType; 7] = [
        CpuType::M68000,
        CpuType::M68008,
        CpuType::M68010,
        CpuType::M68EC020,
        CpuType::M68020,
        CpuType::M68030,
        CpuType::M68040,
    ];

    /// Look up a CPU type by its Musashi numeric id.
    pub fn from_id(id: u32) -> Result<Self, Error> {
        match id {
            1 => Ok(CpuType::M68000),
            2 => Ok(CpuType::M68008),
            3 => Ok(CpuType::M68010),
            4 => Ok(CpuType::M68EC020),
            5 => Ok(CpuType::M68020),
            6 => Ok(CpuType::M68030),
            7 => Ok(CpuType::M68040),
            _ => Err(Error::UnsupportedCpuType(id)),
        }
    }

    pub fn id(self) -> u32 {
        match self {
            CpuType::M68000 => 1,
            CpuType::M68008 => 2,
            CpuType::M68010 => 3,
            CpuType::M68EC020 => 4,
            CpuType::M68020 => 5,
            CpuType::M68030 => 6,
            CpuType::M68040 => 7,
        }
    }

    /// Mask applied to every instruction stream address.
    pub fn address_mask(self) -> u32 {
        match self {
            CpuType::M68000 | CpuType::M68010 | CpuType::M68EC020 => 0x00ff_ffff,
            CpuType::M68008 => 0x003f_ffff,
            CpuType::M68020 | CpuType::M68030 | CpuType::M68040 => 0xffff_ffff,
        }
    }

    /// Instruction-set generation used for gating. The 68EC020 decodes as a
    /// 68020; the 68008 as a 68000.
    pub fn generation(self) -> CpuSet {
        match self {
            CpuType::M68000 => CpuSet::TYPE_68000,
            CpuType::M68008 => CpuSet::TYPE_68008,
            CpuType::M68010 => CpuSet::TYPE_68010,
            CpuType::M68EC020 | CpuType::M68020 => CpuSet::TYPE_68020,
            CpuType::M68030 => CpuSet::TYPE_68030,
            CpuType::M68040 => CpuSet::TYPE_68040,
        }
    }

    /// True for CPUs that only understand the brief extension word format
    /// and reject scaled indexes.
    pub fn is_pre_68020(self) -> bool {
        matches!(self, CpuType::M68000 | CpuType::M68008 | CpuType::M68010)
    }
}

impl std::fmt::Display for CpuType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CpuType::M68000 => f.write_str("68000"),
            CpuType::M68008 => f.write_str("68008"),
            CpuType::M68010 => f.write_str("68010"),
            CpuType::M68EC020 => f.write_str("68EC020"),
            CpuType::M68020 => f.write_str("68020"),
            CpuType::M68030 => f.write_str("68030"),
            CpuType::M68040 => f.write_str("68040"),
        }
    }
}

impl FromStr for CpuType {
    type Err = Error;

    /// Parse a CPU type from a string like "68000", "m68ec020" or "M68040".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let name = lower.strip_prefix("mc").or_else(|| lower.strip_prefix('m')).unwrap_or(&lower);
        match name {
            "68000" => Ok(CpuType::M68000),
            "68008" => Ok(CpuType::M68008),
            "68010" => Ok(CpuType::M68010),
            "68ec020" => Ok(CpuType::M68EC020),
            "68020" => Ok(CpuType::M68020),
            "68030" => Ok(CpuType::M68030),
            "68040" => Ok(CpuType::M68040),
            _ => Err(Error::UnknownCpuName(s.to_string())),
        }
    }
}

/// Set of instruction-set generations an opcode pattern is legal on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CpuSet(u8);

impl CpuSet {
    pub const TYPE_68000: CpuSet = CpuSet(0x01);
    pub const TYPE_68008: CpuSet = CpuSet(0x02);
    pub const TYPE_68010: CpuSet = CpuSet(0x04);
    pub const TYPE_68020: CpuSet = CpuSet(0x08);
    pub const TYPE_68030: CpuSet = CpuSet(0x10);
    pub const TYPE_68040: CpuSet = CpuSet(0x20);

    pub const ALL: CpuSet = CpuSet(0x3f);
    pub const M68010_PLUS: CpuSet = CpuSet(0x3c);
    pub const M68020_PLUS: CpuSet = CpuSet(0x38);
    pub const M68020_ONLY: CpuSet = CpuSet(0x08);
    pub const M68040_PLUS: CpuSet = CpuSet(0x20);

    pub const fn contains(self, other: CpuSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the given CPU may execute instructions from this set.
    pub fn allows(self, cpu: CpuType) -> bool {
        self.contains(cpu.generation())
    }
}
