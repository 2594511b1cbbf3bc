use thiserror::Error;

/// Unified error type for the m68kdasm library.
///
/// Decoding itself never fails: unknown or CPU-gated opcodes render as
/// `dc.w` text. Only CPU selection can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unsupported CPU type id {0}")]
    UnsupportedCpuType(u32),
    #[error("unknown CPU type '{0}' (expected 68000, 68008, 68010, 68EC020, 68020, 68030 or 68040)")]
    UnknownCpuName(String),
}
