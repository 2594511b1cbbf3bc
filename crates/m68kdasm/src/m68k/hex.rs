//! Signed and unsigned hexadecimal text in Motorola `$` notation.
//!
//! Negative values print as a minus sign followed by the magnitude, so
//! `0xff` as a byte reads `-$1`. The most negative value of each width has
//! no positive counterpart and prints as its own magnitude (`-$80`).

/// Format a byte as signed hex: `$7f`, `-$1`, `-$80`.
pub fn signed_hex_8(value: u8) -> String {
    let v = value as i8;
    if v < 0 {
        format!("-${:x}", v.unsigned_abs())
    } else {
        format!("${v:x}")
    }
}

/// Format a word as signed hex: `$7fff`, `-$2`, `-$8000`.
pub fn signed_hex_16(value: u16) -> String {
    let v = value as i16;
    if v < 0 {
        format!("-${:x}", v.unsigned_abs())
    } else {
        format!("${v:x}")
    }
}

/// Format a long as signed hex: `$10`, `-$4`, `-$80000000`.
pub fn signed_hex_32(value: u32) -> String {
    let v = value as i32;
    if v < 0 {
        format!("-${:x}", v.unsigned_abs())
    } else {
        format!("${v:x}")
    }
}

/// Signed immediate of the given width: `#-$1`.
pub fn imm_signed_8(value: u8) -> String {
    format!("#{}", signed_hex_8(value))
}

pub fn imm_signed_16(value: u16) -> String {
    format!("#{}", signed_hex_16(value))
}

pub fn imm_signed_32(value: u32) -> String {
    format!("#{}", signed_hex_32(value))
}

/// Unsigned immediate: `#$ff`.
pub fn imm_unsigned(value: u32) -> String {
    format!("#${value:x}")
}
