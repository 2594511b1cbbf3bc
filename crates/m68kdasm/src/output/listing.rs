use log::{debug, warn};

use crate::m68k::decode::disassemble;
use crate::m68k::stream::MemoryImage;
use crate::m68k::variants::CpuType;

use super::formatter::{format_disassembly, FormatOptions};

/// Options controlling the listing output.
#[derive(Debug, Clone)]
pub struct ListingOptions {
    pub cpu: CpuType,
    /// Address of the first byte of the buffer.
    pub base_address: u32,
    pub show_hex: bool,
    pub show_addresses: bool,
    pub show_line_numbers: bool,
    pub uppercase: bool,
    /// Stop after this many instructions.
    pub max_instructions: Option<usize>,
}

impl Default for ListingOptions {
    fn default() -> Self {
        ListingOptions {
            cpu: CpuType::M68000,
            base_address: 0,
            show_hex: true,
            show_addresses: true,
            show_line_numbers: true,
            uppercase: false,
            max_instructions: None,
        }
    }
}

/// A single line of the disassembly listing.
#[derive(Debug, Clone)]
pub struct ListingLine {
    pub line_number: u32,
    pub text: String,
}

/// Generate a disassembly listing for a flat code buffer.
///
/// The buffer is mapped at `options.base_address`, reduced to the CPU's
/// address bus, and decoded one instruction per line. An instruction that would run past the end of
/// the buffer is emitted as `dc.w`/`dc.b` data instead.
pub fn generate_listing(data: &[u8], options: &ListingOptions) -> Vec<ListingLine> {
    let base = options.base_address & options.cpu.address_mask();
    if base != options.base_address {
        warn!(
            "base ${:08X} is outside the {} address space; listing at ${base:08X}",
            options.base_address, options.cpu
        );
    }
    let image = MemoryImage::new(data, base);
    let fmt_opts = FormatOptions {
        uppercase: options.uppercase,
    };

    let mut rows = Vec::new();
    let mut instructions = 0usize;
    let mut offset = 0usize;

    while offset < data.len() {
        if options.max_instructions.is_some_and(|max| instructions >= max) {
            break;
        }
        let address = base.wrapping_add(offset as u32);
        let remaining = data.len() - offset;

        if remaining < 2 {
            rows.push(data_line(address, &data[offset..], options));
            break;
        }

        let d = disassemble(&image, address, options.cpu);
        let length = d.length as usize;
        if length > remaining {
            warn!(
                "{address:08X}: {} needs {length} bytes, only {remaining} left; emitting data",
                d.text
            );
            for chunk in data[offset..].chunks(2) {
                let chunk_address = base.wrapping_add(offset as u32);
                rows.push(data_line(chunk_address, chunk, options));
                offset += chunk.len();
            }
            break;
        }

        let formatted = format_disassembly(&image, &d, &fmt_opts);
        rows.push(format_code_line(address, &formatted.hex_bytes, &formatted.text, options));
        instructions += 1;
        offset += length;
    }

    debug!("listed {instructions} instructions from {offset} bytes");

    let mut lines = Vec::with_capacity(rows.len() + 3);
    let mut line_num: u32 = 1;
    push_line(
        &mut lines,
        &mut line_num,
        options,
        format!("; {} disassembly at ${base:08X}", options.cpu),
    );
    push_line(
        &mut lines,
        &mut line_num,
        options,
        format!("; instructions: {instructions}, bytes: {offset}/{}", data.len()),
    );
    push_line(&mut lines, &mut line_num, options, String::new());
    for row in rows {
        push_line(&mut lines, &mut line_num, options, row);
    }

    lines
}

/// `dc.w` for a whole word, `dc.b` for a trailing odd byte.
fn data_line(address: u32, bytes: &[u8], options: &ListingOptions) -> String {
    let (directive, hex) = match *bytes {
        [hi, lo] => ("dc.w", format!("{:04X}", u16::from_be_bytes([hi, lo]))),
        [byte] => ("dc.b", format!("{byte:02X}")),
        _ => ("dc.b", String::new()),
    };
    let directive = if options.uppercase {
        directive.to_uppercase()
    } else {
        directive.to_string()
    };
    format_code_line(address, &hex, &format!("{directive:<8}${hex}"), options)
}

fn format_code_line(address: u32, hex: &str, text: &str, options: &ListingOptions) -> String {
    let mut parts = Vec::new();

    if options.show_addresses {
        parts.push(format!("{address:08X}"));
    }

    if options.show_hex {
        parts.push(format!("{hex:<20}"));
    }

    parts.push(text.to_string());

    parts.join("  ")
}

fn push_line(
    lines: &mut Vec<ListingLine>,
    line_num: &mut u32,
    options: &ListingOptions,
    text: String,
) {
    let display_text = if options.show_line_numbers {
        format!("{:5}  {text}", *line_num)
    } else {
        text
    };
    lines.push(ListingLine {
        line_number: *line_num,
        text: display_text,
    });
    *line_num += 1;
}
