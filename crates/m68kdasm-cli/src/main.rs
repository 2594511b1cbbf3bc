use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use m68kdasm::{generate_listing, valid_opcode_count, CpuType, ListingOptions};

/// M68000-family raw binary disassembler
#[derive(Parser)]
#[command(name = "m68kdasm", version, about)]
struct Cli {
    /// Raw binary image to disassemble
    input: Option<PathBuf>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// CPU type for instruction decoding (68000, 68008, 68010, 68EC020, 68020, 68030, 68040)
    #[arg(short, long, default_value = "68000")]
    cpu: CpuType,

    /// Load address of the first disassembled byte, in hex
    #[arg(short, long, default_value = "0", value_parser = parse_hex)]
    base: u32,

    /// Skip this many bytes of the file before disassembling
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Disassemble at most this many bytes
    #[arg(long)]
    length: Option<usize>,

    /// Stop after this many instructions
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Hide hex byte dump column
    #[arg(long)]
    no_hex: bool,

    /// Hide address column
    #[arg(long)]
    no_addresses: bool,

    /// Hide line numbers
    #[arg(long)]
    no_line_numbers: bool,

    /// Use uppercase mnemonics (MOVE instead of move)
    #[arg(long)]
    uppercase: bool,

    /// Print how many opcode words each CPU type accepts, then exit
    #[arg(long)]
    stats: bool,

    /// Show additional debug information
    #[arg(short, long)]
    verbose: bool,
}

fn parse_hex(s: &str) -> Result<u32, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix('$'))
        .unwrap_or(s);
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex address '{s}': {e}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if cli.stats {
        print_stats();
        return Ok(());
    }

    let Some(input) = &cli.input else {
        bail!("no input file given (use --stats for opcode statistics)");
    };

    let data = std::fs::read(input).with_context(|| format!("reading '{}'", input.display()))?;
    let code = select_range(&data, cli.offset, cli.length)
        .with_context(|| format!("selecting bytes of '{}'", input.display()))?;
    info!(
        "disassembling {} bytes of '{}' as {} at ${:08X}",
        code.len(),
        input.display(),
        cli.cpu,
        cli.base
    );

    let options = ListingOptions {
        cpu: cli.cpu,
        base_address: cli.base,
        show_hex: !cli.no_hex,
        show_addresses: !cli.no_addresses,
        show_line_numbers: !cli.no_line_numbers,
        uppercase: cli.uppercase,
        max_instructions: cli.count,
    };

    let listing = generate_listing(code, &options);
    debug!("generated {} listing lines", listing.len());

    let output_text: String = listing.iter().map(|l| format!("{}\n", l.text)).collect();

    if let Some(path) = &cli.output {
        std::fs::write(path, &output_text)
            .with_context(|| format!("writing '{}'", path.display()))?;
    } else {
        print!("{output_text}");
    }

    Ok(())
}

fn select_range(data: &[u8], offset: usize, length: Option<usize>) -> anyhow::Result<&[u8]> {
    if offset > data.len() {
        bail!("offset {offset} is past the end of the file ({} bytes)", data.len());
    }
    let rest = &data[offset..];
    Ok(match length {
        Some(length) => &rest[..length.min(rest.len())],
        None => rest,
    })
}

fn print_stats() {
    println!("Valid opcode words per CPU type (of 65536):");
    for cpu in CpuType::ALL {
        println!("  {:<8} {:>6}", cpu.to_string(), valid_opcode_count(cpu));
    }
}
