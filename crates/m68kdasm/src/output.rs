//! Listing and column formatting on top of the decoder.

pub mod formatter;
pub mod listing;

pub use formatter::{format_disassembly, FormatOptions, FormattedInstruction};
pub use listing::{generate_listing, ListingLine, ListingOptions};
