/// Source of big-endian instruction words.
///
/// The disassembler never touches memory directly; every opcode and
/// extension word is fetched through this trait at an address that has
/// already been masked for the selected CPU type.
pub trait InstructionStream {
    /// Read a big-endian 16-bit word at `address`.
    fn read_u16(&self, address: u32) -> u16;

    /// Read a big-endian 32-bit long at `address`.
    fn read_u32(&self, address: u32) -> u32 {
        let hi = self.read_u16(address) as u32;
        let lo = self.read_u16(address.wrapping_add(2)) as u32;
        (hi << 16) | lo
    }
}

fn byte_at(data: &[u8], base: u32, address: u32) -> u8 {
    address
        .checked_sub(base)
        .and_then(|offset| data.get(offset as usize))
        .copied()
        .unwrap_or(0)
}

/// A byte slice is a stream starting at address 0. Bytes past the end
/// read as zero.
impl InstructionStream for [u8] {
    fn read_u16(&self, address: u32) -> u16 {
        u16::from_be_bytes([byte_at(self, 0, address), byte_at(self, 0, address.wrapping_add(1))])
    }
}

impl InstructionStream for Vec<u8> {
    fn read_u16(&self, address: u32) -> u16 {
        self.as_slice().read_u16(address)
    }
}

impl<const N: usize> InstructionStream for [u8; N] {
    fn read_u16(&self, address: u32) -> u16 {
        self.as_slice().read_u16(address)
    }
}

impl<T: InstructionStream + ?Sized> InstructionStream for &T {
    fn read_u16(&self, address: u32) -> u16 {
        (**self).read_u16(address)
    }

    fn read_u32(&self, address: u32) -> u32 {
        (**self).read_u32(address)
    }
}

/// A byte slice mapped at an arbitrary base address.
#[derive(Debug, Clone, Copy)]
pub struct MemoryImage<'a> {
    data: &'a [u8],
    base: u32,
}

impl<'a> MemoryImage<'a> {
    pub fn new(data: &'a [u8], base: u32) -> Self {
        MemoryImage { data, base }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Address one past the last mapped byte.
    pub fn end(&self) -> u32 {
        self.base.wrapping_add(self.data.len() as u32)
    }

    /// Raw bytes in `[address, address + len)`, clipped to the mapped range.
    pub fn bytes(&self, address: u32, len: usize) -> &'a [u8] {
        let Some(start) = address.checked_sub(self.base).map(|o| o as usize) else {
            return &[];
        };
        if start >= self.data.len() {
            return &[];
        }
        let end = start.saturating_add(len).min(self.data.len());
        &self.data[start..end]
    }
}

impl InstructionStream for MemoryImage<'_> {
    fn read_u16(&self, address: u32) -> u16 {
        u16::from_be_bytes([
            byte_at(self.data, self.base, address),
            byte_at(self.data, self.base, address.wrapping_add(1)),
        ])
    }
}
