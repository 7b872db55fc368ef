use crate::gsub::{GsubError, Result};

/// Bounds-checked big-endian view over one OpenType table or subtable.
///
/// Offsets are relative to the start of the view, matching how OpenType
/// offsets are relative to the table that declares them.
#[derive(Debug, Clone, Copy)]
pub struct TableReader<'a> {
    data: &'a [u8],
}

impl<'a> TableReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn bytes<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let out_of_bounds = GsubError::OutOfBounds {
            offset,
            len: N,
            size: self.data.len(),
        };
        let end = offset.checked_add(N).ok_or(out_of_bounds.clone())?;
        self.data
            .get(offset..end)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(out_of_bounds)
    }

    pub fn u16_at(&self, offset: usize) -> Result<u16> {
        self.bytes::<2>(offset).map(u16::from_be_bytes)
    }

    pub fn u32_at(&self, offset: usize) -> Result<u32> {
        self.bytes::<4>(offset).map(u32::from_be_bytes)
    }

    pub fn tag_at(&self, offset: usize) -> Result<[u8; 4]> {
        self.bytes::<4>(offset)
    }

    /// Element `index` of a `u16` array starting at `base`.
    pub fn u16_in_array(&self, base: usize, index: usize) -> Result<u16> {
        let offset = index
            .checked_mul(2)
            .and_then(|rel| rel.checked_add(base))
            .ok_or(GsubError::OutOfBounds {
                offset: base,
                len: 2,
                size: self.data.len(),
            })?;
        self.u16_at(offset)
    }

    /// View starting `offset` bytes into this one.
    pub fn subtable(&self, offset: usize) -> Result<TableReader<'a>> {
        self.data
            .get(offset..)
            .map(TableReader::new)
            .ok_or(GsubError::OutOfBounds {
                offset,
                len: 0,
                size: self.data.len(),
            })
    }

    /// View at the 16-bit offset stored at `field`.
    pub fn subtable_at_u16(&self, field: usize) -> Result<TableReader<'a>> {
        let offset = self.u16_at(field)?;
        self.subtable(offset as usize)
    }
}
