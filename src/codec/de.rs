use super::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};

/// A forward-only reader over the raw bytes of a chat link payload.
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

macro_rules! impl_nums {
    ($ty:ty, $method:ident, $reader_method:ident, $size:literal) => {
        #[inline]
        pub fn $method(&mut self) -> Result<$ty> {
            let bytes = self.take($size)?;
            Ok(LittleEndian::$reader_method(bytes))
        }
    };
}

impl<'a> ByteReader<'a> {
    /// Creates a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the read position. Seeking past the end is allowed, the next read will fail.
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::UnexpectedEnd {
                pos: self.pos,
                wanted: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    #[inline]
    pub fn next_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    impl_nums!(u16, next_u16, read_u16, 2);
    impl_nums!(u32, next_u24, read_u24, 3);
    impl_nums!(u32, next_u32, read_u32, 4);

    /// Reads a 24bit identifier followed by its mandatory zero byte.
    pub fn next_padded_id(&mut self) -> Result<u32> {
        let id = self.next_u24()?;
        let pos = self.pos;
        match self.next_u8()? {
            0 => Ok(id),
            v => Err(Error::NonZeroPadding { value: v as u32, pos }),
        }
    }

    pub fn next_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_values() -> Result<()> {
        let data = [0x12, 0x34, 0x12, 0xAA, 0xBB, 0xCC, 0x01, 0x02, 0x03, 0x04];
        let mut reader = ByteReader::new(&data);

        assert_eq!(0x12, reader.next_u8()?);
        assert_eq!(0x1234, reader.next_u16()?);
        assert_eq!(0xCCBBAA, reader.next_u24()?);
        assert_eq!(0x04030201, reader.next_u32()?);
        assert_eq!(0, reader.remaining());
        Ok(())
    }

    #[test]
    fn test_padded_id() -> Result<()> {
        let mut reader = ByteReader::new(&[0x86, 0x02, 0x00, 0x00]);
        assert_eq!(646, reader.next_padded_id()?);
        assert_eq!(4, reader.position());
        Ok(())
    }

    #[test]
    fn test_padded_id_non_zero() {
        let mut reader = ByteReader::new(&[0x86, 0x02, 0x00, 0x07]);
        assert_eq!(
            Err(Error::NonZeroPadding { value: 7, pos: 3 }),
            reader.next_padded_id()
        );
    }

    #[test]
    fn test_unexpected_end() {
        let mut reader = ByteReader::new(&[0x01, 0x02, 0x03]);
        assert_eq!(
            Err(Error::UnexpectedEnd {
                pos: 0,
                wanted: 4,
                remaining: 3
            }),
            reader.next_u32()
        );
        // A failed read doesn't advance the cursor.
        assert_eq!(0, reader.position());
    }

    #[test]
    fn test_seek_past_end() {
        let mut reader = ByteReader::new(&[0x01]);
        reader.set_position(16);
        assert_eq!(0, reader.remaining());
        assert!(reader.next_u8().is_err());
    }
}
