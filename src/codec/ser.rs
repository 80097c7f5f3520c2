use byteorder::{ByteOrder, LittleEndian};

/// A writer over a zeroed buffer of fixed size.
///
/// Every chat link knows its encoded size up front, so the buffer never grows. Writing past the declared size is a
/// bug in the caller's size calculation and panics.
#[derive(Clone, Debug)]
pub struct ByteWriter {
    data: Vec<u8>,
    pos: usize,
}

macro_rules! impl_nums {
    ($ty:ty, $method:ident, $writer_method:ident, $size:literal) => {
        #[inline]
        pub fn $method(&mut self, value: $ty) {
            let pos = self.reserve($size);
            LittleEndian::$writer_method(&mut self.data[pos..pos + $size], value);
        }
    };
}

impl ByteWriter {
    /// Creates a writer with a buffer of exactly `size` zero bytes.
    pub fn with_size(size: usize) -> Self {
        ByteWriter {
            data: vec![0; size],
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the write position. Bytes skipped over keep their current value.
    pub fn set_position(&mut self, pos: usize) {
        assert!(
            pos <= self.data.len(),
            "write position {} outside of buffer with size {}",
            pos,
            self.data.len()
        );
        self.pos = pos;
    }

    fn reserve(&mut self, len: usize) -> usize {
        assert!(
            self.pos + len <= self.data.len(),
            "write of {} bytes at {} overflows buffer with size {}",
            len,
            self.pos,
            self.data.len()
        );
        let pos = self.pos;
        self.pos += len;
        pos
    }

    #[inline]
    pub fn put_u8(&mut self, value: u8) {
        let pos = self.reserve(1);
        self.data[pos] = value;
    }

    impl_nums!(u16, put_u16, write_u16, 2);
    impl_nums!(u32, put_u24, write_u24, 3);
    impl_nums!(u32, put_u32, write_u32, 4);

    /// Writes a 24bit identifier followed by its zero padding byte.
    pub fn put_padded_id(&mut self, id: u32) {
        self.put_u24(id);
        self.put_u8(0);
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        let pos = self.reserve(bytes.len());
        self.data[pos..pos + bytes.len()].copy_from_slice(bytes);
    }

    /// Returns the written buffer.
    pub fn finish(self) -> Vec<u8> {
        debug_assert_eq!(self.pos, self.data.len(), "buffer not completely written");
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_values() {
        let mut writer = ByteWriter::with_size(10);
        writer.put_u8(0x12);
        writer.put_u16(0x1234);
        writer.put_u24(0xCCBBAA);
        writer.put_u32(0x04030201);

        assert_eq!(
            vec![0x12, 0x34, 0x12, 0xAA, 0xBB, 0xCC, 0x01, 0x02, 0x03, 0x04],
            writer.finish()
        );
    }

    #[test]
    fn test_padded_id() {
        let mut writer = ByteWriter::with_size(4);
        writer.put_padded_id(646);
        assert_eq!(vec![0x86, 0x02, 0x00, 0x00], writer.finish());
    }

    #[test]
    fn test_skipped_bytes_stay_zero() {
        let mut writer = ByteWriter::with_size(4);
        writer.put_u8(0xFF);
        writer.set_position(3);
        writer.put_u8(0xEE);
        assert_eq!(vec![0xFF, 0x00, 0x00, 0xEE], writer.finish());
    }

    #[test]
    #[should_panic]
    fn test_overflow_panics() {
        let mut writer = ByteWriter::with_size(3);
        writer.put_u32(1);
    }
}
