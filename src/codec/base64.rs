/// Base64 transcoder for the chat link payload (standard alphabet, `=` padding).
///
/// Decoding accepts both padded and unpadded input. Chat links found in the wild are usually padded, but links
/// produced by third party tools sometimes drop the trailing `=`.
use super::error::{Error, Result};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PADDING: char = '=';

/// Decodes the given base64 text into raw bytes.
pub fn decode(source: &str) -> Result<Vec<u8>> {
    let mut output = vec![0u8; (source.len() * 3 + 4) / 4];
    let mut symbols = 0usize;
    let mut padding = 0;

    for (pos, c) in source.char_indices() {
        if c == PADDING {
            if padding == 2 {
                return Err(Error::ExcessPadding(pos));
            }
            padding += 1;
            continue;
        }
        if padding != 0 {
            return Err(Error::DataAfterPadding(pos));
        }

        let code = decode_symbol(c).ok_or(Error::InvalidBase64Char(c, pos))?;
        let index = symbols * 6 / 8;

        // Every symbol carries 6 bits, the mode tells how many bits of the current byte are already filled.
        match symbols % 4 {
            0 => {
                output[index] = code << 2;
            }
            1 => {
                output[index] |= code >> 4;
                output[index + 1] = code << 4;
            }
            2 => {
                output[index] |= code >> 2;
                output[index + 1] = code << 6;
            }
            _ => {
                output[index] |= code;
            }
        }
        symbols += 1;
    }

    // Incomplete trailing bytes only hold padding bits.
    output.truncate(symbols * 6 / 8);
    Ok(output)
}

/// Encodes the given bytes as padded base64 text.
pub fn encode(data: &[u8]) -> String {
    let mut output = String::with_capacity((data.len() + 2) / 3 * 4);
    let mut mode = 0;

    for (i, &byte) in data.iter().enumerate() {
        match mode {
            0 => output.push(symbol(byte >> 2)),
            1 => output.push(symbol(((data[i - 1] << 4) & 0x3F) | (byte >> 4))),
            _ => {
                output.push(symbol(((data[i - 1] << 2) & 0x3F) | (byte >> 6)));
                output.push(symbol(byte & 0x3F));
            }
        }
        mode = (mode + 1) % 3;
    }

    if let Some(&last) = data.last() {
        match mode {
            1 => {
                output.push(symbol((last << 4) & 0x3F));
                output.push(PADDING);
                output.push(PADDING);
            }
            2 => {
                output.push(symbol((last << 2) & 0x3F));
                output.push(PADDING);
            }
            _ => {}
        }
    }
    output
}

#[inline]
fn symbol(code: u8) -> char {
    ALPHABET[code as usize] as char
}

#[inline]
fn decode_symbol(c: char) -> Option<u8> {
    match c {
        'A'..='Z' => Some(c as u8 - b'A'),
        'a'..='z' => Some(c as u8 - b'a' + 26),
        '0'..='9' => Some(c as u8 - b'0' + 52),
        '+' => Some(62),
        '/' => Some(63),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rfc4648() -> Result<()> {
        assert_eq!(b"".to_vec(), decode("")?);
        assert_eq!(b"f".to_vec(), decode("Zg==")?);
        assert_eq!(b"fo".to_vec(), decode("Zm8=")?);
        assert_eq!(b"foo".to_vec(), decode("Zm9v")?);
        assert_eq!(b"foob".to_vec(), decode("Zm9vYg==")?);
        assert_eq!(b"fooba".to_vec(), decode("Zm9vYmE=")?);
        assert_eq!(b"foobar".to_vec(), decode("Zm9vYmFy")?);
        Ok(())
    }

    #[test]
    fn test_encode_rfc4648() {
        assert_eq!("", encode(b""));
        assert_eq!("Zg==", encode(b"f"));
        assert_eq!("Zm8=", encode(b"fo"));
        assert_eq!("Zm9v", encode(b"foo"));
        assert_eq!("Zm9vYg==", encode(b"foob"));
        assert_eq!("Zm9vYmE=", encode(b"fooba"));
        assert_eq!("Zm9vYmFy", encode(b"foobar"));
    }

    #[test]
    fn test_decode_len24() -> Result<()> {
        assert_eq!(b"any carnal pleasur".to_vec(), decode("YW55IGNhcm5hbCBwbGVhc3Vy")?);
        assert_eq!(b"any carnal pleasu".to_vec(), decode("YW55IGNhcm5hbCBwbGVhc3U=")?);
        assert_eq!(b"any carnal pleas".to_vec(), decode("YW55IGNhcm5hbCBwbGVhcw==")?);
        Ok(())
    }

    #[test]
    fn test_decode_unpadded() -> Result<()> {
        assert_eq!(b"any carnal pleas".to_vec(), decode("YW55IGNhcm5hbCBwbGVhcw")?);
        assert_eq!(b"any carnal pleasu".to_vec(), decode("YW55IGNhcm5hbCBwbGVhc3U")?);
        assert_eq!(decode("YW55IGNhcm5hbCBwbGVhcw==")?, decode("YW55IGNhcm5hbCBwbGVhcw")?);
        Ok(())
    }

    #[test]
    fn test_encode_len24() {
        assert_eq!("YW55IGNhcm5hbCBwbGVhc3Vy", encode(b"any carnal pleasur"));
        assert_eq!("YW55IGNhcm5hbCBwbGVhc3U=", encode(b"any carnal pleasu"));
        assert_eq!("YW55IGNhcm5hbCBwbGVhcw==", encode(b"any carnal pleas"));
    }

    #[test]
    fn test_against_reference_codec() -> Result<()> {
        for len in 0..64usize {
            let data: Vec<u8> = (0..len).map(|i| (i * 37 + len * 11) as u8).collect();
            let encoded = encode(&data);
            assert_eq!(::base64::encode(&data), encoded);
            assert_eq!(0, encoded.len() % 4);
            assert_eq!(data, decode(&encoded)?);
        }
        Ok(())
    }

    #[test]
    fn test_decode_all_byte_values() -> Result<()> {
        let data: Vec<u8> = (0..=255u8).collect();
        assert_eq!(data, decode(&encode(&data))?);
        Ok(())
    }

    #[test]
    fn test_data_after_padding() {
        assert_eq!(Err(Error::DataAfterPadding(3)), decode("Zg=g"));
    }

    #[test]
    fn test_third_padding_char() {
        assert_eq!(Err(Error::ExcessPadding(4)), decode("Zg==="));
    }

    #[test]
    fn test_invalid_char() {
        assert_eq!(Err(Error::InvalidBase64Char('*', 2)), decode("Zm*v"));
        assert_eq!(Err(Error::InvalidBase64Char('-', 0)), decode("-A=="));
    }
}
