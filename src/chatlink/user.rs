/// Module for user chat links.
use std::convert::TryInto;

use super::Encode;
use crate::codec::{self, ByteReader, ByteWriter};
use crate::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const GUID_SIZE: usize = 16;
const TERMINATOR_SIZE: usize = 2;

/// A player, identified by the account GUID and the name of one of their characters.
///
/// The character name is kept as the raw UTF-16LE bytes found in the link.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct User {
    account_guid: Uuid,
    #[serde(with = "serde_bytes")]
    character_name: Vec<u8>,
}

impl User {
    pub fn new(account_guid: Uuid, character_name: Vec<u8>) -> Self {
        User {
            account_guid,
            character_name,
        }
    }

    /// Creates a user link from the GUID in wire order (mixed-endian, as stored in the link).
    pub fn from_guid_bytes(guid: &[u8], character_name: Vec<u8>) -> Result<Self> {
        let guid: [u8; GUID_SIZE] = guid.try_into().map_err(|_| Error::InvalidAccountGuid(guid.len()))?;
        Ok(User::new(Uuid::from_bytes_le(guid), character_name))
    }

    /// Creates a user link, encoding the character name as UTF-16LE.
    pub fn from_name(account_guid: Uuid, character_name: &str) -> Result<Self> {
        let mut units = vec![0u16; character_name.len()];
        let len = ucs2::encode(character_name, &mut units).map_err(|_| Error::InvalidCharacterName)?;
        let mut bytes = vec![0u8; len * 2];
        LittleEndian::write_u16_into(&units[..len], &mut bytes);
        Ok(User::new(account_guid, bytes))
    }

    pub fn account_guid(&self) -> Uuid {
        self.account_guid
    }

    /// The account GUID in wire order.
    pub fn account_guid_bytes(&self) -> [u8; GUID_SIZE] {
        self.account_guid.to_bytes_le()
    }

    pub fn character_name(&self) -> &[u8] {
        &self.character_name
    }

    /// Decodes the character name from UTF-16LE.
    pub fn character_name_string(&self) -> Result<String> {
        if self.character_name.len() % 2 != 0 {
            return Err(Error::InvalidCharacterName);
        }
        let mut units = vec![0u16; self.character_name.len() / 2];
        LittleEndian::read_u16_into(&self.character_name, &mut units);

        let mut utf8 = vec![0u8; units.len() * 3];
        let size = ucs2::decode(&units, &mut utf8).map_err(|_| Error::InvalidCharacterName)?;
        utf8.truncate(size);
        String::from_utf8(utf8).map_err(|_| Error::InvalidCharacterName)
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let guid = reader.next_bytes(GUID_SIZE)?;
        // The name takes up everything up to the terminator.
        let name_len = reader.remaining().saturating_sub(TERMINATOR_SIZE);
        let character_name = reader.next_bytes(name_len)?.to_vec();

        let pos = reader.position();
        match reader.next_u16()? {
            0 => User::from_guid_bytes(guid, character_name),
            v => Err(codec::Error::NonZeroPadding { value: v as u32, pos }.into()),
        }
    }
}

impl Encode for User {
    fn encoded_len(&self) -> usize {
        GUID_SIZE + self.character_name.len() + TERMINATOR_SIZE
    }

    fn write(&self, writer: &mut ByteWriter) {
        writer.put_bytes(&self.account_guid_bytes());
        writer.put_bytes(&self.character_name);
        writer.put_u16(0);
    }
}
