/// Module for item chat links.
use super::basic::Id24;
use super::Encode;
use crate::codec::{ByteReader, ByteWriter};
use crate::Result;
use serde::{Deserialize, Serialize};

const SKINNED: u8 = 0x80;
const FIRST_UPGRADE_SLOT_IN_USE: u8 = 0x40;
const SECOND_UPGRADE_SLOT_IN_USE: u8 = 0x20;

// amount (1) + item id (3) + flags (1)
const BASE_SIZE: usize = 5;

/// An item stack, optionally with a transmuted skin and upgrades.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Item {
    amount: u8,
    item_id: Id24,
    skin_id: Option<Id24>,
    first_upgrade_slot: Option<Id24>,
    second_upgrade_slot: Option<Id24>,
}

fn optional_id(field: &'static str, value: Option<u32>) -> Result<Option<Id24>> {
    value.map(|v| Id24::new(field, v)).transpose()
}

impl Item {
    pub fn new(
        amount: u8,
        item_id: u32,
        skin_id: Option<u32>,
        first_upgrade_slot: Option<u32>,
        second_upgrade_slot: Option<u32>,
    ) -> Result<Self> {
        Ok(Item {
            amount,
            item_id: Id24::new("Item `item_id`", item_id)?,
            skin_id: optional_id("Item `skin_id`", skin_id)?,
            first_upgrade_slot: optional_id("Item `first_upgrade_slot`", first_upgrade_slot)?,
            second_upgrade_slot: optional_id("Item `second_upgrade_slot`", second_upgrade_slot)?,
        })
    }

    /// Shorthand for an item without skin or upgrades.
    pub fn plain(amount: u8, item_id: u32) -> Result<Self> {
        Item::new(amount, item_id, None, None, None)
    }

    pub fn amount(&self) -> u8 {
        self.amount
    }

    pub fn item_id(&self) -> u32 {
        self.item_id.get()
    }

    pub fn skin_id(&self) -> Option<u32> {
        self.skin_id.map(Id24::get)
    }

    pub fn first_upgrade_slot(&self) -> Option<u32> {
        self.first_upgrade_slot.map(Id24::get)
    }

    pub fn second_upgrade_slot(&self) -> Option<u32> {
        self.second_upgrade_slot.map(Id24::get)
    }

    fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.skin_id.is_some() {
            flags |= SKINNED;
        }
        if self.first_upgrade_slot.is_some() {
            flags |= FIRST_UPGRADE_SLOT_IN_USE;
        }
        if self.second_upgrade_slot.is_some() {
            flags |= SECOND_UPGRADE_SLOT_IN_USE;
        }
        flags
    }

    fn optional_ids(&self) -> [Option<Id24>; 3] {
        [self.skin_id, self.first_upgrade_slot, self.second_upgrade_slot]
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let amount = reader.next_u8()?;
        let item_id = reader.next_u24()?;
        let flags = reader.next_u8()?;

        let mut next_if = |flag: u8| -> Result<Option<u32>> {
            if flags & flag != 0 {
                Ok(Some(reader.next_padded_id()?))
            } else {
                Ok(None)
            }
        };
        let skin_id = next_if(SKINNED)?;
        let first_upgrade_slot = next_if(FIRST_UPGRADE_SLOT_IN_USE)?;
        let second_upgrade_slot = next_if(SECOND_UPGRADE_SLOT_IN_USE)?;

        Item::new(amount, item_id, skin_id, first_upgrade_slot, second_upgrade_slot)
    }
}

impl Encode for Item {
    fn encoded_len(&self) -> usize {
        BASE_SIZE + self.optional_ids().iter().flatten().count() * 4
    }

    fn write(&self, writer: &mut ByteWriter) {
        writer.put_u8(self.amount);
        writer.put_u24(self.item_id.get());
        writer.put_u8(self.flags());
        for id in self.optional_ids().iter().flatten() {
            writer.put_padded_id(id.get());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatlink::ChatLink;
    use crate::Error;

    const ITEM_ID: u32 = 46762;
    const SKIN_ID: u32 = 3709;
    const SIGIL_1_ID: u32 = 24575;
    const SIGIL_2_ID: u32 = 24615;

    chatlink_test!(
        name: test_item,
        text: "[&AgGqtgAA]",
        expected: ChatLink::Item(Item::plain(1, ITEM_ID)?)
    );

    chatlink_test!(
        name: test_item_first_upgrade,
        text: "[&AgGqtgBA/18AAA==]",
        expected: ChatLink::Item(Item::new(1, ITEM_ID, None, Some(SIGIL_1_ID), None)?)
    );

    chatlink_test!(
        name: test_item_both_upgrades,
        text: "[&AgGqtgBg/18AACdgAAA=]",
        expected: ChatLink::Item(Item::new(1, ITEM_ID, None, Some(SIGIL_1_ID), Some(SIGIL_2_ID))?)
    );

    chatlink_test!(
        name: test_item_skinned,
        text: "[&AgGqtgCAfQ4AAA==]",
        expected: ChatLink::Item(Item::new(1, ITEM_ID, Some(SKIN_ID), None, None)?)
    );

    chatlink_test!(
        name: test_item_skinned_first_upgrade,
        text: "[&AgGqtgDAfQ4AAP9fAAA=]",
        expected: ChatLink::Item(Item::new(1, ITEM_ID, Some(SKIN_ID), Some(SIGIL_1_ID), None)?)
    );

    chatlink_test!(
        name: test_item_skinned_both_upgrades,
        text: "[&AgGqtgDgfQ4AAP9fAAAnYAAA]",
        expected: ChatLink::Item(Item::new(1, ITEM_ID, Some(SKIN_ID), Some(SIGIL_1_ID), Some(SIGIL_2_ID))?)
    );

    #[test]
    fn test_second_upgrade_only() -> Result<()> {
        let link = ChatLink::Item(Item::new(250, ITEM_ID, None, None, Some(SIGIL_2_ID))?);
        let data = link.to_bytes()?;
        assert_eq!(SECOND_UPGRADE_SLOT_IN_USE, data[5]);
        assert_eq!(10, data.len());
        assert_eq!(link, ChatLink::from_bytes(&data)?);
        Ok(())
    }

    #[test]
    fn test_item_id_out_of_range() {
        assert!(matches!(
            Item::plain(1, 1 << 24),
            Err(Error::IdOutOfRange {
                field: "Item `item_id`",
                ..
            })
        ));
        assert!(Item::new(1, ITEM_ID, Some(1 << 24), None, None).is_err());
        assert!(Item::new(1, ITEM_ID, None, Some(1 << 24), None).is_err());
        assert!(Item::new(1, ITEM_ID, None, None, Some(u32::MAX)).is_err());
    }
}
