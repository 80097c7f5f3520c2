/// Module for the chat links with a fixed layout.
use std::convert::TryFrom;

use super::Encode;
use crate::codec::{ByteReader, ByteWriter};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

const ID24_MAX: u32 = 0xFF_FFFF;

/// An identifier stored in three bytes on the wire.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "u32", into = "u32")]
pub(crate) struct Id24(u32);

impl Id24 {
    pub(crate) fn new(field: &'static str, value: u32) -> Result<Self> {
        if value > ID24_MAX {
            return Err(Error::IdOutOfRange { field, value });
        }
        Ok(Id24(value))
    }

    #[inline]
    pub(crate) fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Id24 {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Id24::new("identifier", value)
    }
}

impl From<Id24> for u32 {
    fn from(id: Id24) -> u32 {
        id.0
    }
}

/// An amount of coins (in copper).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Coin {
    amount: u32,
}

impl Coin {
    pub fn new(amount: u32) -> Self {
        Coin { amount }
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Coin::new(reader.next_u32()?))
    }
}

impl Encode for Coin {
    fn encoded_len(&self) -> usize {
        4
    }

    fn write(&self, writer: &mut ByteWriter) {
        writer.put_u32(self.amount);
    }
}

// Links that consist of a single padded identifier.
macro_rules! padded_id_link {
    ($(#[$meta:meta])* $name:ident, $field:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
        pub struct $name {
            $field: Id24,
        }

        impl $name {
            pub fn new($field: u32) -> Result<Self> {
                Ok($name {
                    $field: Id24::new(concat!(stringify!($name), " `", stringify!($field), "`"), $field)?,
                })
            }

            pub fn $field(&self) -> u32 {
                self.$field.get()
            }

            pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
                $name::new(reader.next_padded_id()?)
            }
        }

        impl Encode for $name {
            fn encoded_len(&self) -> usize {
                4
            }

            fn write(&self, writer: &mut ByteWriter) {
                writer.put_padded_id(self.$field.get());
            }
        }
    };
}

padded_id_link!(
    /// A text of a non player character.
    NpcText,
    text_id
);
padded_id_link!(
    /// A point of interest (landmark, waypoint or vista).
    PoI,
    poi_id
);
padded_id_link!(Skill, skill_id);
padded_id_link!(Trait, trait_id);
padded_id_link!(Recipe, recipe_id);
padded_id_link!(Skin, skin_id);
padded_id_link!(Outfit, outfit_id);
padded_id_link!(Achievement, achievement_id);

/// An objective in World versus World.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct WvWObjective {
    objective_id: Id24,
    map_id: Id24,
}

impl WvWObjective {
    pub fn new(objective_id: u32, map_id: u32) -> Result<Self> {
        Ok(WvWObjective {
            objective_id: Id24::new("WvWObjective `objective_id`", objective_id)?,
            map_id: Id24::new("WvWObjective `map_id`", map_id)?,
        })
    }

    pub fn objective_id(&self) -> u32 {
        self.objective_id.get()
    }

    pub fn map_id(&self) -> u32 {
        self.map_id.get()
    }

    /// The objective's ID as used by the official API (`{map_id}-{objective_id}`).
    pub fn api_id(&self) -> String {
        format!("{}-{}", self.map_id(), self.objective_id())
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let objective_id = reader.next_padded_id()?;
        let map_id = reader.next_padded_id()?;
        WvWObjective::new(objective_id, map_id)
    }
}

impl Encode for WvWObjective {
    fn encoded_len(&self) -> usize {
        8
    }

    fn write(&self, writer: &mut ByteWriter) {
        writer.put_padded_id(self.objective_id.get());
        writer.put_padded_id(self.map_id.get());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatlink::ChatLink;
    use crate::codec;
    use crate::decode_chat_link;

    chatlink_test!(
        name: test_coin,
        text: "[&AdsnAAA=]",
        expected: ChatLink::Coin(Coin::new(10203))
    );

    chatlink_test!(
        name: test_npc_text_10007,
        text: "[&AxcnAAA=]",
        expected: ChatLink::NpcText(NpcText::new(10007)?)
    );

    chatlink_test!(
        name: test_npc_text_10008,
        text: "[&AxgnAAA=]",
        expected: ChatLink::NpcText(NpcText::new(10008)?)
    );

    chatlink_test!(
        name: test_npc_text_10016,
        text: "[&AyAnAAA=]",
        expected: ChatLink::NpcText(NpcText::new(10016)?)
    );

    chatlink_test!(
        name: test_poi_56,
        text: "[&BDgAAAA=]",
        expected: ChatLink::PoI(PoI::new(56)?)
    );

    chatlink_test!(
        name: test_poi_72,
        text: "[&BEgAAAA=]",
        expected: ChatLink::PoI(PoI::new(72)?)
    );

    chatlink_test!(
        name: test_poi_825,
        text: "[&BDkDAAA=]",
        expected: ChatLink::PoI(PoI::new(825)?)
    );

    chatlink_test!(
        name: test_skill_743,
        text: "[&BucCAAA=]",
        expected: ChatLink::Skill(Skill::new(743)?)
    );

    chatlink_test!(
        name: test_skill_5491,
        text: "[&BnMVAAA=]",
        expected: ChatLink::Skill(Skill::new(5491)?)
    );

    chatlink_test!(
        name: test_skill_5501,
        text: "[&Bn0VAAA=]",
        expected: ChatLink::Skill(Skill::new(5501)?)
    );

    chatlink_test!(
        name: test_trait,
        text: "[&B4YCAAA=]",
        expected: ChatLink::Trait(Trait::new(646)?)
    );

    chatlink_test!(
        name: test_recipe_1,
        text: "[&CQEAAAA=]",
        expected: ChatLink::Recipe(Recipe::new(1)?)
    );

    chatlink_test!(
        name: test_recipe_7,
        text: "[&CQcAAAA=]",
        expected: ChatLink::Recipe(Recipe::new(7)?)
    );

    chatlink_test!(
        name: test_skin,
        text: "[&CgQAAAA=]",
        expected: ChatLink::Skin(Skin::new(4)?)
    );

    chatlink_test!(
        name: test_outfit,
        text: "[&CwQAAAA=]",
        expected: ChatLink::Outfit(Outfit::new(4)?)
    );

    chatlink_test!(
        name: test_wvw_objective,
        text: "[&DAYAAAAmAAAA]",
        expected: ChatLink::WvWObjective(WvWObjective::new(6, 38)?)
    );

    chatlink_test!(
        name: test_achievement,
        text: "[&DgEAAAA=]",
        expected: ChatLink::Achievement(Achievement::new(1)?)
    );

    #[test]
    fn test_wvw_objective_api_id() -> Result<()> {
        assert_eq!("38-6", WvWObjective::new(6, 38)?.api_id());
        Ok(())
    }

    #[test]
    fn test_id_out_of_range() {
        assert!(matches!(
            Skill::new(0x100_0000),
            Err(Error::IdOutOfRange {
                field: "Skill `skill_id`",
                value: 0x100_0000
            })
        ));
        assert!(WvWObjective::new(1, 0x100_0000).is_err());
        assert!(Achievement::new(ID24_MAX).is_ok());
    }

    #[test]
    fn test_non_zero_padding() {
        // Skill link with 0x01 in the padding byte
        assert!(matches!(
            decode_chat_link("[&BucCAAE=]"),
            Err(Error::Codec(codec::Error::NonZeroPadding { value: 1, pos: 4 }))
        ));
    }
}
