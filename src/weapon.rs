/// Module for mapping weapon types to the palette IDs used in build templates.
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// A weapon type as identified by its palette ID.
///
/// Build templates store plain palette IDs, unknown values are kept as they are on the wire and only map to
/// `Weapon::Unknown` here.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[repr(u16)]
pub enum Weapon {
    Unknown = 0x00,
    Axe = 0x05,
    Longbow = 0x23,
    Dagger = 0x2F,
    Focus = 0x31,
    Greatsword = 0x32,
    Hammer = 0x33,
    Mace = 0x35,
    Pistol = 0x36,
    Rifle = 0x55,
    Scepter = 0x56,
    Shield = 0x57,
    Staff = 0x59,
    Sword = 0x5A,
    Torch = 0x66,
    Warhorn = 0x67,
    Shortbow = 0x6B,
}

impl Weapon {
    /// Returns the weapon for the given palette ID, or `Weapon::Unknown`.
    pub fn from_palette_id(palette_id: u16) -> Self {
        Weapon::iter()
            .find(|weapon| weapon.palette_id() == palette_id)
            .unwrap_or(Weapon::Unknown)
    }

    pub fn palette_id(self) -> u16 {
        self as u16
    }
}

impl Default for Weapon {
    fn default() -> Self {
        Weapon::Unknown
    }
}
