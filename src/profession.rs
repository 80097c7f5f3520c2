/// Module for mapping professions to the palette IDs used in build templates.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// A profession as identified by its palette ID.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
pub enum Profession {
    /// Any unknown or unexpected palette ID.
    Unknown = 0,
    Guardian = 1,
    Warrior = 2,
    Engineer = 3,
    Ranger = 4,
    Thief = 5,
    Elementalist = 6,
    Mesmer = 7,
    Necromancer = 8,
    Revenant = 9,
}

impl Profession {
    /// Returns the profession for the given palette ID, or `Profession::Unknown`.
    pub fn from_palette_id(palette_id: u8) -> Self {
        match palette_id {
            1 => Profession::Guardian,
            2 => Profession::Warrior,
            3 => Profession::Engineer,
            4 => Profession::Ranger,
            5 => Profession::Thief,
            6 => Profession::Elementalist,
            7 => Profession::Mesmer,
            8 => Profession::Necromancer,
            9 => Profession::Revenant,
            _ => Profession::Unknown,
        }
    }

    pub fn palette_id(self) -> u8 {
        self as u8
    }

    /// The profession's ID as used by the official API. Empty for `Profession::Unknown`.
    pub fn api_name(self) -> &'static str {
        match self {
            Profession::Unknown => "",
            Profession::Guardian => "Guardian",
            Profession::Warrior => "Warrior",
            Profession::Engineer => "Engineer",
            Profession::Ranger => "Ranger",
            Profession::Thief => "Thief",
            Profession::Elementalist => "Elementalist",
            Profession::Mesmer => "Mesmer",
            Profession::Necromancer => "Necromancer",
            Profession::Revenant => "Revenant",
        }
    }
}

impl Default for Profession {
    fn default() -> Self {
        Profession::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_palette_id_mapping() {
        for profession in Profession::iter() {
            assert_eq!(profession, Profession::from_palette_id(profession.palette_id()));
        }
    }

    #[test]
    fn test_unknown_palette_ids() {
        assert_eq!(Profession::Unknown, Profession::from_palette_id(0));
        assert_eq!(Profession::Unknown, Profession::from_palette_id(10));
        assert_eq!(Profession::Unknown, Profession::from_palette_id(0xFF));
    }

    #[test]
    fn test_api_name() {
        assert_eq!("Revenant", Profession::Revenant.api_name());
        assert_eq!(Profession::Revenant.to_string(), Profession::Revenant.api_name());
        assert_eq!("", Profession::Unknown.api_name());
    }
}
