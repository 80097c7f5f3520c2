/// Module for build template chat links.
///
/// Layout after the identifier byte:
///
/// ```text
/// u8       profession palette ID
/// 3 x      specialization ID (u8), packed major traits (u8)
/// 5 x      terrestrial skill (u16), aquatic skill (u16)
/// 16 bytes profession context window (zero filled)
/// u8       weapon count, followed by that many u16 palette IDs
/// u8       weapon skill override count, followed by that many u32 skill IDs
/// ```
///
/// The two trailing lists were added to the format later and are missing in older links.
use std::convert::{TryFrom, TryInto};

use super::Encode;
use crate::codec::{self, ByteReader, ByteWriter};
use crate::{Error, Profession, Result, Weapon};
use serde::{Deserialize, Serialize};
use tracing::debug;

const SPECIALIZATION_COUNT: usize = 3;
const MAJOR_TRAIT_COUNT: usize = 3;
const SKILL_COUNT: usize = 5;
const PROFESSION_CONTEXT_SIZE: usize = 16;
const MAX_LIST_LEN: usize = u8::MAX as usize;

// profession + specializations + interleaved skills + context window
const FIXED_SIZE: usize = 1 + SPECIALIZATION_COUNT * 2 + SKILL_COUNT * 2 * 2 + PROFESSION_CONTEXT_SIZE;

fn exactly<T, const N: usize>(field: &'static str, values: Vec<T>) -> Result<[T; N]> {
    let actual = values.len();
    values.try_into().map_err(|_| Error::InvalidArity {
        field,
        expected: N,
        actual,
    })
}

fn at_most_255<T>(field: &'static str, values: Vec<T>) -> Result<Vec<T>> {
    if values.len() > MAX_LIST_LEN {
        return Err(Error::ListTooLong {
            field,
            actual: values.len(),
        });
    }
    Ok(values)
}

/// A specialization with its selected major traits.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "RawSpecialization")]
pub struct Specialization {
    specialization_id: u8,
    major_traits: [Option<u8>; MAJOR_TRAIT_COUNT],
}

#[derive(Deserialize)]
struct RawSpecialization {
    specialization_id: u8,
    major_traits: Vec<Option<u8>>,
}

impl TryFrom<RawSpecialization> for Specialization {
    type Error = Error;

    fn try_from(raw: RawSpecialization) -> Result<Self> {
        Specialization::new(raw.specialization_id, raw.major_traits)
    }
}

impl Specialization {
    /// Creates a specialization. Each major trait is either unselected (`None`) or the index (0..=2) of the
    /// selected trait in its tier.
    pub fn new(specialization_id: u8, major_traits: Vec<Option<u8>>) -> Result<Self> {
        let major_traits: [Option<u8>; MAJOR_TRAIT_COUNT] = exactly("Specialization `major_traits`", major_traits)?;
        if let Some(index) = major_traits.iter().flatten().find(|index| **index > 2) {
            return Err(Error::MajorTraitOutOfRange(*index));
        }
        Ok(Specialization {
            specialization_id,
            major_traits,
        })
    }

    /// Unpacks the major traits from their wire representation (2 bits per tier, 0 = unselected).
    pub fn from_major_traits_byte(specialization_id: u8, packed: u8) -> Self {
        let mut major_traits = [None; MAJOR_TRAIT_COUNT];
        for (tier, major_trait) in major_traits.iter_mut().enumerate() {
            *major_trait = match (packed >> (tier * 2)) & 0x3 {
                0 => None,
                v => Some(v - 1),
            };
        }
        Specialization {
            specialization_id,
            major_traits,
        }
    }

    pub fn specialization_id(&self) -> u8 {
        self.specialization_id
    }

    pub fn major_traits(&self) -> &[Option<u8>] {
        &self.major_traits
    }

    pub fn major_traits_byte(&self) -> u8 {
        self.major_traits
            .iter()
            .enumerate()
            .fold(0, |packed, (tier, major_trait)| {
                let v = major_trait.map_or(0, |index| index + 1) & 0x3;
                packed | (v << (tier * 2))
            })
    }
}

/// Additional data stored for the professions with profession specific skill bars.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ProfessionContext {
    Ranger(RangerContext),
    Revenant(RevenantContext),
}

impl ProfessionContext {
    /// The profession this context belongs to.
    pub fn profession(&self) -> Profession {
        match self {
            ProfessionContext::Ranger(_) => Profession::Ranger,
            ProfessionContext::Revenant(_) => Profession::Revenant,
        }
    }

    fn write(&self, writer: &mut ByteWriter) {
        match self {
            ProfessionContext::Ranger(context) => {
                context.pets.iter().for_each(|pet| writer.put_u8(*pet));
                context.aquatic_pets.iter().for_each(|pet| writer.put_u8(*pet));
            }
            ProfessionContext::Revenant(context) => {
                context.legends.iter().for_each(|legend| writer.put_u8(*legend));
                context.aquatic_legends.iter().for_each(|legend| writer.put_u8(*legend));
                context
                    .inactive_legend_utility_skills
                    .iter()
                    .for_each(|skill| writer.put_u16(*skill));
                context
                    .inactive_aquatic_legend_utility_skills
                    .iter()
                    .for_each(|skill| writer.put_u16(*skill));
            }
        }
    }
}

/// The ranger's pets.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RangerContext {
    pets: [u8; 2],
    aquatic_pets: [u8; 2],
}

impl RangerContext {
    pub fn new(pets: Vec<u8>, aquatic_pets: Vec<u8>) -> Result<Self> {
        Ok(RangerContext {
            pets: exactly("RangerContext `pets`", pets)?,
            aquatic_pets: exactly("RangerContext `aquatic_pets`", aquatic_pets)?,
        })
    }

    pub fn pets(&self) -> &[u8] {
        &self.pets
    }

    pub fn aquatic_pets(&self) -> &[u8] {
        &self.aquatic_pets
    }
}

/// The revenant's legends and the utility skills of the inactive legends.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RevenantContext {
    legends: [u8; 2],
    aquatic_legends: [u8; 2],
    inactive_legend_utility_skills: [u16; 3],
    inactive_aquatic_legend_utility_skills: [u16; 3],
}

impl RevenantContext {
    pub fn new(
        legends: Vec<u8>,
        aquatic_legends: Vec<u8>,
        inactive_legend_utility_skills: Vec<u16>,
        inactive_aquatic_legend_utility_skills: Vec<u16>,
    ) -> Result<Self> {
        Ok(RevenantContext {
            legends: exactly("RevenantContext `legends`", legends)?,
            aquatic_legends: exactly("RevenantContext `aquatic_legends`", aquatic_legends)?,
            inactive_legend_utility_skills: exactly(
                "RevenantContext `inactive_legend_utility_skills`",
                inactive_legend_utility_skills,
            )?,
            inactive_aquatic_legend_utility_skills: exactly(
                "RevenantContext `inactive_aquatic_legend_utility_skills`",
                inactive_aquatic_legend_utility_skills,
            )?,
        })
    }

    pub fn legends(&self) -> &[u8] {
        &self.legends
    }

    pub fn aquatic_legends(&self) -> &[u8] {
        &self.aquatic_legends
    }

    pub fn inactive_legend_utility_skills(&self) -> &[u16] {
        &self.inactive_legend_utility_skills
    }

    pub fn inactive_aquatic_legend_utility_skills(&self) -> &[u16] {
        &self.inactive_aquatic_legend_utility_skills
    }
}

type ContextParser = fn(&mut ByteReader<'_>) -> Result<ProfessionContext>;

/// Professions that store a context in the build template and how to read it.
const CONTEXT_PARSERS: [(Profession, ContextParser); 2] = [
    (Profession::Ranger, read_ranger_context),
    (Profession::Revenant, read_revenant_context),
];

fn context_parser(profession: Profession) -> Option<ContextParser> {
    CONTEXT_PARSERS
        .iter()
        .find(|(p, _)| *p == profession)
        .map(|(_, parser)| *parser)
}

fn read_ranger_context(reader: &mut ByteReader<'_>) -> Result<ProfessionContext> {
    let pets = [reader.next_u8()?, reader.next_u8()?];
    let aquatic_pets = [reader.next_u8()?, reader.next_u8()?];
    Ok(ProfessionContext::Ranger(RangerContext { pets, aquatic_pets }))
}

fn read_revenant_context(reader: &mut ByteReader<'_>) -> Result<ProfessionContext> {
    let legends = [reader.next_u8()?, reader.next_u8()?];
    let aquatic_legends = [reader.next_u8()?, reader.next_u8()?];
    let inactive_legend_utility_skills = [reader.next_u16()?, reader.next_u16()?, reader.next_u16()?];
    let inactive_aquatic_legend_utility_skills = [reader.next_u16()?, reader.next_u16()?, reader.next_u16()?];
    Ok(ProfessionContext::Revenant(RevenantContext {
        legends,
        aquatic_legends,
        inactive_legend_utility_skills,
        inactive_aquatic_legend_utility_skills,
    }))
}

fn read_list<'a, T>(
    reader: &mut ByteReader<'a>,
    mut next: impl FnMut(&mut ByteReader<'a>) -> codec::Result<T>,
) -> Result<Vec<T>> {
    let count = reader.next_u8()? as usize;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(next(reader)?);
    }
    Ok(values)
}

/// A character build: profession, specializations, skills and profession specific data.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "RawBuildTemplate")]
pub struct BuildTemplate {
    profession_id: u8,
    specializations: [Specialization; SPECIALIZATION_COUNT],
    skills: [u16; SKILL_COUNT],
    aquatic_skills: [u16; SKILL_COUNT],
    profession_context: Option<ProfessionContext>,
    weapons: Vec<u16>,
    weapon_skill_overrides: Vec<u32>,
}

#[derive(Deserialize)]
struct RawBuildTemplate {
    profession_id: u8,
    specializations: Vec<Specialization>,
    skills: Vec<u16>,
    aquatic_skills: Vec<u16>,
    profession_context: Option<ProfessionContext>,
    #[serde(default)]
    weapons: Vec<u16>,
    #[serde(default)]
    weapon_skill_overrides: Vec<u32>,
}

impl TryFrom<RawBuildTemplate> for BuildTemplate {
    type Error = Error;

    fn try_from(raw: RawBuildTemplate) -> Result<Self> {
        BuildTemplate::new(
            raw.profession_id,
            raw.specializations,
            raw.skills,
            raw.aquatic_skills,
            raw.profession_context,
            raw.weapons,
            raw.weapon_skill_overrides,
        )
    }
}

impl BuildTemplate {
    /// Creates a build template.
    ///
    /// Rangers and revenants require their matching `ProfessionContext`, all other professions (including unknown
    /// palette IDs) must not have one.
    pub fn new(
        profession_id: u8,
        specializations: Vec<Specialization>,
        skills: Vec<u16>,
        aquatic_skills: Vec<u16>,
        profession_context: Option<ProfessionContext>,
        weapons: Vec<u16>,
        weapon_skill_overrides: Vec<u32>,
    ) -> Result<Self> {
        let profession = Profession::from_palette_id(profession_id);
        let expected = context_parser(profession).map(|_| profession);
        if profession_context.as_ref().map(ProfessionContext::profession) != expected {
            return Err(Error::ProfessionContextMismatch(profession));
        }

        Ok(BuildTemplate {
            profession_id,
            specializations: exactly("BuildTemplate `specializations`", specializations)?,
            skills: exactly("BuildTemplate `skills`", skills)?,
            aquatic_skills: exactly("BuildTemplate `aquatic_skills`", aquatic_skills)?,
            profession_context,
            weapons: at_most_255("BuildTemplate `weapons`", weapons)?,
            weapon_skill_overrides: at_most_255("BuildTemplate `weapon_skill_overrides`", weapon_skill_overrides)?,
        })
    }

    /// Same as `new`, taking the profession and weapon types instead of their palette IDs.
    pub fn with_profession(
        profession: Profession,
        specializations: Vec<Specialization>,
        skills: Vec<u16>,
        aquatic_skills: Vec<u16>,
        profession_context: Option<ProfessionContext>,
        weapons: &[Weapon],
        weapon_skill_overrides: Vec<u32>,
    ) -> Result<Self> {
        BuildTemplate::new(
            profession.palette_id(),
            specializations,
            skills,
            aquatic_skills,
            profession_context,
            weapons.iter().map(|weapon| weapon.palette_id()).collect(),
            weapon_skill_overrides,
        )
    }

    pub fn profession_id(&self) -> u8 {
        self.profession_id
    }

    pub fn profession(&self) -> Profession {
        Profession::from_palette_id(self.profession_id)
    }

    pub fn specializations(&self) -> &[Specialization] {
        &self.specializations
    }

    pub fn skills(&self) -> &[u16] {
        &self.skills
    }

    pub fn aquatic_skills(&self) -> &[u16] {
        &self.aquatic_skills
    }

    pub fn profession_context(&self) -> Option<&ProfessionContext> {
        self.profession_context.as_ref()
    }

    /// Weapon palette IDs.
    pub fn weapons(&self) -> &[u16] {
        &self.weapons
    }

    pub fn weapon_types(&self) -> Vec<Weapon> {
        self.weapons.iter().map(|id| Weapon::from_palette_id(*id)).collect()
    }

    pub fn weapon_skill_overrides(&self) -> &[u32] {
        &self.weapon_skill_overrides
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let profession_id = reader.next_u8()?;

        let mut specializations = Vec::with_capacity(SPECIALIZATION_COUNT);
        for _ in 0..SPECIALIZATION_COUNT {
            let specialization_id = reader.next_u8()?;
            let packed = reader.next_u8()?;
            specializations.push(Specialization::from_major_traits_byte(specialization_id, packed));
        }

        let mut skills = Vec::with_capacity(SKILL_COUNT);
        let mut aquatic_skills = Vec::with_capacity(SKILL_COUNT);
        for _ in 0..SKILL_COUNT {
            skills.push(reader.next_u16()?);
            aquatic_skills.push(reader.next_u16()?);
        }

        // The context window has a fixed size, no matter how much of it the profession uses.
        let offset = reader.position();
        let remaining = reader.remaining();
        if remaining < PROFESSION_CONTEXT_SIZE {
            return Err(codec::Error::UnexpectedEnd {
                pos: offset,
                wanted: PROFESSION_CONTEXT_SIZE,
                remaining,
            }
            .into());
        }
        let profession = Profession::from_palette_id(profession_id);
        let profession_context = match context_parser(profession) {
            Some(parse) => Some(parse(reader)?),
            None => None,
        };
        reader.set_position(offset + PROFESSION_CONTEXT_SIZE);

        let weapons = if reader.remaining() > 0 {
            read_list(reader, ByteReader::next_u16)?
        } else {
            debug!("Build template without weapons, assuming legacy format");
            Vec::new()
        };
        let weapon_skill_overrides = if reader.remaining() > 0 {
            read_list(reader, ByteReader::next_u32)?
        } else {
            Vec::new()
        };

        BuildTemplate::new(
            profession_id,
            specializations,
            skills,
            aquatic_skills,
            profession_context,
            weapons,
            weapon_skill_overrides,
        )
    }
}

impl Encode for BuildTemplate {
    fn encoded_len(&self) -> usize {
        FIXED_SIZE + 1 + self.weapons.len() * 2 + 1 + self.weapon_skill_overrides.len() * 4
    }

    fn write(&self, writer: &mut ByteWriter) {
        writer.put_u8(self.profession_id);
        for specialization in self.specializations.iter() {
            writer.put_u8(specialization.specialization_id);
            writer.put_u8(specialization.major_traits_byte());
        }
        for (skill, aquatic_skill) in self.skills.iter().zip(self.aquatic_skills.iter()) {
            writer.put_u16(*skill);
            writer.put_u16(*aquatic_skill);
        }

        let offset = writer.position();
        if let Some(context) = &self.profession_context {
            context.write(writer);
        }
        let context_size = writer.position() - offset;
        assert!(
            context_size <= PROFESSION_CONTEXT_SIZE,
            "unexpected profession context size: {}",
            context_size
        );
        writer.set_position(offset + PROFESSION_CONTEXT_SIZE);

        writer.put_u8(self.weapons.len() as u8);
        for weapon in self.weapons.iter() {
            writer.put_u16(*weapon);
        }
        writer.put_u8(self.weapon_skill_overrides.len() as u8);
        for skill in self.weapon_skill_overrides.iter() {
            writer.put_u32(*skill);
        }
    }
}
