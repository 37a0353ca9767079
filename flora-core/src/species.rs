//! Species catalog: the descriptive profiles behind every plant variant.
//!
//! A [`SpeciesProfile`] carries the care targets (ideal water and sun plus
//! the tolerance band around them) and the visual parameters (colors,
//! particle scale) consumed by the generator and the animator. Profiles are
//! plain data; all behavioral differences between species live either here
//! or in the generation algorithm selected by [`SpeciesKind`].

use std::fmt;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generation and animation variant backing a species id.
///
/// Profiles reference algorithms by their string `id`; the mapping to a
/// variant happens at generation time, so catalogs loaded from disk cannot
/// desynchronize the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeciesKind {
    Rose,
    Monstera,
    Basil,
    Fern,
    Oak,
    SnakePlant,
}

impl SpeciesKind {
    /// Maps a catalog id to its generation variant, if the id is known.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "rose" => Some(Self::Rose),
            "monstera" => Some(Self::Monstera),
            "basil" => Some(Self::Basil),
            "fern" => Some(Self::Fern),
            "oak" => Some(Self::Oak),
            "snake-plant" => Some(Self::SnakePlant),
            _ => None,
        }
    }
}

/// An RGB color with components in `[0, 1]`, serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub Vec3);

impl Rgb {
    /// Builds a color from 8-bit channels.
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self(Vec3::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        ))
    }

    /// Parses a `#rrggbb` hex string. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError(hex.to_owned()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorParseError(hex.to_owned()))
        };
        Ok(Self::from_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            quantize(self.0.x),
            quantize(self.0.y),
            quantize(self.0.z)
        )
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Raised when a catalog color is not a readable `#rrggbb` string.
#[derive(Debug, Error)]
#[error("invalid hex color {0:?}, expected \"#rrggbb\"")]
pub struct ColorParseError(String);

/// Descriptive record for one plant variant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpeciesProfile {
    /// Stable identifier, also selects the generation algorithm.
    pub id: String,
    /// Display name shown in the viewer.
    pub name: String,
    /// One-sentence blurb for the species panel.
    pub description: String,
    /// Target soil moisture, 0-100.
    pub ideal_water: f32,
    /// Target daily light exposure, 0-100.
    pub ideal_sun: f32,
    /// Acceptable deviation from either target before care counts as poor.
    pub tolerance: f32,
    /// Color of wood particles at full health.
    pub trunk_color: Rgb,
    /// Color of foliage particles at full health.
    pub leaf_color: Rgb,
    /// Uniform multiplier applied to every generated particle position.
    pub particle_scale: f32,
}

impl SpeciesProfile {
    /// The generation variant for this profile's id, if recognized.
    pub fn kind(&self) -> Option<SpeciesKind> {
        SpeciesKind::from_id(&self.id)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.id.is_empty() {
            return Err(CatalogError::Validation("species id must not be empty".to_owned()));
        }
        for (field, value) in [
            ("ideal_water", self.ideal_water),
            ("ideal_sun", self.ideal_sun),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(CatalogError::Validation(format!(
                    "species {:?}: {field} must lie in 0..=100, got {value}",
                    self.id
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.tolerance) {
            return Err(CatalogError::Validation(format!(
                "species {:?}: tolerance must lie in 0..=100, got {}",
                self.id, self.tolerance
            )));
        }
        if self.particle_scale <= 0.0 || !self.particle_scale.is_finite() {
            return Err(CatalogError::Validation(format!(
                "species {:?}: particle_scale must be positive and finite, got {}",
                self.id, self.particle_scale
            )));
        }
        Ok(())
    }
}

/// Errors raised while loading or validating a species catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("catalog validation error: {0}")]
    Validation(String),
}

/// An ordered set of species profiles the viewer can cycle through.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    pub species: Vec<SpeciesProfile>,
}

impl Catalog {
    /// The built-in six-species library.
    pub fn builtin() -> Self {
        let profile = |id: &str,
                       name: &str,
                       description: &str,
                       ideal_water: f32,
                       ideal_sun: f32,
                       tolerance: f32,
                       trunk_color: Rgb,
                       leaf_color: Rgb,
                       particle_scale: f32| {
            SpeciesProfile {
                id: id.to_owned(),
                name: name.to_owned(),
                description: description.to_owned(),
                ideal_water,
                ideal_sun,
                tolerance,
                trunk_color,
                leaf_color,
                particle_scale,
            }
        };

        Self {
            species: vec![
                profile(
                    "rose",
                    "Red Rose",
                    "A classic symbol of romance. Requires plenty of sunlight to bloom.",
                    60.0,
                    80.0,
                    15.0,
                    Rgb::from_u8(0x2e, 0x8b, 0x57),
                    Rgb::from_u8(0xdc, 0x14, 0x3c),
                    1.0,
                ),
                profile(
                    "monstera",
                    "Monstera",
                    "The Swiss Cheese Plant. Famous for its large, fenestrated leaves.",
                    70.0,
                    40.0,
                    20.0,
                    Rgb::from_u8(0x22, 0x8b, 0x22),
                    Rgb::from_u8(0x32, 0xcd, 0x32),
                    1.1,
                ),
                profile(
                    "basil",
                    "Sweet Basil",
                    "A fragrant culinary herb. Loves moisture and warm sun.",
                    85.0,
                    75.0,
                    10.0,
                    Rgb::from_u8(0x6b, 0x8e, 0x23),
                    Rgb::from_u8(0x7c, 0xfc, 0x00),
                    0.8,
                ),
                profile(
                    "fern",
                    "Boston Fern",
                    "An ancient plant with lush arching fronds. Thrives in shade and humidity.",
                    90.0,
                    20.0,
                    25.0,
                    Rgb::from_u8(0x8b, 0x45, 0x13),
                    Rgb::from_u8(0x22, 0x8b, 0x22),
                    1.0,
                ),
                profile(
                    "oak",
                    "Oak Sapling",
                    "A sturdy hardwood tree. Slow growing but extremely resilient.",
                    40.0,
                    60.0,
                    30.0,
                    Rgb::from_u8(0x4d, 0x33, 0x19),
                    Rgb::from_u8(0x55, 0x6b, 0x2f),
                    0.6,
                ),
                profile(
                    "snake-plant",
                    "Snake Plant",
                    "Sansevieria. Almost indestructible. Has tall, sword-like leaves.",
                    20.0,
                    50.0,
                    40.0,
                    Rgb::from_u8(0x2f, 0x4f, 0x4f),
                    Rgb::from_u8(0x9a, 0xcd, 0x32),
                    1.2,
                ),
            ],
        }
    }

    /// Loads and validates a catalog from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            species = catalog.species.len(),
            "loaded species catalog"
        );
        Ok(catalog)
    }

    /// Parses and validates a catalog from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_yaml::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks the invariants every catalog must satisfy: at least one
    /// species, unique ids, valid profile numbers.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.species.is_empty() {
            return Err(CatalogError::Validation(
                "catalog must contain at least one species".to_owned(),
            ));
        }
        for (i, profile) in self.species.iter().enumerate() {
            profile.validate()?;
            if self.species[..i].iter().any(|other| other.id == profile.id) {
                return Err(CatalogError::Validation(format!(
                    "duplicate species id {:?}",
                    profile.id
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Looks up a profile by id.
    pub fn find(&self, id: &str) -> Option<&SpeciesProfile> {
        self.species.iter().find(|profile| profile.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
