use std::{fmt, str::FromStr};

use anyhow::{Context as _, Error, anyhow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Plastic,
    Metal,
    Glass,
}

impl Material {
    pub const PROMPT: &'static str = "Enter material (1 for Plastic, 2 for Metal, 3 for Glass): ";

    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Plastic => "Plastic",
            Material::Metal => "Metal",
            Material::Glass => "Glass",
        }
    }

    /// Maps the 1-based menu choice to a material.
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Material::Plastic),
            2 => Some(Material::Metal),
            3 => Some(Material::Glass),
            _ => None,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Material {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice: u32 = s
            .parse()
            .with_context(|| format!("material choice is not a number: {s}"))?;

        Material::from_choice(choice).ok_or_else(|| anyhow!("unknown material choice: {choice}"))
    }
}
