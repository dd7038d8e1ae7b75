use std::{fmt, str::FromStr};

use anyhow::{Context as _, Error, anyhow};

/// Display label for readings. The stored value is never converted between scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    pub const PROMPT: &'static str =
        "Enter temperature scale (1 for Celsius, 2 for Fahrenheit, 3 for Kelvin): ";

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "Celsius",
            TemperatureScale::Fahrenheit => "Fahrenheit",
            TemperatureScale::Kelvin => "Kelvin",
        }
    }

    /// Maps the 1-based menu choice to a scale.
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(TemperatureScale::Celsius),
            2 => Some(TemperatureScale::Fahrenheit),
            3 => Some(TemperatureScale::Kelvin),
            _ => None,
        }
    }
}

impl fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureScale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice: u32 = s
            .parse()
            .with_context(|| format!("temperature scale choice is not a number: {s}"))?;

        TemperatureScale::from_choice(choice)
            .ok_or_else(|| anyhow!("unknown temperature scale choice: {choice}"))
    }
}
