use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{debug, info};

use crate::console::Console;
use crate::device::{Instrument, Material, prompt_choice};

const BORDER: &str = "============";

/// A bounded-range instrument with editable descriptive attributes.
///
/// The bounds are independent: `min_value > max_value` is allowed and simply
/// leaves no reading in range.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementDevice {
    name: String,
    unit: String,
    min_value: f64,
    max_value: f64,
    material: Material,
    active: bool,
}

impl MeasurementDevice {
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        min_value: f64,
        max_value: f64,
        material: Material,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            min_value,
            max_value,
            material,
            active: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn material(&self) -> Material {
        self.material
    }

    /// Inclusive at both bounds.
    pub fn in_range(&self, value: f64) -> bool {
        value >= self.min_value && value <= self.max_value
    }

    pub fn set_name<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        self.name = console.prompt_text("Enter new device name: ")?;
        debug!(name = %self.name, "device name changed");
        Ok(())
    }

    pub fn set_unit<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        self.unit = console.prompt_text("Enter new unit: ")?;
        debug!(unit = %self.unit, "device unit changed");
        Ok(())
    }

    pub fn set_min_value<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        self.min_value = console.prompt_number("Enter new min value: ")?;
        debug!(min_value = self.min_value, "device min value changed");
        Ok(())
    }

    pub fn set_max_value<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        self.max_value = console.prompt_number("Enter new max value: ")?;
        debug!(max_value = self.max_value, "device max value changed");
        Ok(())
    }

    pub fn set_material<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        self.material = prompt_choice(console, Material::PROMPT)?;
        debug!(material = %self.material, "device material changed");
        Ok(())
    }
}

impl Instrument for MeasurementDevice {
    fn is_active(&self) -> bool {
        self.active
    }

    fn start_measuring(&mut self, out: &mut impl Write) -> Result<()> {
        if self.active {
            return Ok(());
        }

        writeln!(out, "\nStart of measurement")?;
        self.active = true;
        info!(device = %self.name, "measurement started");

        Ok(())
    }

    fn stop_measuring(&mut self, out: &mut impl Write) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        writeln!(out, "End of measurement\n")?;
        self.active = false;
        info!(device = %self.name, "measurement stopped");

        Ok(())
    }

    fn print(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "{BORDER}")?;
        writeln!(out, "Name: {}", self.name)?;
        writeln!(out, "Unit: {}", self.unit)?;
        writeln!(out, "Min Value: {}", self.min_value)?;
        writeln!(out, "Max Value: {}", self.max_value)?;
        writeln!(out, "Material: {}", self.material)?;
        writeln!(out, "{BORDER}")?;

        Ok(())
    }
}
