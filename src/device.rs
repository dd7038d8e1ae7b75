mod material;
mod measurement_device;
mod temperature_device;
mod temperature_scale;

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;

pub use material::*;
pub use measurement_device::*;
pub use temperature_device::*;
pub use temperature_scale::*;

use crate::console::Console;

pub const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

/// Start/stop lifecycle shared by every device kind.
///
/// Implemented by [`MeasurementDevice`] and [`TemperatureDevice`] only; the
/// latter extends the former's messages instead of replacing them.
pub trait Instrument {
    fn is_active(&self) -> bool;

    fn start_measuring(&mut self, out: &mut impl Write) -> Result<()>;

    fn stop_measuring(&mut self, out: &mut impl Write) -> Result<()>;

    fn print(&self, out: &mut impl Write) -> Result<()>;
}

/// Asks for a 1-based choice until it parses as `T`.
pub fn prompt_choice<T, R, W>(console: &mut Console<R, W>, prompt: &str) -> Result<T>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    console.prompt_until(prompt, |token| {
        token.parse().map_err(|_| INVALID_CHOICE.to_owned())
    })
}
