use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context as _, Error, Result, bail};
use tracing::{debug, info};

use crate::console::Console;
use crate::device::{Instrument, Material, MeasurementDevice, TemperatureDevice, prompt_choice};

const INVALID_OPTION: &str = "Invalid option. Please try again.";

const MAIN_MENU: &str = "\nChoose an option:\n\
    1. Start measuring\n\
    2. Stop measuring\n\
    3. Print device info\n\
    4. Set temperature\n\
    5. Print temperature\n\
    6. Change device attributes\n\
    0. Exit";

const ATTRIBUTE_MENU: &str = "Choose an attribute to change:\n\
    1. Name\n\
    2. Unit\n\
    3. Min Value\n\
    4. Max Value\n\
    5. Material\n\
    6. Temperature Scale\n\
    0. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainOption {
    StartMeasuring,
    StopMeasuring,
    PrintDevice,
    SetTemperature,
    PrintTemperature,
    ChangeAttributes,
    Exit,
}

impl FromStr for MainOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let option: u32 = s
            .parse()
            .with_context(|| format!("menu option is not a number: {s}"))?;

        match option {
            1 => Ok(MainOption::StartMeasuring),
            2 => Ok(MainOption::StopMeasuring),
            3 => Ok(MainOption::PrintDevice),
            4 => Ok(MainOption::SetTemperature),
            5 => Ok(MainOption::PrintTemperature),
            6 => Ok(MainOption::ChangeAttributes),
            0 => Ok(MainOption::Exit),
            _ => bail!("unknown menu option: {option}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOption {
    Name,
    Unit,
    MinValue,
    MaxValue,
    Material,
    TemperatureScale,
    Exit,
}

impl FromStr for AttributeOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let option: u32 = s
            .parse()
            .with_context(|| format!("attribute option is not a number: {s}"))?;

        match option {
            1 => Ok(AttributeOption::Name),
            2 => Ok(AttributeOption::Unit),
            3 => Ok(AttributeOption::MinValue),
            4 => Ok(AttributeOption::MaxValue),
            5 => Ok(AttributeOption::Material),
            6 => Ok(AttributeOption::TemperatureScale),
            0 => Ok(AttributeOption::Exit),
            _ => bail!("unknown attribute option: {option}"),
        }
    }
}

/// Runs a whole session: the startup questions, then the main menu until Exit.
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<TemperatureDevice> {
    let mut device = read_device(console).context("failed to set up device")?;
    info!(device = %device.device().name(), "device ready");

    console.writeln(MAIN_MENU)?;
    loop {
        let option = prompt_option::<MainOption, _, _>(console)?;
        debug!(?option, "main menu");

        match option {
            MainOption::StartMeasuring => device.start_measuring(console.output())?,
            MainOption::StopMeasuring => device.stop_measuring(console.output())?,
            MainOption::PrintDevice => device.print(console.output())?,
            MainOption::SetTemperature => device.set_current_temperature(console)?,
            MainOption::PrintTemperature => device.print_temperature(console.output())?,
            MainOption::ChangeAttributes => change_attributes(&mut device, console)?,
            MainOption::Exit => {
                console.writeln("Exiting program.")?;
                return Ok(device);
            }
        }
    }
}

/// Startup sequence: name, unit, bounds, material, then the scale.
pub fn read_device<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<TemperatureDevice> {
    let name = console.prompt_line("Enter device name: ")?;
    let unit = console.prompt_line("Enter unit: ")?;
    let min_value = console.prompt_number("Enter min value: ")?;
    let max_value = console.prompt_number("Enter max value: ")?;
    let material: Material = prompt_choice(console, Material::PROMPT)?;

    let device = MeasurementDevice::new(name, unit, min_value, max_value, material);
    TemperatureDevice::prompt(device, console)
}

fn change_attributes<R: BufRead, W: Write>(
    device: &mut TemperatureDevice,
    console: &mut Console<R, W>,
) -> Result<()> {
    console.writeln(ATTRIBUTE_MENU)?;
    loop {
        let option = prompt_option::<AttributeOption, _, _>(console)?;
        debug!(?option, "attribute menu");

        match option {
            AttributeOption::Name => device.device_mut().set_name(console)?,
            AttributeOption::Unit => device.device_mut().set_unit(console)?,
            AttributeOption::MinValue => device.device_mut().set_min_value(console)?,
            AttributeOption::MaxValue => device.device_mut().set_max_value(console)?,
            AttributeOption::Material => device.device_mut().set_material(console)?,
            AttributeOption::TemperatureScale => device.set_temperature_scale(console)?,
            AttributeOption::Exit => return Ok(()),
        }
    }
}

fn prompt_option<T, R, W>(console: &mut Console<R, W>) -> Result<T>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    console.prompt_until("Enter option: ", |token| {
        token.parse().map_err(|_| INVALID_OPTION.to_owned())
    })
}
