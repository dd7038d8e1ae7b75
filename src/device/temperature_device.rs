use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use crate::console::{Console, parse_number};
use crate::device::{Instrument, MeasurementDevice, TemperatureScale, prompt_choice};

/// A thermometer: a [`MeasurementDevice`] with a current reading and a scale label.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureDevice {
    device: MeasurementDevice,
    current_temperature: Option<f64>,
    temperature_scale: TemperatureScale,
}

impl TemperatureDevice {
    pub fn new(device: MeasurementDevice, temperature_scale: TemperatureScale) -> Self {
        Self {
            device,
            current_temperature: None,
            temperature_scale,
        }
    }

    /// Builds the thermometer, asking for its scale until a valid choice is given.
    pub fn prompt<R: BufRead, W: Write>(
        device: MeasurementDevice,
        console: &mut Console<R, W>,
    ) -> Result<Self> {
        let temperature_scale = prompt_choice(console, TemperatureScale::PROMPT)?;
        Ok(Self::new(device, temperature_scale))
    }

    pub fn device(&self) -> &MeasurementDevice {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut MeasurementDevice {
        &mut self.device
    }

    /// `None` until the first reading is accepted.
    pub fn current_temperature(&self) -> Option<f64> {
        self.current_temperature
    }

    pub fn temperature_scale(&self) -> TemperatureScale {
        self.temperature_scale
    }

    /// Reads a temperature within the device range. Refused without reading
    /// anything while the device is inactive.
    pub fn set_current_temperature<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        if !self.device.is_active() {
            debug!(device = %self.device.name(), "temperature rejected, device is not active");
            return console.writeln("Device is not ACTIVE!!!");
        }

        let min = self.device.min_value();
        let max = self.device.max_value();
        let prompt = format!("Enter current temperature ({min} - {max}): ");

        let device = &self.device;
        let temperature = console.prompt_until(&prompt, |token| {
            let value = parse_number(token)?;
            if !device.in_range(value) {
                return Err(format!(
                    "Temperature out of range. Please enter a value between {min} and {max}."
                ));
            }
            Ok(value)
        })?;

        self.current_temperature = Some(temperature);
        debug!(temperature, scale = %self.temperature_scale, "temperature recorded");

        Ok(())
    }

    pub fn print_temperature(&self, out: &mut impl Write) -> Result<()> {
        let scale = self.temperature_scale;
        match self.current_temperature {
            Some(value) => writeln!(out, "Current Temperature: {value} {scale}")?,
            None => writeln!(out, "Current Temperature: not set {scale}")?,
        }

        Ok(())
    }

    pub fn set_temperature_scale<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        self.temperature_scale = prompt_choice(console, TemperatureScale::PROMPT)?;
        debug!(scale = %self.temperature_scale, "temperature scale changed");
        Ok(())
    }
}

impl Instrument for TemperatureDevice {
    fn is_active(&self) -> bool {
        self.device.is_active()
    }

    fn start_measuring(&mut self, out: &mut impl Write) -> Result<()> {
        self.device.start_measuring(out)?;
        writeln!(out, "Temperature measurement started")?;
        Ok(())
    }

    fn stop_measuring(&mut self, out: &mut impl Write) -> Result<()> {
        self.device.stop_measuring(out)?;
        writeln!(out, "Temperature measurement stopped")?;
        Ok(())
    }

    fn print(&self, out: &mut impl Write) -> Result<()> {
        self.device.print(out)?;
        self.print_temperature(out)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::EnvFilter;

    use super::*;
    use crate::device::Material;

    fn thermometer(min: f64, max: f64) -> TemperatureDevice {
        TemperatureDevice::new(
            MeasurementDevice::new("Therm1", "C", min, max, Material::Metal),
            TemperatureScale::Celsius,
        )
    }

    fn console(input: &str) -> Console<Cursor<&[u8]>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes()), Vec::new())
    }

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn status_line_prints_even_without_transition() {
        let mut device = thermometer(0.0, 100.0);
        let mut out: Vec<u8> = Vec::new();

        device.start_measuring(&mut out).unwrap();
        device.start_measuring(&mut out).unwrap();
        device.stop_measuring(&mut out).unwrap();
        device.stop_measuring(&mut out).unwrap();

        assert!(!device.is_active());
        assert_eq!(
            text(out),
            "\nStart of measurement\n\
             Temperature measurement started\n\
             Temperature measurement started\n\
             End of measurement\n\n\
             Temperature measurement stopped\n\
             Temperature measurement stopped\n"
        );
    }

    #[test]
    fn inactive_device_refuses_reading_without_consuming_input() {
        let mut device = thermometer(0.0, 100.0);
        let mut c = console("42\n");

        device.set_current_temperature(&mut c).unwrap();
        assert_eq!(device.current_temperature(), None);
        assert_eq!(c.read_token().unwrap(), "42");
        assert_eq!(text(c.into_output()), "Device is not ACTIVE!!!\n");
    }

    #[test]
    fn out_of_range_reading_is_retried() {
        let mut device = thermometer(0.0, 100.0);
        device.start_measuring(&mut std::io::sink()).unwrap();

        let mut c = console("150 -0.5 warm 37\n");
        device.set_current_temperature(&mut c).unwrap();
        assert_eq!(device.current_temperature(), Some(37.0));
        assert!(device.is_active());

        let out = text(c.into_output());
        assert_eq!(out.matches("Enter current temperature (0 - 100): ").count(), 4);
        assert_eq!(
            out.matches("Temperature out of range. Please enter a value between 0 and 100.")
                .count(),
            2
        );
        assert_eq!(out.matches("Invalid number. Please try again.").count(), 1);
    }

    #[test]
    fn bounds_are_accepted() {
        let mut device = thermometer(10.0, 20.0);
        device.start_measuring(&mut std::io::sink()).unwrap();

        let mut c = console("10\n");
        device.set_current_temperature(&mut c).unwrap();
        assert_eq!(device.current_temperature(), Some(10.0));

        let mut c = console("20\n");
        device.set_current_temperature(&mut c).unwrap();
        assert_eq!(device.current_temperature(), Some(20.0));
    }

    #[test]
    fn reading_in_range_shows_with_scale_name() {
        let mut device = thermometer(10.0, 20.0);
        device.start_measuring(&mut std::io::sink()).unwrap();
        device.set_current_temperature(&mut console("15\n")).unwrap();

        let mut out: Vec<u8> = Vec::new();
        device.print_temperature(&mut out).unwrap();
        assert_eq!(text(out), "Current Temperature: 15 Celsius\n");
    }

    #[test]
    fn unset_reading_prints_placeholder() {
        let mut out: Vec<u8> = Vec::new();
        thermometer(0.0, 1.0).print_temperature(&mut out).unwrap();
        assert_eq!(text(out), "Current Temperature: not set Celsius\n");
    }

    #[test]
    fn scale_only_relabels_reading() {
        let mut device = thermometer(0.0, 100.0);
        device.start_measuring(&mut std::io::sink()).unwrap();
        device.set_current_temperature(&mut console("21.5\n")).unwrap();

        let mut c = console("5\n3\n");
        device.set_temperature_scale(&mut c).unwrap();
        assert_eq!(device.temperature_scale(), TemperatureScale::Kelvin);
        assert_eq!(device.current_temperature(), Some(21.5));
        assert!(text(c.into_output()).contains("Invalid choice. Please try again."));
    }

    #[test]
    fn prompt_asks_for_scale_until_valid() {
        let base = MeasurementDevice::new("T", "F", 0.0, 1.0, Material::Glass);
        let mut c = console("x\n2\n");
        let device = TemperatureDevice::prompt(base, &mut c).unwrap();
        assert_eq!(device.temperature_scale(), TemperatureScale::Fahrenheit);
        assert!(!device.is_active());
        assert_eq!(
            text(c.into_output()),
            format!(
                "{p}Invalid choice. Please try again.\n{p}",
                p = TemperatureScale::PROMPT
            )
        );
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn refused_reading_log(filter: &str) -> String {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut device = thermometer(0.0, 100.0);
            device.set_current_temperature(&mut console("")).unwrap();
        });

        let bytes = logs.0.lock().unwrap().clone();
        text(bytes)
    }

    #[test]
    fn refused_reading_is_quiet_at_default_filter() {
        assert_eq!(refused_reading_log("warn"), "");
        assert!(refused_reading_log("debug").contains("device is not active"));
    }

    #[test]
    fn large_and_precise_readings_print_in_full() {
        let mut device = thermometer(0.0, 1_000_000.0);
        device.start_measuring(&mut std::io::sink()).unwrap();
        device.set_current_temperature(&mut console("1000000\n")).unwrap();

        let mut out: Vec<u8> = Vec::new();
        device.print(&mut out).unwrap();
        let out = text(out);
        assert!(out.contains("Max Value: 1000000\n"));
        assert!(out.contains("Current Temperature: 1000000 Celsius\n"));

        device.set_current_temperature(&mut console("21.123456\n")).unwrap();
        let mut out: Vec<u8> = Vec::new();
        device.print_temperature(&mut out).unwrap();
        assert_eq!(text(out), "Current Temperature: 21.123456 Celsius\n");
    }
}
