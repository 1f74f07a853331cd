// Einfacher Push-Pull GPIO-Ausgang (Zusatz-LED)

use esp_core::{OutputError, OutputPin};
use esp_hal::gpio::{Level, Output, OutputConfig, OutputPin as HalOutputPin};

/// GPIO-Ausgang für `LED.Set` / `LED.Toggle`
pub struct GpioOutput<'d> {
    pin: Output<'d>,
}

impl<'d> GpioOutput<'d> {
    /// Konfiguriert den Pin als Ausgang, Startzustand: aus
    pub fn new(pin: impl HalOutputPin + 'd) -> Self {
        Self {
            pin: Output::new(pin, Level::Low, OutputConfig::default()),
        }
    }
}

impl OutputPin for GpioOutput<'_> {
    fn set(&mut self, on: bool) -> Result<(), OutputError> {
        self.pin.set_level(Level::from(on));
        Ok(())
    }

    fn toggle(&mut self) -> Result<(), OutputError> {
        self.pin.toggle();
        Ok(())
    }
}
