// Status-LED über RMT (WS2812/Neopixel)
//
// Die Onboard-RGB-LED des ESP32-C6 DevKits hat keinen einfachen GPIO-Pegel.
// "An" bedeutet hier: konfigurierte Farbe, "aus": schwarz.

use esp_core::{OutputError, OutputPin};
use esp_hal::Blocking;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

// Buffer-Größe für 1 LED (3 Farben * 8 Bits + 1 Reset)
const LED_BUFFER_SIZE: usize = 25;

const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Status-LED für den Blink-Task
///
/// Merkt sich den logischen Zustand, damit `toggle()` ohne Rücklesen funktioniert.
///
/// Hinweis: Der Buffer muss länger leben als der Writer, daher wird er im Task
/// erstellt und als Parameter übergeben statt im Constructor allokiert.
pub struct RmtStatusLed<'a> {
    led: SmartLedsAdapter<'a, LED_BUFFER_SIZE>,
    on_color: RGB8,
    is_on: bool,
}

impl<'a> RmtStatusLed<'a> {
    /// Erstellt eine neue RmtStatusLed
    ///
    /// # Parameter
    /// - `gpio8`: GPIO8 Peripheral für LED-Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer!(1) Macro)
    /// - `on_color`: Farbe im Zustand "an"
    ///
    /// # Fehlerbehandlung
    /// Gibt `OutputError::WriteFailed` zurück wenn das RMT nicht initialisiert werden kann
    pub fn new(
        gpio8: esp_hal::peripherals::GPIO8<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [esp_hal::rmt::PulseCode; LED_BUFFER_SIZE],
        on_color: RGB8,
    ) -> Result<Self, OutputError> {
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .map_err(|_| OutputError::WriteFailed)?;

        let led = SmartLedsAdapter::new(rmt.channel0, gpio8, buffer);

        Ok(Self {
            led,
            on_color,
            is_on: false,
        })
    }

    fn write(&mut self, on: bool) -> Result<(), OutputError> {
        let color = if on { self.on_color } else { OFF };
        self.led
            .write([color].into_iter())
            .map_err(|_| OutputError::WriteFailed)?;
        self.is_on = on;
        Ok(())
    }
}

impl OutputPin for RmtStatusLed<'_> {
    fn set(&mut self, on: bool) -> Result<(), OutputError> {
        self.write(on)
    }

    fn toggle(&mut self) -> Result<(), OutputError> {
        self.write(!self.is_on)
    }
}
