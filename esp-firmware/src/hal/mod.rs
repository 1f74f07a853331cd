// Hardware Abstraction Layer (HAL) Module
//
// Implementiert die Traits aus esp-core (Clock, OutputPin, ByteSink, ByteSource)
// für die ESP32-C6 Peripherie.

pub mod clock;
pub mod gpio_output;
pub mod led_writer;
pub mod uart;

pub use clock::EmbassyClock;
pub use gpio_output::GpioOutput;
pub use led_writer::RmtStatusLed;
pub use uart::{UartSink, UartSource};
