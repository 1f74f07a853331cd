// Library-Root: Hardware-Adapter und Tasks der Firmware
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{
    ByteSink, ByteSource, Clock, Device, DeviceConfig, DeviceIdentity, OutputError, OutputPin,
};

use crate::hal::{EmbassyClock, GpioOutput, RmtStatusLed, UartSink, UartSource};

// ============================================================================
// Type-Aliase
// ============================================================================
//
// Statt:  Device<EmbassyClock, UartSource<'d>, UartSink<'d>, RmtStatusLed<'d>, GpioOutput<'d>>
// Nutze:  FirmwareDevice<'d>

/// Device mit der echten ESP32-C6 Peripherie
pub type FirmwareDevice<'d> =
    Device<EmbassyClock, UartSource<'d>, UartSink<'d>, RmtStatusLed<'d>, GpioOutput<'d>>;
