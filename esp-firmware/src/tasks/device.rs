// Device Task - kooperative Run-Loop (UART RPC + Blink + Report)
use defmt::{info, warn};
use embassy_futures::yield_now;
use esp_hal::uart::{Config as UartConfig, Uart};
use esp_hal_smartled::smart_led_buffer;

use crate::config::*;
use crate::hal::{EmbassyClock, GpioOutput, RmtStatusLed, UartSink, UartSource};
use crate::{ByteSink, ByteSource, Clock, Device, FirmwareDevice, OutputPin};

/// Peripherie, die der Device-Task exklusiv übernimmt
pub struct DevicePeripherals {
    pub status_led: esp_hal::peripherals::GPIO8<'static>,
    pub rmt: esp_hal::peripherals::RMT<'static>,
    pub aux_led: esp_hal::peripherals::GPIO15<'static>,
    pub uart: esp_hal::peripherals::UART1<'static>,
    pub uart_tx: esp_hal::peripherals::GPIO4<'static>,
    pub uart_rx: esp_hal::peripherals::GPIO5<'static>,
}

/// Run-Loop - Testbare Logik ohne Hardware-Abhängigkeit
///
/// Ruft `tick()` endlos auf. Zwischen zwei Durchläufen wird die CPU kurz an den
/// Executor zurückgegeben, ein Durchlauf selbst wird nie unterbrochen.
pub async fn run_device<K, R, S, L, A>(mut device: Device<K, R, S, L, A>) -> !
where
    K: Clock,
    R: ByteSource,
    S: ByteSink,
    L: OutputPin,
    A: OutputPin,
{
    info!(
        "Device: Run loop started ({} v{})",
        device.identity().name,
        device.identity().version
    );
    loop {
        device.tick();
        yield_now().await;
    }
}

/// Device Task - Embassy Task für die Run-Loop
///
/// Dieser Task übernimmt die Hardware-Initialisierung (Bootstrap) und ruft dann
/// die generische `run_device()` Funktion auf.
#[embassy_executor::task]
pub async fn device_task(peripherals: DevicePeripherals) {
    // Buffer für SmartLED Daten erstellen (1 LED)
    let mut rmt_buffer = smart_led_buffer!(1);
    let status_led = RmtStatusLed::new(
        peripherals.status_led,
        peripherals.rmt,
        RMT_CLOCK_MHZ,
        &mut rmt_buffer,
        STATUS_LED_COLOR,
    )
    .expect("Failed to initialize RMT status LED");

    let aux_led = GpioOutput::new(peripherals.aux_led);

    // UART für JSON-RPC (TX/RX getrennt, beide blockierend)
    let uart = Uart::new(
        peripherals.uart,
        UartConfig::default().with_baudrate(UART_BAUDRATE),
    )
    .expect("Failed to initialize UART")
    .with_tx(peripherals.uart_tx)
    .with_rx(peripherals.uart_rx);
    let (rx, tx) = uart.split();

    let config = device_config();
    if config.identity.publish_topic.is_none() {
        warn!("Device: MQTT_TOPIC not set, publish reports are skipped");
    }

    // Registry-Konflikt beim Bootstrap ist fatal
    let device: FirmwareDevice<'_> = Device::bootstrap(
        config,
        EmbassyClock,
        UartSource::new(rx),
        UartSink::new(tx),
        status_led,
        aux_led,
    )
    .expect("RPC method registry conflict");

    run_device(device).await
}
