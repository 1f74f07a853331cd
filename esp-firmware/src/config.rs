// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

use esp_core::types::{DEFAULT_BLINK_PERIOD_MS, DEFAULT_POLL_TIMEOUT_MS, DEFAULT_REPORT_PERIOD_MS};
use esp_core::{DeviceConfig, DeviceIdentity, Period};
use rgb::RGB8;

// ============================================================================
// Geräte-Identität
// ============================================================================

/// Gerätename für Shadow-Reports
/// Wird zur Build-Zeit aus der Environment Variable DEVICE_NAME geladen (optional)
pub const DEVICE_NAME: &str = match option_env!("DEVICE_NAME") {
    Some(name) => name,
    None => "esp32c6-rpc",
};

/// Firmware-Version (aus Cargo.toml)
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MQTT Publish Topic für Status-Reports
/// Wird zur Build-Zeit aus der Environment Variable MQTT_TOPIC geladen.
/// Ohne Topic wird jeder zweite Report (MQTT.Pub) übersprungen.
pub const MQTT_TOPIC: Option<&str> = option_env!("MQTT_TOPIC");

// ============================================================================
// Zeitverhalten
// ============================================================================

/// Blink-Periode nach dem Start in Millisekunden (per Shadow.Delta änderbar)
pub const BLINK_PERIOD_MS: u32 = DEFAULT_BLINK_PERIOD_MS;

/// Report-Periode in Millisekunden
pub const REPORT_PERIOD_MS: u32 = DEFAULT_REPORT_PERIOD_MS;

/// Maximale Wartezeit auf ein UART-Byte pro Loop-Durchlauf
pub const UART_POLL_TIMEOUT_MS: u32 = DEFAULT_POLL_TIMEOUT_MS;

// ============================================================================
// LED Konfiguration
// ============================================================================

/// GPIO-Pin für die RGB Status-LED (WS2812/Neopixel, Blink-Task)
pub const STATUS_LED_GPIO_PIN: u8 = 8;

/// GPIO-Pin für die Zusatz-LED (LED.Set / LED.Toggle)
pub const AUX_LED_GPIO_PIN: u8 = 15;

/// Helligkeits-Level für die Status-LED (0-255)
/// Wert ist gedimmt für Augenschonung
pub const LED_BRIGHTNESS: u8 = 10;

/// Farbe der Status-LED im Zustand "an"
pub const STATUS_LED_COLOR: RGB8 = RGB8 {
    r: 0,
    g: LED_BRIGHTNESS,
    b: 0,
};

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

// ============================================================================
// UART Konfiguration (JSON-RPC Link)
// ============================================================================

/// Baudrate der RPC-Verbindung
pub const UART_BAUDRATE: u32 = 115_200;

/// GPIO-Pin für UART TX
pub const UART_TX_GPIO_PIN: u8 = 4;

/// GPIO-Pin für UART RX
pub const UART_RX_GPIO_PIN: u8 = 5;

// ============================================================================
// Speicher
// ============================================================================

/// Heap-Größe (Bytes) für serde_json Frames
pub const HEAP_SIZE: usize = 32768; // 32 KB

/// Bootstrap-Konfiguration aus den Konstanten
pub fn device_config() -> DeviceConfig {
    DeviceConfig {
        identity: DeviceIdentity {
            name: DEVICE_NAME,
            version: FIRMWARE_VERSION,
            publish_topic: MQTT_TOPIC,
        },
        blink_period: Period::from_millis(i64::from(BLINK_PERIOD_MS)),
        report_period: Period::from_millis(i64::from(REPORT_PERIOD_MS)),
        poll_timeout_ms: UART_POLL_TIMEOUT_MS,
    }
}
