// UART-Adapter für den JSON-RPC Link

use defmt::{Debug2Format, warn};
use embassy_time::{Duration, Instant};
use esp_core::{ByteSink, ByteSource};
use esp_hal::Blocking;
use esp_hal::uart::{UartRx, UartTx};

/// Empfangsseite: liest einzelne Bytes mit kurzem Timeout
pub struct UartSource<'d> {
    rx: UartRx<'d, Blocking>,
}

impl<'d> UartSource<'d> {
    pub fn new(rx: UartRx<'d, Blocking>) -> Self {
        Self { rx }
    }
}

impl ByteSource for UartSource<'_> {
    fn try_read_byte(&mut self, timeout_ms: u32) -> Option<u8> {
        let deadline = Instant::now() + Duration::from_millis(u64::from(timeout_ms));
        loop {
            if self.rx.read_ready() {
                let mut byte = [0u8; 1];
                return match self.rx.read(&mut byte) {
                    Ok(n) if n > 0 => Some(byte[0]),
                    Ok(_) => None,
                    Err(e) => {
                        warn!("UART: Read error: {}", Debug2Format(&e));
                        None
                    }
                };
            }
            if Instant::now() >= deadline {
                return None;
            }
        }
    }
}

/// Sendeseite: schreibt Frames vollständig (blockierend)
pub struct UartSink<'d> {
    tx: UartTx<'d, Blocking>,
}

impl<'d> UartSink<'d> {
    pub fn new(tx: UartTx<'d, Blocking>) -> Self {
        Self { tx }
    }
}

impl ByteSink for UartSink<'_> {
    fn write(&mut self, bytes: &[u8]) -> usize {
        let mut written = 0;
        while written < bytes.len() {
            match self.tx.write(&bytes[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) => {
                    warn!("UART: Write error: {}", Debug2Format(&e));
                    break;
                }
            }
        }
        if let Err(e) = self.tx.flush() {
            warn!("UART: Flush error: {}", Debug2Format(&e));
        }
        written
    }
}
