//! Zeilen-Framing für den eingehenden Byte-Stream
//!
//! Ein Frame endet mit `\n`, `\r` wird ignoriert. Zu lange Frames werden
//! bis zum nächsten Zeilenende verworfen.

use heapless::Vec;

use crate::logging::warn;

/// Maximale Frame-Länge in Bytes
pub const FRAME_CAPACITY: usize = 256;

pub struct LineFramer<const N: usize> {
    buf: Vec<u8, N>,
    complete: bool,
    overflowed: bool,
}

impl<const N: usize> LineFramer<N> {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            complete: false,
            overflowed: false,
        }
    }

    /// Nimmt ein Byte an, gibt bei Zeilenende den fertigen Frame zurück
    pub fn push(&mut self, byte: u8) -> Option<&[u8]> {
        if self.complete {
            self.buf.clear();
            self.complete = false;
        }

        match byte {
            b'\r' => None,
            b'\n' if self.overflowed => {
                self.overflowed = false;
                None
            }
            b'\n' if self.buf.is_empty() => None,
            b'\n' => {
                self.complete = true;
                Some(self.buf.as_slice())
            }
            _ if self.overflowed => None,
            _ => {
                if self.buf.push(byte).is_err() {
                    warn!("RPC: Frame exceeds {} bytes, dropping", N);
                    self.buf.clear();
                    self.overflowed = true;
                }
                None
            }
        }
    }

    /// Anzahl gepufferter Bytes des aktuellen Frames
    pub fn pending(&self) -> usize {
        if self.complete { 0 } else { self.buf.len() }
    }
}

impl<const N: usize> Default for LineFramer<N> {
    fn default() -> Self {
        Self::new()
    }
}
