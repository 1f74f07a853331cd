//! JSON-RPC Dispatcher
//!
//! Registry (Methodenname → Handler), inkrementelles Parsen des eingehenden
//! Byte-Streams und ausgehende Calls/Notifications über eine `ByteSink`.
//!
//! Wire-Format: ein JSON-Objekt pro Zeile.
//! - Call: `{"id":1,"method":"LED.Toggle","params":{}}`
//! - Notification: wie Call, aber ohne `id` (es wird nie geantwortet)
//! - Antwort: `{"id":1,"result":null}` bzw. `{"id":1,"error":{"code":-32601,"message":"..."}}`

mod framer;
mod params;

pub use framer::{FRAME_CAPACITY, LineFramer};
pub use params::Params;

use alloc::vec::Vec;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::logging::{debug, info, warn};
use crate::traits::ByteSink;

/// Maximale Anzahl registrierbarer Methoden (ohne Built-ins)
pub const MAX_METHODS: usize = 8;

/// Built-in: listet alle aufrufbaren Methoden
pub const LIST_METHODS: &str = "rpc.list";

/// Built-in: liefert die Firmware-Version
pub const SYS_INFO: &str = "Sys.Info";

const BUILTIN_METHODS: [&str; 2] = [LIST_METHODS, SYS_INFO];

/// Handler-Signatur: liest den Request, arbeitet auf dem Kontext `C`
/// und liefert genau eine Antwort (oder bewusst keine)
pub type HandlerFn<C> = fn(&Request<'_>, &mut C) -> Reply;

/// Fehler beim Registrieren (nur beim Bootstrap möglich)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateMethod,
    RegistryFull,
}

/// Protokoll-Fehler in einer Error-Response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: &'static str,
}

impl RpcError {
    pub const INVALID_REQUEST: Self = Self {
        code: -32600,
        message: "invalid request",
    };
    pub const METHOD_NOT_FOUND: Self = Self {
        code: -32601,
        message: "method not found",
    };
    pub const INVALID_PARAMS: Self = Self {
        code: -32602,
        message: "invalid params",
    };
    pub const INTERNAL_ERROR: Self = Self {
        code: -32603,
        message: "internal error",
    };
}

/// Ergebnis eines Handlers
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Success(Value),
    Error(RpcError),
    /// Keine Antwort (fire-and-forget)
    Silent,
}

impl Reply {
    /// Leere Erfolgs-Antwort (`"result": null`)
    pub fn ok() -> Self {
        Reply::Success(Value::Null)
    }
}

/// Eingehender Request, wie ihn ein Handler sieht
pub struct Request<'a> {
    method: &'a str,
    id: Option<&'a Value>,
    params: Params<'a>,
}

impl<'a> Request<'a> {
    pub fn new(method: &'a str, id: Option<&'a Value>, params: Option<&'a Value>) -> Self {
        Self {
            method,
            id,
            params: Params::new(params),
        }
    }

    pub fn method(&self) -> &'a str {
        self.method
    }

    pub fn id(&self) -> Option<&'a Value> {
        self.id
    }

    pub fn params(&self) -> Params<'a> {
        self.params
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

struct Entry<C> {
    name: &'static str,
    handler: HandlerFn<C>,
}

enum Target<C> {
    ListMethods,
    Info,
    App(HandlerFn<C>),
}

#[derive(Serialize)]
struct OutboundFrame<'a, P: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u32>,
    method: &'a str,
    params: &'a P,
}

#[derive(Serialize)]
struct SuccessFrame<'a> {
    id: &'a Value,
    result: &'a Value,
}

#[derive(Serialize)]
struct ErrorFrame<'a> {
    id: &'a Value,
    error: RpcError,
}

/// JSON-RPC Dispatcher
///
/// # Parameter
/// - `S`: Senke für ausgehende Frames (UART TX oder Mock)
/// - `C`: Kontext, den Handler beim Aufruf mutabel bekommen
pub struct Dispatcher<S, C> {
    sink: S,
    methods: heapless::Vec<Entry<C>, MAX_METHODS>,
    framer: LineFramer<FRAME_CAPACITY>,
    version: &'static str,
    next_id: u32,
}

impl<S: ByteSink, C> Dispatcher<S, C> {
    pub fn new(sink: S, version: &'static str) -> Self {
        Self {
            sink,
            methods: heapless::Vec::new(),
            framer: LineFramer::new(),
            version,
            next_id: 0,
        }
    }

    /// Registriert einen Handler
    ///
    /// # Fehlerbehandlung
    /// Doppelte Namen (auch Built-ins) werden nie überschrieben:
    /// `RegistryError::DuplicateMethod`
    pub fn register(&mut self, name: &'static str, handler: HandlerFn<C>) -> Result<(), RegistryError> {
        if self.is_registered(name) {
            warn!("RPC: Method {} already registered", name);
            return Err(RegistryError::DuplicateMethod);
        }
        self.methods
            .push(Entry { name, handler })
            .map_err(|_| RegistryError::RegistryFull)?;
        info!("RPC: Registered {}", name);
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Alle aufrufbaren Methoden, Built-ins zuerst
    pub fn method_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        BUILTIN_METHODS
            .iter()
            .copied()
            .chain(self.methods.iter().map(|entry| entry.name))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Füttert ein eingehendes Byte in den Parser
    ///
    /// Ist damit ein Frame komplett, wird er sofort synchron verarbeitet.
    /// Kaputte Frames werden verworfen, der Parser startet danach sauber neu.
    pub fn feed_byte(&mut self, byte: u8, ctx: &mut C) {
        let Some(frame) = self.framer.push(byte) else {
            return;
        };
        match serde_json::from_slice::<Value>(frame) {
            Ok(message) => self.dispatch(&message, ctx),
            Err(_) => warn!("RPC: Discarding malformed frame ({} bytes)", frame.len()),
        }
    }

    /// Sendet eine Notification (ohne `id`)
    pub fn notify<P: Serialize>(&mut self, method: &str, params: &P) {
        self.send(&OutboundFrame {
            id: None,
            method,
            params,
        });
    }

    /// Sendet einen Call mit fortlaufender `id` und gibt die `id` zurück
    pub fn call<P: Serialize>(&mut self, method: &str, params: &P) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        let id = self.next_id;
        self.send(&OutboundFrame {
            id: Some(id),
            method,
            params,
        });
        id
    }

    fn resolve(&self, method: &str) -> Option<Target<C>> {
        match method {
            LIST_METHODS => Some(Target::ListMethods),
            SYS_INFO => Some(Target::Info),
            _ => self
                .methods
                .iter()
                .find(|entry| entry.name == method)
                .map(|entry| Target::App(entry.handler)),
        }
    }

    fn dispatch(&mut self, message: &Value, ctx: &mut C) {
        let Some(frame) = message.as_object() else {
            warn!("RPC: Discarding non-object frame");
            return;
        };
        let id = frame.get("id");

        let method = match frame.get("method") {
            Some(Value::String(method)) => method.as_str(),
            None if frame.contains_key("result") || frame.contains_key("error") => {
                debug!("RPC: Ignoring response frame");
                return;
            }
            _ => {
                warn!("RPC: Request without method name");
                self.respond(id, Reply::Error(RpcError::INVALID_REQUEST));
                return;
            }
        };

        let request = Request::new(method, id, frame.get("params"));
        let reply = match self.resolve(method) {
            Some(Target::ListMethods) => Reply::Success(self.method_names().map(Value::from).collect()),
            Some(Target::Info) => Reply::Success(self.info()),
            Some(Target::App(handler)) => handler(&request, ctx),
            None => {
                debug!("RPC: Method not found: {}", method);
                Reply::Error(RpcError::METHOD_NOT_FOUND)
            }
        };
        self.respond(id, reply);
    }

    fn info(&self) -> Value {
        let mut info = Map::new();
        info.insert("fw_version".into(), Value::from(self.version));
        Value::Object(info)
    }

    fn respond(&mut self, id: Option<&Value>, reply: Reply) {
        // Notifications bekommen nie eine Antwort
        let Some(id) = id else {
            return;
        };
        match reply {
            Reply::Success(result) => self.send(&SuccessFrame { id, result: &result }),
            Reply::Error(error) => self.send(&ErrorFrame { id, error }),
            Reply::Silent => {}
        }
    }

    fn send<T: Serialize>(&mut self, frame: &T) {
        let mut bytes: Vec<u8> = match serde_json::to_vec(frame) {
            Ok(bytes) => bytes,
            Err(_) => {
                warn!("RPC: Failed to serialize outbound frame");
                return;
            }
        };
        bytes.push(b'\n');
        let written = self.sink.write(&bytes);
        if written < bytes.len() {
            warn!("RPC: Short write ({} of {} bytes)", written, bytes.len());
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for RegistryError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RegistryError::DuplicateMethod => defmt::write!(fmt, "duplicate method"),
            RegistryError::RegistryFull => defmt::write!(fmt, "registry full"),
        }
    }
}
