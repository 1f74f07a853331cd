//! ESP Core - Platform-agnostic Device Runtime
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits für die Peripherie und die komplette Laufzeit-Logik:
//! Blink-Task, Report-Task, JSON-RPC Dispatcher und den Scheduler (`Device`).

#![no_std]

extern crate alloc;

mod logging;

pub mod device;
pub mod handlers;
pub mod indicator;
pub mod logic;
pub mod report;
pub mod rpc;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use device::{Device, DeviceState};
pub use indicator::IndicatorTask;
pub use logic::{Deadline, Uptime, period_ticks, tick_is_before};
pub use report::{ReportAction, ReportTask};
pub use rpc::{Dispatcher, HandlerFn, Params, RegistryError, Reply, Request, RpcError};
pub use traits::{ByteSink, ByteSource, Clock, OutputError, OutputPin};
pub use types::{AppStatus, DeviceConfig, DeviceIdentity, Period, Report, ReportChannel, Tick};
