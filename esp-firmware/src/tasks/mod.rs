// Task-Modul: Enthält alle Embassy Tasks
//
// Die komplette Geräte-Logik läuft kooperativ in einem einzigen Task.

pub mod device;

// Re-export Tasks für einfachen Import
pub use device::{DevicePeripherals, device_task, run_device};
