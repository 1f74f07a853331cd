// Bare-Metal Firmware ohne std
#![no_std]
// Einstiegspunkt kommt aus #[esp_rtos::main]
#![no_main]
// mem::forget auf HAL-Typen mit laufenden Transfers verbieten
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Task-Stacks sind klein: große Frames verbieten
#![deny(clippy::large_stack_frames)]

// Heap Allocator (serde_json baut Frames im Heap)
extern crate alloc;

// Executor + Timer
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// HAL
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;

// Panic-Handler und defmt-Transport
use {esp_backtrace as _, esp_println as _};

// Firmware-Crate
use esp_rpc_device::config::HEAP_SIZE;
use esp_rpc_device::tasks::{DevicePeripherals, device_task};

// App Descriptor für den ESP-IDF Bootloader (sonst verweigert espflash das Image)
esp_bootloader_esp_idf::esp_app_desc!();

/// Firmware Entry Point
///
/// Initialisiert Hardware, startet die Embassy Runtime und spawnt den Device-Task.
/// Danach schläft main() - die Run-Loop läuft im Task.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // CPU mit maximalem Takt
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren
    esp_alloc::heap_allocator!(size: HEAP_SIZE);

    // esp-rtos braucht einen Timer und einen Software-Interrupt
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Spawn Device Task (übernimmt LEDs und UART exklusiv)
    spawner
        .spawn(device_task(DevicePeripherals {
            status_led: peripherals.GPIO8,
            rmt: peripherals.RMT,
            aux_led: peripherals.GPIO15,
            uart: peripherals.UART1,
            uart_tx: peripherals.GPIO4,
            uart_rx: peripherals.GPIO5,
        }))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft im Device-Task)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
