// Build-Script: Wird vor dem Kompilieren ausgeführt
// Gibt Geräte-Konfiguration weiter und konfiguriert den Linker für ESP32-C6

/// Optionale Variablen aus .env, die zur Compile-Zeit eingebacken werden
const FORWARDED_ENV: [&str; 2] = ["DEVICE_NAME", "MQTT_TOPIC"];

fn main() {
    // Lade .env file (optional: ohne .env gelten die Defaults aus config.rs)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  .env file nicht gefunden: {}", e);
        eprintln!("   DEVICE_NAME und MQTT_TOPIC können als Environment-Variablen gesetzt werden");
    }

    for name in FORWARDED_ENV {
        println!("cargo:rerun-if-env-changed={}", name);
        if let Ok(value) = std::env::var(name) {
            println!("cargo:rustc-env={}={}", name, value);
        }
    }
    println!("cargo:rerun-if-changed=.env");

    // Registriere hilfsbereiten Error-Handler für Linker-Fehler
    linker_hints();

    // 1. defmt.x - defmt Logging-Support
    println!("cargo:rustc-link-arg=-Tdefmt.x");

    // 2. linkall.x - ESP32 Memory-Layout
    //    WICHTIG: Muss als LETZTES kommen
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

// Error-Handler: Zeigt Tipps bei Linker-Fehlern
// Wird vom Linker als "--error-handling-script" aufgerufen
fn linker_hints() {
    let args: Vec<String> = std::env::args().collect();

    if let [_, kind, what, ..] = args.as_slice() {
        if kind == "undefined-symbol" {
            let hint = match what.as_str() {
                what if what.starts_with("_defmt_") => {
                    Some("`defmt` not found - make sure `defmt.x` is added as a linker script")
                }
                "_stack_start" => Some("Is the linker script `linkall.x` missing?"),
                "free" | "malloc" | "calloc" | "realloc" => {
                    Some("Did you forget the `esp-alloc` dependency? serde_json needs a heap.")
                }
                _ => None,
            };
            if let Some(hint) = hint {
                eprintln!();
                eprintln!("💡 {}", hint);
                eprintln!();
            }
            std::process::exit(0);
        }
        std::process::exit(1);
    }

    println!(
        "cargo:rustc-link-arg=--error-handling-script={}",
        std::env::current_exe().unwrap().display()
    );
}
