//! # Device Check Binary
//!
//! Operator smoke test for a workstation's fingerprint setup: discovers
//! which backend is reachable, prints the device state, and optionally
//! runs one test capture.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin devicecheck
//! cargo run --bin devicecheck -- --config config/workstation.toml --capture
//! ```

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

use biogate::common::config::{load_config, BiogateConfig};
use biogate::ScannerClient;

/// Command-line arguments for the device check binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the workstation configuration file (TOML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Run one test capture after the device check
    #[arg(long)]
    capture: bool,

    /// Capture timeout in seconds (test capture only)
    #[arg(long)]
    timeout: Option<u64>,

    /// Minimum acceptable quality 0-100 (test capture only)
    #[arg(long)]
    min_quality: Option<u8>,
}

/// Initialize the logging system with timestamp, level, and message
/// formatting. Format: `[HH:MM:SS] [LEVEL] message`
fn init_logger() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .init();
}

/// Presentation band for a quality score (matches the registration UI).
fn quality_band(quality: u8) -> &'static str {
    if quality >= 70 {
        "good"
    } else if quality >= 50 {
        "acceptable"
    } else {
        "poor"
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();

    let config: BiogateConfig = match &args.config {
        Some(path) => load_config(path)?,
        None => BiogateConfig::default(),
    };

    let client = ScannerClient::new(&config)?;

    let info = client.device_info().await;
    if info.connected {
        println!("✅ Scanner connected");
        if let Some(name) = &info.device_name {
            println!("   device:   {}", name);
        }
        if let Some(serial) = &info.serial_number {
            println!("   serial:   {}", serial);
        }
        if let Some(firmware) = &info.firmware_version {
            println!("   firmware: {}", firmware);
        }
        if let (Some(w), Some(h)) = (info.image_width, info.image_height) {
            println!("   image:    {}x{}", w, h);
        }
    } else {
        println!(
            "❌ No scanner: {}",
            info.error.as_deref().unwrap_or("unknown reason")
        );
        std::process::exit(1);
    }

    if args.capture {
        let timeout = args.timeout.unwrap_or(config.capture.timeout_secs);
        let min_quality = args.min_quality.unwrap_or(config.capture.min_quality);
        println!("Place a finger on the scanner ({}s timeout)...", timeout);

        let result = client.capture(timeout, min_quality).await;
        if result.success {
            let quality = result.quality.unwrap_or(0);
            println!("✅ Capture ok - quality {} ({})", quality, quality_band(quality));
        } else {
            println!(
                "❌ Capture failed: {}",
                result.error.as_deref().unwrap_or("unknown reason")
            );
            std::process::exit(1);
        }
    }

    Ok(())
}
