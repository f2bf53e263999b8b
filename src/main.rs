// NES emulator CLI entry point.
//
// Loads a ROM and runs the CPU/bus core for a bounded number of ticks. There
// is no display, audio, or input surface here — see DESIGN.md for why this
// binary's loop shape looks the way it does.

mod config;

use config::EmulatorConfig;
use nes_rs::bus::Bus;
use nes_rs::cartridge::Cartridge;
use nes_rs::debug::{LogLevel, Logger};
use std::env;
use std::process::ExitCode;
use std::str::FromStr;

/// Number of CPU cycles the binary runs before exiting. Chosen to comfortably
/// cover a ROM's reset/init path without requiring a real-time driver loop;
/// see DESIGN.md for the rationale.
const RUN_CYCLES: u64 = 1_000_000;

struct Args {
    rom_path: String,
    trace: Option<bool>,
    log_level: Option<LogLevel>,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <rom.nes> [--trace] [--log-level <level>]", program);
    eprintln!("  --trace              enable CPU trace logging to stdout");
    eprintln!("  --log-level <level>  one of: none, error, warning, info, debug, trace");
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Args, String> {
    let program = argv.next().unwrap_or_else(|| "nes-rs".to_string());
    let mut rom_path = None;
    let mut trace = None;
    let mut log_level = None;

    let mut rest: Vec<String> = argv.collect();
    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--trace" => {
                trace = Some(true);
                rest.remove(i);
            }
            "--log-level" => {
                rest.remove(i);
                if i >= rest.len() {
                    return Err("--log-level requires a value".to_string());
                }
                let value = rest.remove(i);
                log_level = Some(LogLevel::from_str(&value).map_err(|e| e.to_string())?);
            }
            _ => i += 1,
        }
    }

    if rest.len() != 1 {
        print_usage(&program);
        return Err("expected exactly one positional ROM path argument".to_string());
    }
    rom_path = Some(rest.remove(0));

    Ok(Args {
        rom_path: rom_path.unwrap(),
        trace,
        log_level,
    })
}

fn main() -> ExitCode {
    let args = match parse_args(env::args()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::FAILURE;
        }
    };

    let file_config = match EmulatorConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // CLI flags override the config file; the config file overrides the
    // built-in defaults (no trace, LogLevel::None).
    let log_level = match args.log_level {
        Some(level) => level,
        None => match file_config.log_level.as_deref() {
            Some(value) => match LogLevel::from_str(value) {
                Ok(level) => level,
                Err(err) => {
                    eprintln!("error: invalid log_level in config file: {}", err);
                    return ExitCode::FAILURE;
                }
            },
            None => LogLevel::None,
        },
    };
    let trace = args
        .trace
        .or(file_config.trace_on_startup)
        .unwrap_or(false);

    let cartridge = match Cartridge::from_ines_file(&args.rom_path) {
        Ok(cartridge) => cartridge,
        Err(err) => {
            eprintln!("error: failed to load '{}': {}", args.rom_path, err);
            return ExitCode::FAILURE;
        }
    };

    let mut bus = Bus::new();
    bus.insert_cartridge(cartridge);

    let mut logger = Logger::new();
    logger.set_log_level(log_level);
    if trace {
        logger.enable_cpu_trace();
    }
    *bus.logger_mut() = logger;

    bus.reset();

    let mut printed = 0;
    for _ in 0..RUN_CYCLES {
        bus.cycle();
        if trace {
            let buffer = bus.logger().trace_buffer();
            for entry in &buffer[printed..] {
                println!("{}", entry);
            }
            printed = buffer.len();
        }
    }

    ExitCode::SUCCESS
}
