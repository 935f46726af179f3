//! # Simulator Bindings for the Remote Bitbang Bridge
//!
//! Bindings that let HDL simulators drive a [`rbb_bridge::Bridge`] from their clock
//! callbacks, so that OpenOCD can debug a simulated design over a unix socket.
//!
//! ## Overview
//!
//! Simulators differ only in how they pass the one input (TDO) and five outputs (TCK,
//! TMS, TDI, TRST, SRST) across their foreign interface. Every binding in this crate is
//! a thin shim that converts values and calls [`rbb_bridge::Tick::tick`]:
//!
//! - [`ffi::cosim_jtag_tick`]: one positional argument per signal (GHDL VHPIDIRECT, ModelSim FLI)
//! - [`ffi::cosim_jtag_tick_record`]: all signals aggregated in one [`ffi::TickRecord`]
//! - [`handle::HandleAdapter`]: resolves the signals once by name and kind through a
//!   [`handle::HostInterface`]
//!
//! The exported C functions share one process-wide bridge that is created on the first
//! call. Its rate gate is configured through the `COSIM_JTAG_DELAY` environment variable.
//!
//! ## Error Handling
//!
//! A broken control channel makes the simulation useless, so every error reaching the
//! exported functions is logged and terminates the process.
use std::{
    fmt::Display,
    sync::{Mutex, Once, PoisonError},
};

use env_logger::Env;
use rbb_bridge::{Bridge, Config};

pub mod ffi;
pub mod handle;
pub mod loopback;

/// Environment variable holding the number of clock cycles to skip between two commands.
pub const DELAY_ENV: &str = "COSIM_JTAG_DELAY";

static BRIDGE: Mutex<Option<Bridge>> = Mutex::new(None);
static LOGGER: Once = Once::new();

/// Parses the rate gate delay. Missing or invalid values fall back to no delay.
pub fn parse_delay(value: Option<&str>) -> u32 {
    let Some(value) = value else {
        return 0;
    };
    match value.trim().parse::<u32>() {
        Ok(delay) => delay,
        Err(e) => {
            log::warn!("Ignoring invalid {}={:?}: {}", DELAY_ENV, value, e);
            0
        }
    }
}

/// Builds the bridge configuration from the environment.
pub fn config_from_env() -> Config {
    let delay = std::env::var(DELAY_ENV).ok();
    Config {
        delay: parse_delay(delay.as_deref()),
        ..Config::default()
    }
}

/// Installs `env_logger` unless this already happened.
/// A logger that the host installed earlier is kept.
pub fn init_logger() {
    LOGGER.call_once(|| {
        let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();
    });
}

/// Logs `error` and terminates the simulation.
pub fn fatal(error: impl Display) -> ! {
    init_logger();
    log::error!("cosim_jtag: {}", error);
    std::process::exit(1)
}

/// Runs `f` on the process-wide bridge, creating it on first use.
/// Terminates the process if `f` fails.
pub fn with_global<R, E: Display>(f: impl FnOnce(&mut Bridge) -> Result<R, E>) -> R {
    init_logger();

    let mut guard = BRIDGE.lock().unwrap_or_else(PoisonError::into_inner);
    let bridge = guard.get_or_insert_with(|| {
        let config = config_from_env();
        log::debug!(
            "Creating bridge: socket={}, delay={}",
            config.socket_path.display(),
            config.delay
        );
        Bridge::new(config)
    });
    match f(bridge) {
        Ok(result) => result,
        Err(e) => fatal(e),
    }
}
