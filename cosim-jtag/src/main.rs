//! # Loopback Harness
//!
//! Runs a remote bitbang bridge against a software design instead of an HDL simulator.
//! The design is a one-bit shift register from TDI to TDO, which is enough for OpenOCD
//! to detect a (bypassed) scan chain and to exercise the socket end to end:
//!
//! ```text
//! cosim-jtag-loopback --delay 3 &
//! openocd -c "adapter driver remote_bitbang" \
//!         -c "remote_bitbang host /tmp/cosim_jtag.sock" \
//!         -c "transport select jtag" -c "init"
//! ```
use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use cosim_jtag::loopback::Loopback;
use env_logger::Env;
use rbb_bridge::{Builder, bridge::DEFAULT_SOCKET_PATH};

const MAX_DELAY: u32 = 1_000_000;

fn parse_delay(s: &str) -> Result<u32, String> {
    clap_num::number_range(s, 0, MAX_DELAY)
}

#[derive(Parser)]
#[command(about = "Remote bitbang JTAG bridge driving a loopback design", long_about=None)]
struct Args {
    #[arg(
        short,
        long,
        help = "Clock cycles to skip between two processed commands",
        default_value = "0",
        value_parser = parse_delay
    )]
    delay: u32,

    #[arg(short, long, default_value = DEFAULT_SOCKET_PATH)]
    socket: PathBuf,

    #[arg(short, long, help = "Stop after this many clock cycles")]
    cycles: Option<u64>,

    #[arg(
        short,
        long,
        help = "Wall-clock time of one clock cycle in microseconds",
        default_value = "1"
    )]
    period_us: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::info!("Starting loopback harness");

    let args = Args::parse();
    log::debug!(
        "Parsed arguments: delay={}, socket={}, cycles={:?}, period_us={}",
        args.delay,
        args.socket.display(),
        args.cycles,
        args.period_us
    );

    let mut bridge = Builder::new()
        .delay(args.delay)
        .socket_path(args.socket)
        .build();
    let mut design = Loopback::default();
    let period = Duration::from_micros(args.period_us);

    let mut cycle: u64 = 0;
    while args.cycles.is_none_or(|max| cycle < max) {
        design.step(&mut bridge)?;
        cycle += 1;
        if !period.is_zero() {
            thread::sleep(period);
        }
    }

    log::info!(
        "Stopped after {} cycles and {} TCK rising edges",
        cycle,
        design.rising_edges()
    );
    Ok(())
}
