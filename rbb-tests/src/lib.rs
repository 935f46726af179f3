//! Shared fixtures for the end-to-end tests.
use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    thread::{self, JoinHandle},
};

use cosim_jtag::loopback::Loopback;
use rbb_bridge::{Bridge, Builder, error::BridgeError};

/// A fresh socket path in the temp directory.
pub fn socket_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    std::env::temp_dir().join(format!(
        "rbb-e2e-{}-{}-{}.sock",
        name,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ))
}

/// What a simulation run looked like after it was stopped.
pub struct Run {
    pub bridge: Bridge,
    pub design: Loopback,
    pub ticks: u64,
    /// Index of every tick whose pin levels differed from the previous tick
    pub pin_changes: Vec<u64>,
}

/// A simulation running on a background thread: a loopback design ticked as fast as possible.
pub struct Simulation {
    path: PathBuf,
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Result<Run, BridgeError>>,
}

impl Simulation {
    /// Starts ticking. The socket exists when this returns.
    pub fn start(name: &str, delay: u32) -> Simulation {
        let path = socket_path(name);
        let mut bridge = Builder::new().delay(delay).socket_path(&path).build();
        let mut design = Loopback::default();
        let mut last = design
            .step(&mut bridge)
            .expect("first tick should create the socket");

        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let stop = stop.clone();
            thread::spawn(move || {
                let mut ticks = 1;
                let mut pin_changes = Vec::new();
                while !stop.load(Ordering::Relaxed) {
                    let pins = design.step(&mut bridge)?;
                    if pins != last {
                        pin_changes.push(ticks);
                        last = pins;
                    }
                    ticks += 1;
                    thread::yield_now();
                }
                Ok(Run {
                    bridge,
                    design,
                    ticks,
                    pin_changes,
                })
            })
        };
        Simulation { path, stop, handle }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stops ticking and hands back the final state.
    pub fn stop(self) -> Result<Run, BridgeError> {
        self.stop.store(true, Ordering::Relaxed);
        let run = self.handle.join().expect("simulation thread panicked");
        let _ = std::fs::remove_file(&self.path);
        run
    }
}
