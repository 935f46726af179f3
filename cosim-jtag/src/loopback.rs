//! A stand-in design for running the bridge without an HDL simulator.
use rbb_bridge::{Pins, Tick, error::BridgeError};

/// A one-bit shift register between TDI and TDO.
///
/// TDO shows the TDI level captured on the last rising edge of TCK.
/// An active TRST clears the register.
#[derive(Clone, Debug, Default)]
pub struct Loopback {
    last_tck: bool,
    tdo: bool,
    rising_edges: u64,
}

impl Loopback {
    pub fn tdo(&self) -> bool {
        self.tdo
    }

    /// Number of rising TCK edges seen so far
    pub fn rising_edges(&self) -> u64 {
        self.rising_edges
    }

    /// Applies the pin levels of one clock cycle.
    pub fn drive(&mut self, pins: Pins) {
        if pins.trst {
            self.tdo = false;
        } else if pins.tck && !self.last_tck {
            self.tdo = pins.tdi;
            self.rising_edges += 1;
        }
        self.last_tck = pins.tck;
    }

    /// One host clock cycle: sample TDO, tick `core`, drive the result.
    pub fn step<T: Tick>(&mut self, core: &mut T) -> Result<Pins, BridgeError> {
        let pins = core.tick(self.tdo)?;
        self.drive(pins);
        Ok(pins)
    }
}
