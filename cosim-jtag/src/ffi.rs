//! # C Bindings
//!
//! Exported functions for simulators that call foreign subprograms through a C ABI.
//! Signal values are passed as `std_ulogic` ordinals (see [`rbb_protocol::Logic`]).
//!
//! On the VHDL side, the positional binding is declared as
//!
//! ```vhdl
//! procedure cosim_jtag_tick (
//!     tdo  : in  std_ulogic;
//!     tck  : out std_ulogic;
//!     tms  : out std_ulogic;
//!     tdi  : out std_ulogic;
//!     trst : out std_ulogic;
//!     srst : out std_ulogic
//! );
//! attribute foreign of cosim_jtag_tick : procedure is "VHPIDIRECT cosim_jtag_tick";
//! ```
//!
//! and called on every rising edge of the simulation clock.
use std::ffi::c_char;

use rbb_bridge::{Pins, Tick, error::BridgeError};
use rbb_protocol::Logic;

fn from_raw(value: c_char) -> bool {
    Logic::raw_to_bit(value as u8)
}

fn to_raw(bit: bool) -> c_char {
    Logic::from_bit(bit).as_raw() as c_char
}

/// Writes `bit` through `ptr`, unless `ptr` is null.
///
/// # Safety
///
/// `ptr` must be null or valid for writes.
unsafe fn drive(ptr: *mut c_char, bit: bool) {
    // SAFETY: guaranteed by the caller
    if let Some(target) = unsafe { ptr.as_mut() } {
        *target = to_raw(bit);
    }
}

/// All arguments of one tick in a single record.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TickRecord {
    /// Input, the current level of TDO
    pub tdo: c_char,
    pub tck: c_char,
    pub tms: c_char,
    pub tdi: c_char,
    pub trst: c_char,
    pub srst: c_char,
}

impl TickRecord {
    pub fn tdo(&self) -> bool {
        from_raw(self.tdo)
    }

    /// Stores the levels of a tick in the output fields.
    pub fn set_pins(&mut self, pins: Pins) {
        self.tck = to_raw(pins.tck);
        self.tms = to_raw(pins.tms);
        self.tdi = to_raw(pins.tdi);
        self.trst = to_raw(pins.trst);
        self.srst = to_raw(pins.srst);
    }
}

/// Ticks `core` with the TDO of `record` and fills in its outputs.
pub fn tick_record<T: Tick>(core: &mut T, record: &mut TickRecord) -> Result<(), BridgeError> {
    let pins = core.tick(record.tdo())?;
    record.set_pins(pins);
    Ok(())
}

/// Ticks `core` with `tdo` and writes the outputs through the given pointers.
///
/// # Safety
///
/// Every output pointer must be null or valid for writes.
pub unsafe fn tick_positional<T: Tick>(
    core: &mut T,
    tdo: c_char,
    tck: *mut c_char,
    tms: *mut c_char,
    tdi: *mut c_char,
    trst: *mut c_char,
    srst: *mut c_char,
) -> Result<(), BridgeError> {
    let pins = core.tick(from_raw(tdo))?;
    // SAFETY: guaranteed by the caller
    unsafe {
        drive(tck, pins.tck);
        drive(tms, pins.tms);
        drive(tdi, pins.tdi);
        drive(trst, pins.trst);
        drive(srst, pins.srst);
    }
    Ok(())
}

/// Positional binding: one argument per signal.
///
/// # Safety
///
/// Every output pointer must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cosim_jtag_tick(
    tdo: c_char,
    tck: *mut c_char,
    tms: *mut c_char,
    tdi: *mut c_char,
    trst: *mut c_char,
    srst: *mut c_char,
) {
    crate::with_global(|bridge| {
        // SAFETY: guaranteed by the caller
        unsafe { tick_positional(bridge, tdo, tck, tms, tdi, trst, srst) }
    })
}

/// Record binding: all signals in one [`TickRecord`].
///
/// # Safety
///
/// `record` must be null or point to a valid, writable [`TickRecord`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cosim_jtag_tick_record(record: *mut TickRecord) {
    // SAFETY: guaranteed by the caller
    let Some(record) = (unsafe { record.as_mut() }) else {
        crate::fatal("cosim_jtag_tick_record called without a record");
    };
    crate::with_global(|bridge| tick_record(bridge, record))
}
