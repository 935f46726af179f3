//! The latched levels of the five pins the bridge drives into the design.
use rbb_protocol::Logic;

/// Last written value of every output pin.
///
/// TCK, TMS and TDI start out unknown until the first write command.
/// The reset lines are active high and start out inactive.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SignalState {
    tck: Logic,
    tms: Logic,
    tdi: Logic,
    trst: Logic,
    srst: Logic,
}

impl Default for SignalState {
    fn default() -> Self {
        SignalState {
            tck: Logic::X,
            tms: Logic::X,
            tdi: Logic::X,
            trst: Logic::Zero,
            srst: Logic::Zero,
        }
    }
}

impl SignalState {
    pub fn set_jtag(&mut self, tck: bool, tms: bool, tdi: bool) {
        self.tck = Logic::from_bit(tck);
        self.tms = Logic::from_bit(tms);
        self.tdi = Logic::from_bit(tdi);
    }

    pub fn set_reset(&mut self, trst: bool, srst: bool) {
        self.trst = Logic::from_bit(trst);
        self.srst = Logic::from_bit(srst);
    }

    pub fn tck(&self) -> Logic {
        self.tck
    }

    pub fn tms(&self) -> Logic {
        self.tms
    }

    pub fn tdi(&self) -> Logic {
        self.tdi
    }

    pub fn trst(&self) -> Logic {
        self.trst
    }

    pub fn srst(&self) -> Logic {
        self.srst
    }

    /// The two-valued levels to drive onto the design. Unknown values drive low.
    pub fn drive(&self) -> Pins {
        Pins {
            tck: self.tck.to_bit(),
            tms: self.tms.to_bit(),
            tdi: self.tdi.to_bit(),
            trst: self.trst.to_bit(),
            srst: self.srst.to_bit(),
        }
    }
}

/// Output of a single tick.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Pins {
    pub tck: bool,
    pub tms: bool,
    pub tdi: bool,
    pub trst: bool,
    pub srst: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn initial_state() {
        let state = SignalState::default();
        assert_eq!(state.tck(), Logic::X);
        assert_eq!(state.tms(), Logic::X);
        assert_eq!(state.tdi(), Logic::X);
        assert_eq!(state.trst(), Logic::Zero);
        assert_eq!(state.srst(), Logic::Zero);
        assert_eq!(state.drive(), Pins::default());
    }

    #[test]
    fn jtag_and_reset_are_latched_independently() {
        let mut state = SignalState::default();
        state.set_jtag(true, false, true);
        state.set_reset(false, true);
        state.set_jtag(false, true, true);
        assert_eq!(
            state.drive(),
            Pins {
                tck: false,
                tms: true,
                tdi: true,
                trst: false,
                srst: true,
            }
        );
        assert_eq!(state.tck(), Logic::Zero);
    }
}
