//! Rate gate between the simulation clock and the emulated TCK.
//!
//! Logic downstream of the bridge usually synchronizes TCK, TMS and TDI into its own
//! clock domain and needs a minimum number of host cycles between two transitions.
//! The gate lets the protocol engine run only once every `delay + 1` ticks.

/// Modulo counter with a configurable ceiling.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateGate {
    delay: u32,
    counter: u32,
}

impl RateGate {
    /// A delay of 0 never suppresses a tick.
    pub fn new(delay: u32) -> RateGate {
        RateGate { delay, counter: 0 }
    }

    pub fn delay(&self) -> u32 {
        self.delay
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Advances the counter by one tick.
    /// Returns `true` if the engine should run on this tick.
    pub fn poll(&mut self) -> bool {
        let open = self.counter == 0;
        self.counter = if self.counter >= self.delay {
            0
        } else {
            self.counter + 1
        };
        open
    }
}

#[cfg(test)]
mod test {
    use super::RateGate;

    fn open_ticks(delay: u32, ticks: usize) -> Vec<usize> {
        let mut gate = RateGate::new(delay);
        (0..ticks).filter(|_| gate.poll()).collect()
    }

    #[test]
    fn zero_delay_is_always_open() {
        assert_eq!(open_ticks(0, 5), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn opens_every_delay_plus_one_ticks() {
        assert_eq!(open_ticks(1, 7), vec![0, 2, 4, 6]);
        assert_eq!(open_ticks(3, 13), vec![0, 4, 8, 12]);
    }

    #[test]
    fn counter_stays_below_ceiling() {
        let mut gate = RateGate::new(2);
        let mut seen = Vec::new();
        for _ in 0..6 {
            gate.poll();
            seen.push(gate.counter());
        }
        assert_eq!(seen, vec![1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn max_delay_does_not_overflow() {
        let mut gate = RateGate::new(u32::MAX);
        assert!(gate.poll());
        assert!(!gate.poll());
        assert_eq!(gate.counter(), 2);
    }
}
