//! # Handle Binding
//!
//! For simulators that do not pass values to foreign code directly, but hand over the
//! declared parameters of the foreign subprogram and let it read and write them through
//! opaque handles (VHPI in its object-model flavour, for example).
//!
//! The parameters are discovered once, on the first tick, by matching their names and
//! directions against [`EXPECTED_PARAMETERS`]. Every later tick reuses the handles.
use std::fmt::Display;

use rbb_bridge::{Tick, error::BridgeError};
use rbb_protocol::Logic;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    In,
    Out,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
        }
    }
}

/// A formal parameter as declared in the HDL.
#[derive(Clone, Debug)]
pub struct Parameter<H> {
    pub name: String,
    pub direction: Direction,
    pub handle: H,
}

/// The parameters of the foreign subprogram, in declaration order.
pub const EXPECTED_PARAMETERS: [(&str, Direction); 6] = [
    ("tdo", Direction::In),
    ("tck", Direction::Out),
    ("tms", Direction::Out),
    ("tdi", Direction::Out),
    ("trst", Direction::Out),
    ("srst", Direction::Out),
];

/// Access to the simulator's object model.
pub trait HostInterface {
    type Handle: Copy;

    /// Lists the parameters the simulator declared for the foreign subprogram.
    fn parameters(&self) -> Vec<Parameter<Self::Handle>>;

    /// Reads the current value of a parameter.
    fn get(&self, handle: Self::Handle) -> Logic;

    /// Schedules a new value for a parameter.
    fn put(&mut self, handle: Self::Handle, value: Logic);
}

/// Errors of the handle binding
#[derive(Debug)]
pub enum AdapterError {
    /// No parameter with this name was declared
    Unresolved { name: &'static str },
    /// The parameter exists, but with the wrong direction
    DirectionMismatch {
        name: &'static str,
        expected: Direction,
        found: Direction,
    },
    Bridge(BridgeError),
}

impl From<BridgeError> for AdapterError {
    fn from(value: BridgeError) -> Self {
        AdapterError::Bridge(value)
    }
}

impl Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdapterError::Unresolved { name } => {
                write!(f, "failed to resolve parameter '{}'", name)
            }
            AdapterError::DirectionMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "parameter '{}' has direction {}, expected {}",
                name, found, expected
            ),
            AdapterError::Bridge(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AdapterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdapterError::Bridge(e) => Some(e),
            _ => None,
        }
    }
}

/// Resolved handles of all parameters
#[derive(Copy, Clone, Debug)]
pub struct Ports<H> {
    pub tdo: H,
    pub tck: H,
    pub tms: H,
    pub tdi: H,
    pub trst: H,
    pub srst: H,
}

impl<H: Copy> Ports<H> {
    /// Matches the declared parameters against [`EXPECTED_PARAMETERS`].
    /// Names are compared case-insensitively, like VHDL identifiers.
    pub fn resolve<I: HostInterface<Handle = H>>(host: &I) -> Result<Ports<H>, AdapterError> {
        let declared = host.parameters();
        let mut handles = Vec::with_capacity(EXPECTED_PARAMETERS.len());
        for (name, expected) in EXPECTED_PARAMETERS {
            let param = declared
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(name))
                .ok_or(AdapterError::Unresolved { name })?;
            if param.direction != expected {
                return Err(AdapterError::DirectionMismatch {
                    name,
                    expected,
                    found: param.direction,
                });
            }
            log::debug!("Resolved parameter {} ({})", param.name, param.direction);
            handles.push(param.handle);
        }
        Ok(Ports {
            tdo: handles[0],
            tck: handles[1],
            tms: handles[2],
            tdi: handles[3],
            trst: handles[4],
            srst: handles[5],
        })
    }
}

/// Binding that discovers its parameters once and then marshals every tick through
/// the host's handles.
pub struct HandleAdapter<I: HostInterface> {
    ports: Option<Ports<I::Handle>>,
}

impl<I: HostInterface> Default for HandleAdapter<I> {
    fn default() -> Self {
        HandleAdapter { ports: None }
    }
}

impl<I: HostInterface> HandleAdapter<I> {
    pub fn new() -> HandleAdapter<I> {
        HandleAdapter::default()
    }

    pub fn is_resolved(&self) -> bool {
        self.ports.is_some()
    }

    /// Reads TDO from `host`, ticks `core` and writes the outputs back.
    /// Resolves the parameters on the first call.
    pub fn tick<T: Tick>(&mut self, host: &mut I, core: &mut T) -> Result<(), AdapterError> {
        let ports = match self.ports {
            Some(ports) => ports,
            None => {
                let ports = Ports::resolve(&*host)?;
                self.ports = Some(ports);
                ports
            }
        };

        let tdo = host.get(ports.tdo).to_bit();
        let pins = core.tick(tdo)?;
        host.put(ports.tck, pins.tck.into());
        host.put(ports.tms, pins.tms.into());
        host.put(ports.tdi, pins.tdi.into());
        host.put(ports.trst, pins.trst.into());
        host.put(ports.srst, pins.srst.into());
        Ok(())
    }

    /// Like [`HandleAdapter::tick`], on the process-wide bridge.
    /// Terminates the process on any error.
    pub fn tick_global(&mut self, host: &mut I) {
        crate::with_global(|bridge| self.tick(host, bridge))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rbb_bridge::Pins;

    /// An object model with one slot per declared parameter.
    struct MockHost {
        declared: Vec<(&'static str, Direction)>,
        values: Vec<Logic>,
    }

    impl MockHost {
        fn new(declared: Vec<(&'static str, Direction)>) -> MockHost {
            let values = vec![Logic::U; declared.len()];
            MockHost { declared, values }
        }

        fn value(&self, name: &str) -> Logic {
            let index = self.declared.iter().position(|(n, _)| *n == name).unwrap();
            self.values[index]
        }

        fn set(&mut self, name: &str, value: Logic) {
            let index = self.declared.iter().position(|(n, _)| *n == name).unwrap();
            self.values[index] = value;
        }
    }

    impl HostInterface for MockHost {
        type Handle = usize;

        fn parameters(&self) -> Vec<Parameter<usize>> {
            self.declared
                .iter()
                .enumerate()
                .map(|(handle, (name, direction))| Parameter {
                    name: name.to_string(),
                    direction: *direction,
                    handle,
                })
                .collect()
        }

        fn get(&self, handle: usize) -> Logic {
            self.values[handle]
        }

        fn put(&mut self, handle: usize, value: Logic) {
            self.values[handle] = value;
        }
    }

    struct Inverter;

    impl Tick for Inverter {
        fn tick(&mut self, tdo: bool) -> Result<Pins, BridgeError> {
            Ok(Pins {
                tck: !tdo,
                tms: tdo,
                tdi: !tdo,
                trst: false,
                srst: tdo,
            })
        }
    }

    fn vhpi_style_declarations() -> Vec<(&'static str, Direction)> {
        // VHPI reports identifiers in upper case and in declaration order
        vec![
            ("TDO", Direction::In),
            ("TCK", Direction::Out),
            ("TMS", Direction::Out),
            ("TDI", Direction::Out),
            ("TRST", Direction::Out),
            ("SRST", Direction::Out),
        ]
    }

    #[test]
    fn marshals_through_handles() {
        let mut host = MockHost::new(vhpi_style_declarations());
        let mut adapter = HandleAdapter::new();
        host.set("TDO", Logic::H);
        adapter.tick(&mut host, &mut Inverter).unwrap();
        assert!(adapter.is_resolved());
        assert_eq!(host.value("TCK"), Logic::Zero);
        assert_eq!(host.value("TMS"), Logic::One);
        assert_eq!(host.value("TDI"), Logic::Zero);
        assert_eq!(host.value("TRST"), Logic::Zero);
        assert_eq!(host.value("SRST"), Logic::One);

        host.set("TDO", Logic::Z);
        adapter.tick(&mut host, &mut Inverter).unwrap();
        assert_eq!(host.value("TCK"), Logic::One);
        assert_eq!(host.value("SRST"), Logic::Zero);
    }

    #[test]
    fn declaration_order_does_not_matter() {
        let mut declared = vhpi_style_declarations();
        declared.reverse();
        let host = MockHost::new(declared);
        let ports = Ports::resolve(&host).unwrap();
        assert_eq!(ports.tdo, 5);
        assert_eq!(ports.srst, 0);
    }

    #[test]
    fn missing_parameter_is_fatal() {
        let mut declared = vhpi_style_declarations();
        declared.remove(4);
        let mut host = MockHost::new(declared);
        let mut adapter = HandleAdapter::new();
        match adapter.tick(&mut host, &mut Inverter) {
            Err(AdapterError::Unresolved { name }) => assert_eq!(name, "trst"),
            other => panic!("expected Unresolved, got {:?}", other.err()),
        }
        assert!(!adapter.is_resolved());
    }

    #[test]
    fn wrong_direction_is_fatal() {
        let mut declared = vhpi_style_declarations();
        declared[0].1 = Direction::Out;
        let host = MockHost::new(declared);
        match Ports::resolve(&host) {
            Err(AdapterError::DirectionMismatch {
                name,
                expected,
                found,
            }) => {
                assert_eq!(name, "tdo");
                assert_eq!(expected, Direction::In);
                assert_eq!(found, Direction::Out);
            }
            other => panic!("expected DirectionMismatch, got {:?}", other.err()),
        }
    }
}
