use std::time::Duration;

use rbb_bridge::connection::ConnectionState;
use rbb_client::{AsyncRbbClient, RbbClient};
use rbb_protocol::{Command, Logic};
use rbb_tests::Simulation;

const TIMEOUT: Option<Duration> = Some(Duration::from_secs(10));

fn connect(sim: &Simulation) -> RbbClient {
    let client = RbbClient::connect(sim.path()).unwrap();
    client.set_read_timeout(TIMEOUT).unwrap();
    client
}

#[test]
fn shifts_through_loopback() {
    let sim = Simulation::start("shift", 0);
    let mut client = connect(&sim);

    let tdi = [true, false, true, true, false];
    let tdo: Vec<bool> = tdi
        .iter()
        .map(|bit| client.clock(false, *bit).unwrap())
        .collect();
    // Every bit comes back one clock later
    assert_eq!(tdo, vec![false, true, false, true, true]);
    assert!(!client.read().unwrap());

    client.quit().unwrap();
    let run = sim.stop().unwrap();
    assert_eq!(run.design.rising_edges(), 5);
}

#[test]
fn reset_lines_are_latched() {
    let sim = Simulation::start("reset", 0);
    let mut client = connect(&sim);

    client.clock(false, true).unwrap();
    client.reset(true, false).unwrap();
    // The loopback clears on TRST, and the reply proves the reset was processed
    assert!(!client.read().unwrap());
    client.reset(false, true).unwrap();
    client.read().unwrap();

    let run = sim.stop().unwrap();
    let signals = run.bridge.signals();
    assert_eq!(signals.trst(), Logic::Zero);
    assert_eq!(signals.srst(), Logic::One);
    assert_eq!(signals.tck(), Logic::One);
    assert_eq!(signals.tdi(), Logic::One);
}

#[test]
fn unknown_and_blink_commands_are_ignored() {
    let sim = Simulation::start("ignored", 0);
    let mut client = connect(&sim);

    client.write(true, true, true).unwrap();
    client.blink(true).unwrap();
    client.send(Command::Unknown(b'x')).unwrap();
    client.send(Command::Unknown(b'\n')).unwrap();
    client.blink(false).unwrap();
    assert!(client.read().unwrap());

    let run = sim.stop().unwrap();
    assert_eq!(run.bridge.connection_state(), ConnectionState::Connected);
    let pins = run.bridge.signals().drive();
    assert!(pins.tck && pins.tms && pins.tdi);
    assert!(!pins.trst && !pins.srst);
}

#[test]
fn reconnects_after_quit() {
    let sim = Simulation::start("quit", 0);

    let mut first = connect(&sim);
    first.clock(false, true).unwrap();
    first.quit().unwrap();

    let mut second = connect(&sim);
    // State of the design survives, the connection does not
    assert!(second.clock(false, false).unwrap());
    assert!(!second.clock(false, false).unwrap());
    second.quit().unwrap();

    sim.stop().unwrap();
}

#[test]
fn reconnects_after_hangup() {
    let sim = Simulation::start("hangup", 0);

    let mut first = connect(&sim);
    first.write(false, false, false).unwrap();
    first.read().unwrap();
    drop(first);

    let mut second = connect(&sim);
    assert!(!second.read().unwrap());
    sim.stop().unwrap();
}

#[test]
fn pins_only_change_on_open_gate_ticks() {
    const DELAY: u32 = 5;
    let sim = Simulation::start("delay", DELAY);
    let mut client = connect(&sim);

    for bit in [true, false, true, false] {
        client.clock(true, bit).unwrap();
    }
    client.read().unwrap();

    let run = sim.stop().unwrap();
    assert_eq!(run.design.rising_edges(), 4);
    assert!(run.pin_changes.len() >= 8);
    let period = DELAY as u64 + 1;
    for tick in &run.pin_changes {
        assert_eq!(tick % period, 0, "pins changed on tick {}", tick);
    }
    // Consecutive commands are at least one gate period apart
    for pair in run.pin_changes.windows(2) {
        assert!(pair[1] - pair[0] >= period);
    }
    assert_eq!(run.bridge.signals().tms(), Logic::One);
}

#[tokio::test]
async fn async_client_shifts_through_loopback() {
    let sim = Simulation::start("async", 1);
    let mut client = AsyncRbbClient::connect(sim.path()).await.unwrap();

    client.reset(false, false).await.unwrap();
    let mut tdo = Vec::new();
    for bit in [false, true, true, false] {
        tdo.push(client.clock(false, bit).await.unwrap());
    }
    assert_eq!(tdo, vec![false, false, true, true]);
    client.quit().await.unwrap();

    sim.stop().unwrap();
}
