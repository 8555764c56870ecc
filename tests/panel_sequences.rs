//! End-to-end operating sequences driven through the command surface, the
//! way the external driver exercises the panel.

use switchgear_panel::command::Command;
use switchgear_panel::domain::{BreakerState, CoilState, LockoutState, PanelState, TripSource};
use switchgear_panel::panel::Panel;

fn cmd(panel: &mut Panel, line: &str) -> bool {
    let cmd = Command::parse(line).expect("test command must parse");
    panel.execute(&cmd)
}

/// Drive the panel from the initial configuration to CLOSED.
fn close_breaker(panel: &mut Panel) {
    assert!(cmd(panel, "k1"), "close attempt on K1 rising edge");
    assert!(cmd(panel, "finish-close"));
    assert!(cmd(panel, "pulse-end"));
}

#[test]
fn happy_path_close_sequence() {
    let mut panel = Panel::new();

    assert!(cmd(&mut panel, "k1"));
    let mid = panel.snapshot();
    assert_eq!(mid.breaker_state, BreakerState::Closing);
    assert!(!mid.spring_charged);
    assert!(mid.operation_in_progress);

    assert!(cmd(&mut panel, "finish-close"));
    let closed = panel.snapshot();
    assert_eq!(closed.breaker_state, BreakerState::Closed);
    assert!(closed.spring_charged);
    assert!(!closed.operation_in_progress);
    assert_eq!(closed.k94_state, CoilState::Energized);
}

#[test]
fn direct_trip_round_trip() {
    let mut panel = Panel::new();
    close_breaker(&mut panel);

    assert!(cmd(&mut panel, "trip k2 K2"));
    let tripping = panel.snapshot();
    assert_eq!(tripping.breaker_state, BreakerState::Tripping);
    assert!(tripping.trip_signals.get(TripSource::Remote));

    assert!(cmd(&mut panel, "finish-trip k2"));
    let open = panel.snapshot();
    assert_eq!(open.breaker_state, BreakerState::Open);
    assert!(!open.trip_signals.get(TripSource::Remote));
    assert!(!open.operation_in_progress);
}

#[test]
fn anti_pump_blocks_reclose_from_closed() {
    let mut panel = Panel::new();
    close_breaker(&mut panel);

    // K1 off then on again raises a fresh close pulse against the closed
    // breaker; K94 holds the closing circuit open.
    assert!(!cmd(&mut panel, "k1"));
    assert!(!cmd(&mut panel, "k1"));
    assert_eq!(panel.snapshot().breaker_state, BreakerState::Closed);
}

#[test]
fn lockout_persists_across_power_loss() {
    let mut panel = Panel::new();
    close_breaker(&mut panel);

    assert!(cmd(&mut panel, "prot-trip"));
    assert!(cmd(&mut panel, "finish-prot-trip"));
    let snap = panel.snapshot();
    assert_eq!(snap.breaker_state, BreakerState::Open);
    assert_eq!(snap.k86_state, LockoutState::Latched);

    // Cycle the DC supply: the mechanically latched K86 must hold.
    assert!(cmd(&mut panel, "dc"));
    assert!(cmd(&mut panel, "dc"));
    assert_eq!(panel.snapshot().k86_state, LockoutState::Latched);

    // Closing stays blocked until the lockout is reset by hand.
    assert!(!cmd(&mut panel, "k1"));
    assert_eq!(panel.snapshot().breaker_state, BreakerState::Open);

    // Drop K1 again, reset the lockout, and the close goes through.
    assert!(!cmd(&mut panel, "k1"));
    assert!(cmd(&mut panel, "reset-k86"));
    assert!(cmd(&mut panel, "k1"));
    assert_eq!(panel.snapshot().breaker_state, BreakerState::Closing);
}

#[test]
fn mutual_exclusion_while_tripping() {
    let mut panel = Panel::new();
    close_breaker(&mut panel);
    assert!(cmd(&mut panel, "trip uv"));
    let before = panel.snapshot();
    assert!(before.operation_in_progress);

    for line in [
        "reset",
        "k1",
        "dc",
        "tc",
        "service",
        "earth",
        "busv",
        "coupler",
        "reset-k86",
        "prot-trip",
        "trip manual",
        "finish-close",
    ] {
        assert!(!cmd(&mut panel, line), "{line} must be rejected while busy");
        assert_eq!(panel.snapshot(), before, "{line} must not mutate state");
    }

    // Only the matching finish is accepted.
    assert!(cmd(&mut panel, "finish-trip uv"));
    assert_eq!(panel.snapshot().breaker_state, BreakerState::Open);
}

#[test]
fn reset_blocked_while_busy_then_exact_restore() {
    let mut panel = Panel::new();
    close_breaker(&mut panel);
    assert!(cmd(&mut panel, "trip bf 50BF"));

    assert!(!cmd(&mut panel, "reset"));
    assert!(panel.snapshot().operation_in_progress);

    assert!(cmd(&mut panel, "finish-trip bf"));
    assert!(cmd(&mut panel, "reset"));

    // Field-for-field equal to the documented initial configuration.
    assert_eq!(panel.snapshot(), PanelState::initial());
}

#[test]
fn dc_loss_drops_command_and_trip_flags() {
    let mut panel = Panel::new();
    assert!(cmd(&mut panel, "k1"));
    assert!(cmd(&mut panel, "finish-close"));
    // Pulse deliberately left up.

    assert!(cmd(&mut panel, "dc"));
    let snap = panel.snapshot();
    assert!(!snap.dc_ok);
    assert!(snap.dc_fail_alarm);
    assert_eq!(snap.kdc_state, CoilState::DeEnergized);
    assert!(!snap.k1_relay_energized);
    assert!(!snap.remote_close_command_active);
    assert!(!snap.any_trip_active());

    // With DC dead, everything needing the supply is rejected.
    assert!(!cmd(&mut panel, "k1"));
    assert!(!cmd(&mut panel, "tc"));
    assert!(!cmd(&mut panel, "reset-k86"));
}

#[test]
fn unknown_identifiers_are_no_ops() {
    assert_eq!(Command::parse("trip pt_r"), None);
    assert_eq!(Command::parse("pt r"), None);
    assert_eq!(Command::parse("bogus"), None);
}
