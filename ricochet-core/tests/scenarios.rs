//! End-to-end pager behaviour against recording mocks

mod common;

use common::{booted, pager, Call, World};
use embassy_futures::block_on;
use ricochet_core::battery::{OVERLAY_RECT, OVERLAY_TEXT_POS};
use ricochet_core::config::{
    AddressFilter, RecipientDirectory, RecipientEntry, RingtoneBank, A_TONE_HZ, B_TONE_HZ,
    C_TONE_HZ,
};
use ricochet_core::dispatch::{BODY_POS, HEADER_RECT, LABEL_POS};
use ricochet_core::traits::{Color, DecodeError, DecodedMessage, DisplayError, RadioError};
use ricochet_core::{BootPhase, FatalError, NotListening, PagerConfig, ReceiveOutcome, State};
use ricochet_hal::AdcError;

fn blink_calls(count: usize) -> Vec<Call> {
    let mut calls = Vec::new();
    for _ in 0..count {
        calls.extend([
            Call::LedOn,
            Call::DelayMs(100),
            Call::LedOff,
            Call::DelayMs(100),
        ]);
    }
    calls
}

#[test]
fn test_boot_runs_phases_in_order_then_plays_startup_tone() {
    let world = World::default();
    let mut pager = pager(&world, PagerConfig::default());

    assert_eq!(block_on(pager.boot()), Ok(()));
    assert_eq!(pager.state(), State::Listening);

    let calls = world.calls();
    assert_eq!(
        &calls[..6],
        &[
            Call::DisplayInit,
            Call::Clear,
            Call::Flush,
            Call::BeginFsk,
            Call::BeginPager(439_991_900, 1200),
            Call::StartReceive(AddressFilter {
                address: 200,
                mask: 0
            }),
        ]
    );
    assert_eq!(world.tones(), vec![A_TONE_HZ, 0, 0, C_TONE_HZ, 0, 0, 0, 0]);
    assert_eq!(calls.len(), 6 + 8);
}

#[test]
fn test_boot_without_startup_tone_is_silent() {
    let world = World::default();
    let mut config = PagerConfig::default();
    config.alert.startup_ringtone = None;
    let mut pager = pager(&world, config);

    block_on(pager.boot()).unwrap();
    assert!(world.tones().is_empty());
}

#[test]
fn test_boot_failure_halts_and_skips_later_phases() {
    let cases = [
        (
            BootPhase::Display,
            FatalError::Display(DisplayError::NotFound),
            1,
        ),
        (BootPhase::Radio, FatalError::Radio(RadioError(-2)), 4),
        (BootPhase::Protocol, FatalError::Protocol(RadioError(-13)), 5),
        (BootPhase::Receiver, FatalError::Receiver(RadioError(-20)), 6),
    ];

    for (phase, expected, call_count) in cases {
        let world = World::default();
        world.fail_phase(phase);
        let mut pager = pager(&world, PagerConfig::default());

        assert_eq!(block_on(pager.boot()), Err(expected));
        assert_eq!(pager.state(), State::Halted(expected));
        assert_eq!(world.calls().len(), call_count, "phase {:?}", phase);
        assert!(world.tones().is_empty());
    }
}

#[test]
fn test_halted_pager_refuses_to_poll() {
    let world = World::default();
    world.fail_phase(BootPhase::Radio);
    let mut pager = pager(&world, PagerConfig::default());
    let _ = block_on(pager.boot());
    world.clear_calls();
    world.queue_page(1067, "Hello", 2);
    world.set_now(10_000);

    let err = block_on(pager.poll()).unwrap_err();
    assert_eq!(
        err,
        NotListening(State::Halted(FatalError::Radio(RadioError(-2))))
    );
    assert!(world.calls().is_empty());

    // a second boot attempt stays halted
    assert!(block_on(pager.boot()).is_err());
    assert!(world.calls().is_empty());
}

#[test]
fn test_poll_before_boot_is_rejected() {
    let world = World::default();
    let mut pager = pager(&world, PagerConfig::default());
    assert_eq!(
        block_on(pager.poll()),
        Err(NotListening(State::Booting(BootPhase::Display)))
    );
}

#[test]
fn test_emfcamp_page_alerts_once() {
    let world = World::default();
    let mut pager = booted(&world, PagerConfig::default());
    world.queue_page(1067, "Hello", 2);

    let report = block_on(pager.poll()).unwrap();

    assert_eq!(
        report.receive,
        ReceiveOutcome::Decoded {
            message: DecodedMessage::new(1067, "Hello"),
            matches: 1
        }
    );
    assert_eq!(report.battery, None);
    assert_eq!(report.display_error, None);
    assert_eq!(pager.state(), State::Listening);

    let mut expected = vec![
        Call::Batches,
        Call::Decode,
        // page
        Call::Clear,
        Call::Fill(HEADER_RECT, Color::White),
        Call::Cursor(LABEL_POS.0, LABEL_POS.1),
        Call::TextColor(Color::Black),
        Call::Print("EMFCAMP".into()),
        Call::Cursor(BODY_POS.0, BODY_POS.1),
        Call::TextColor(Color::White),
        Call::Print("Hello".into()),
        Call::Flush,
        // battery overlay
        Call::Adc,
        Call::Fill(OVERLAY_RECT, Color::White),
        Call::Cursor(OVERLAY_TEXT_POS.0, OVERLAY_TEXT_POS.1),
        Call::TextColor(Color::Black),
        Call::Print("3.30V".into()),
        Call::Flush,
    ];
    for f in [C_TONE_HZ, 0, A_TONE_HZ, 0, B_TONE_HZ, B_TONE_HZ, 0, A_TONE_HZ] {
        expected.push(Call::Tone(f, 130));
    }
    expected.extend(blink_calls(20));

    assert_eq!(world.calls(), expected);
}

#[test]
fn test_unlisted_address_changes_nothing() {
    let world = World::default();
    let mut pager = booted(&world, PagerConfig::default());
    world.queue_page(999_999, "x", 2);

    let report = block_on(pager.poll()).unwrap();

    assert_eq!(
        report.receive,
        ReceiveOutcome::Decoded {
            message: DecodedMessage::new(999_999, "x"),
            matches: 0
        }
    );
    assert_eq!(world.calls(), vec![Call::Batches, Call::Decode]);
}

#[test]
fn test_gate_waits_below_threshold() {
    let world = World::default();
    let mut pager = booted(&world, PagerConfig::default());
    world.queue_page(1067, "Hello", 1);

    let report = block_on(pager.poll()).unwrap();
    assert_eq!(report.receive, ReceiveOutcome::Waiting { batches: 1 });
    assert_eq!(world.calls(), vec![Call::Batches]);

    // second batch arrives, the same page is now read
    world.set_batches(2);
    let report = block_on(pager.poll()).unwrap();
    assert!(matches!(
        report.receive,
        ReceiveOutcome::Decoded { matches: 1, .. }
    ));
}

#[test]
fn test_decode_failure_is_reported_and_not_retried() {
    let world = World::default();
    let mut pager = booted(&world, PagerConfig::default());
    world.queue_failure(-707, 3);

    let report = block_on(pager.poll()).unwrap();
    assert_eq!(
        report.receive,
        ReceiveOutcome::DecodeFailed(DecodeError(-707))
    );
    assert_eq!(world.count(|c| *c == Call::Decode), 1);
    assert!(world.tones().is_empty());

    let report = block_on(pager.poll()).unwrap();
    assert_eq!(report.receive, ReceiveOutcome::Waiting { batches: 0 });
    assert_eq!(world.count(|c| *c == Call::Decode), 1);
}

#[test]
fn test_duplicate_addresses_alert_in_declaration_order() {
    let world = World::default();
    let bank = RingtoneBank::default();
    let entries = [
        RecipientEntry::new(5, "ONE", 1).unwrap(),
        RecipientEntry::new(216, "TIME", 0).unwrap(),
        RecipientEntry::new(5, "TWO", 3).unwrap(),
    ];
    let config = PagerConfig {
        directory: RecipientDirectory::from_entries(&entries, &bank).unwrap(),
        ..PagerConfig::default()
    };
    let mut pager = booted(&world, config);
    world.queue_page(5, "dup", 2);

    let report = block_on(pager.poll()).unwrap();

    assert!(matches!(
        report.receive,
        ReceiveOutcome::Decoded { matches: 2, .. }
    ));
    let printed = world.printed();
    let labels: Vec<&str> = printed
        .iter()
        .map(String::as_str)
        .filter(|s| *s == "ONE" || *s == "TWO")
        .collect();
    assert_eq!(labels, vec!["ONE", "TWO"]);

    let tones = world.tones();
    assert_eq!(tones.len(), 16);
    assert_eq!(&tones[..8], bank.get(1).unwrap().notes());
    assert_eq!(&tones[8..], bank.get(3).unwrap().notes());
    assert_eq!(world.count(|c| *c == Call::LedOn), 40);
}

#[test]
fn test_battery_timer_refreshes_after_interval() {
    let world = World::default();
    let mut pager = booted(&world, PagerConfig::default());

    world.set_now(2000);
    assert_eq!(block_on(pager.poll()).unwrap().battery, None);

    world.set_now(2001);
    let report = block_on(pager.poll()).unwrap();
    let sample = report.battery.unwrap().unwrap();
    assert_eq!(sample.raw, 2047);
    assert!((sample.voltage - 3.298).abs() < 1e-3);

    world.set_now(4001);
    assert_eq!(block_on(pager.poll()).unwrap().battery, None);

    world.set_now(4002);
    assert!(block_on(pager.poll()).unwrap().battery.is_some());
}

#[test]
fn test_alert_overlay_does_not_restart_battery_timer() {
    let world = World::default();
    let mut pager = booted(&world, PagerConfig::default());

    world.set_now(1500);
    world.queue_page(216, "tick", 2);
    let report = block_on(pager.poll()).unwrap();
    assert_eq!(report.battery, None);
    assert_eq!(world.count(|c| *c == Call::Adc), 1);

    world.set_now(2001);
    assert!(block_on(pager.poll()).unwrap().battery.is_some());
}

#[test]
fn test_battery_check_runs_after_dispatch_in_same_cycle() {
    let world = World::default();
    let mut pager = booted(&world, PagerConfig::default());
    world.set_now(5000);
    world.queue_page(216, "tick", 2);

    let report = block_on(pager.poll()).unwrap();
    assert!(report.battery.is_some());

    let calls = world.calls();
    let last_led = calls.iter().rposition(|c| *c == Call::LedOff).unwrap();
    let last_adc = calls.iter().rposition(|c| *c == Call::Adc).unwrap();
    assert!(last_adc > last_led);
    assert_eq!(world.count(|c| *c == Call::Adc), 2);
}

#[test]
fn test_display_failure_still_rings_and_blinks() {
    let world = World::default();
    let mut pager = booted(&world, PagerConfig::default());
    world.fail_flush(true);
    world.queue_page(349_440, "ring anyway", 2);

    let report = block_on(pager.poll()).unwrap();

    assert_eq!(report.display_error, Some(DisplayError::Bus));
    assert_eq!(world.tones().len(), 8);
    assert_eq!(world.count(|c| *c == Call::LedOn), 20);
    assert_eq!(pager.state(), State::Listening);
}

#[test]
fn test_adc_failure_skips_overlay() {
    let world = World::default();
    let mut pager = booted(&world, PagerConfig::default());
    world.set_adc(Err(AdcError::ConversionFailed));
    world.set_now(2500);

    let report = block_on(pager.poll()).unwrap();

    assert_eq!(report.battery, Some(Err(AdcError::ConversionFailed)));
    assert_eq!(world.count(|c| *c == Call::Flush), 0);
}
