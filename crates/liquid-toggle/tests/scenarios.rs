//! End-to-end toggle behavior driven through the test harness.

use liquid_core::{Element, Event, Key, ListenerKind, Point};
use liquid_test::Harness;
use liquid_toggle::{InteractionState, SizeName};
use proptest::prelude::*;
use std::time::Duration;

/// Route element logs to the test output; `RUST_LOG=liquid_toggle=debug`
/// shows transitions.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Press at the settled edge, drag to `fraction` of the track, and return the
/// completion shown just before release.
fn drag_and_release(harness: &mut Harness, fraction: f32) -> f64 {
    let bounds = harness.toggle().bounds();
    let y = bounds.center().y;
    let start = if harness.toggle().checked() {
        bounds.right()
    } else {
        bounds.left()
    };
    let target = bounds.width.mul_add(fraction, bounds.left());
    harness.send(&Event::mouse_down(Point::new(start, y)));
    harness.send(&Event::mouse_move(Point::new(target, y)));
    let shown = harness.toggle().completion();
    harness.send(&Event::mouse_up(Point::new(target, y)));
    shown
}

// === Attach ===

#[test]
fn test_attach_large_unchecked() {
    init_tracing();
    let mut harness = Harness::new(&[("size", "lg")]);
    harness.connect();

    let toggle = harness.toggle();
    let profile = SizeName::Lg.profile();
    assert!(!toggle.checked());
    assert_eq!(toggle.completion(), 0.0);
    assert_eq!(toggle.size(), SizeName::Lg);
    assert_eq!(toggle.bounds().width, profile.width);
    assert_eq!(toggle.bounds().height, profile.height);

    let dims = harness.surface().dimensions().expect("dimensions projected");
    assert_eq!(dims.width, profile.width);
    assert_eq!(dims.height, profile.height);
    assert_eq!(harness.surface().completion(), Some(0.0));
    assert_eq!(harness.changes().count(), 0);
}

#[test]
fn test_attach_checked_starts_on() {
    let mut harness = Harness::new(&[("checked", "")]);
    harness.connect();
    assert!(harness.toggle().checked());
    assert_eq!(harness.surface().completion(), Some(100.0));
    assert_eq!(harness.changes().count(), 0);
}

#[test]
fn test_unknown_size_attribute_is_medium() {
    init_tracing();
    let mut harness = Harness::new(&[("size", "huge")]);
    harness.connect();
    assert_eq!(harness.toggle().size(), SizeName::Md);
    assert_eq!(harness.toggle().bounds().width, SizeName::Md.profile().width);
}

// === Programmatic checked ===

#[test]
fn test_set_checked_without_bounce_jumps() {
    let mut harness = Harness::new(&[("bounce", "false")]);
    harness.connect();
    harness.surface().clear();

    harness.toggle_mut().set_checked(true);
    assert_eq!(harness.toggle().completion(), 100.0);
    assert!(harness.surface().completions().iter().all(|&c| c == 100.0));

    harness.advance(ms(500));
    assert!(harness.surface().completions().iter().all(|&c| c == 100.0));
    assert_eq!(harness.changes().values(), vec![true]);
    assert!(harness.changes().last().is_some_and(|e| e.bubbles && e.composed));
}

#[test]
fn test_set_checked_during_bounce_delay_wins() {
    let mut harness = Harness::new(&[]);
    harness.connect().press_key(Key::Enter);
    harness.advance(ms(100));
    harness.toggle_mut().set_checked(true);
    harness.surface().clear();

    harness.advance(ms(600));
    assert_eq!(harness.toggle().completion(), 100.0);
    assert!(harness.surface().completions().iter().all(|&c| c == 100.0));
    assert!(harness.is_settled());
    assert_eq!(harness.changes().values(), vec![true]);
}

#[test]
fn test_set_checked_cancels_drag() {
    let mut harness = Harness::new(&[]);
    harness.connect();
    let bounds = harness.toggle().bounds();
    let y = bounds.center().y;
    harness.send(&Event::mouse_down(Point::new(bounds.left(), y)));
    harness.send(&Event::mouse_move(Point::new(bounds.left() + 10.0, y)));
    harness.toggle_mut().set_checked(true);

    harness.send(&Event::mouse_move(Point::new(bounds.left() + 12.0, y)));
    harness.send(&Event::mouse_up(Point::new(bounds.left() + 12.0, y)));
    harness.settle();
    assert!(harness.toggle().checked());
    assert_eq!(harness.toggle().completion(), 100.0);
    assert_eq!(harness.changes().values(), vec![true]);
}

#[test]
fn test_set_checked_same_value_is_silent() {
    let mut harness = Harness::new(&[]);
    harness.connect();
    harness.toggle_mut().set_checked(false);
    assert_eq!(harness.changes().count(), 0);

    harness.toggle_mut().set_checked(true);
    harness.toggle_mut().set_checked(true);
    assert_eq!(harness.changes().values(), vec![true]);
}

#[test]
fn test_set_checked_reflects_attribute() {
    let mut harness = Harness::new(&[]);
    harness.connect();
    harness.toggle_mut().set_checked(true);
    assert_eq!(harness.toggle().get_attribute("checked"), Some(""));
    harness.toggle_mut().set_checked(false);
    assert!(!harness.toggle().has_attribute("checked"));
}

#[test]
fn test_checked_attribute_does_not_notify() {
    let mut harness = Harness::new(&[]);
    harness.connect().set_attribute("checked", "");
    assert!(harness.toggle().checked());
    assert_eq!(harness.toggle().completion(), 100.0);
    assert_eq!(harness.changes().count(), 0);
}

// === Keyboard ===

#[test]
fn test_enter_toggles_on_key_down() {
    let mut harness = Harness::new(&[]);
    harness.connect();
    let outcome = harness.key_down(Key::Enter);
    assert!(outcome.handled);
    assert_eq!(harness.toggle().interaction_state(), InteractionState::Animating);
    assert!(harness.toggle().is_active());

    harness.settle();
    assert!(harness.toggle().checked());
    assert_eq!(harness.changes().values(), vec![true]);
}

#[test]
fn test_space_toggles_on_key_up() {
    let mut harness = Harness::new(&[]);
    harness.connect();

    let down = harness.key_down(Key::Space);
    assert!(down.default_prevented);
    assert_eq!(harness.toggle().interaction_state(), InteractionState::Idle);
    harness.advance(ms(500));
    assert_eq!(harness.changes().count(), 0);

    let up = harness.key_up(Key::Space);
    assert!(up.handled);
    assert!(!up.default_prevented);
    harness.settle();
    assert_eq!(harness.changes().values(), vec![true]);
}

#[test]
fn test_other_keys_are_ignored() {
    let mut harness = Harness::new(&[]);
    harness.connect();
    assert!(!harness.key_down(Key::Tab).handled);
    assert!(!harness.key_up(Key::Enter).handled);
    assert!(!harness.key_down(Key::Char('x')).handled);
    harness.settle();
    assert_eq!(harness.changes().count(), 0);
}

#[test]
fn test_double_enter_ends_on_starting_value() {
    init_tracing();
    let mut harness = Harness::new(&[]);
    harness.connect();
    harness.key_down(Key::Enter);
    harness.advance(ms(50));
    harness.key_down(Key::Enter);
    assert_eq!(harness.toggle().interaction_state(), InteractionState::Animating);

    // First transition: 200ms bounce delay, 150ms tween, 50ms settle.
    harness.advance(ms(400));
    assert_eq!(harness.changes().values(), vec![true]);
    assert!(harness.toggle().is_active());

    harness.settle();
    assert!(!harness.toggle().checked());
    assert_eq!(harness.toggle().completion(), 0.0);
    assert_eq!(harness.changes().values(), vec![true, false]);
    assert!(harness
        .surface()
        .completions()
        .iter()
        .all(|c| (0.0..=100.0).contains(c)));
}

#[test]
fn test_second_toggle_waits_for_first_tween() {
    let mut harness = Harness::instant(&[]);
    harness.connect();
    harness.press_key(Key::Enter);
    harness.key_down(Key::Enter);

    let log = harness.tweens().expect("instant harness").clone();
    assert_eq!(log.len(), 1);

    harness.settle();
    let tweens = log.tweens();
    assert_eq!(tweens.len(), 2);
    assert_eq!((tweens[0].from, tweens[0].to), (0.0, 100.0));
    assert_eq!((tweens[1].from, tweens[1].to), (100.0, 0.0));
    assert_eq!(harness.changes().values(), vec![true, false]);
}

#[test]
fn test_bounce_off_toggles_without_delay() {
    let mut harness = Harness::instant(&[("bounce", "false")]);
    harness.connect().press_key(Key::Enter).settle();
    let tweens = harness.tweens().expect("instant harness").tweens();
    assert_eq!(tweens[0].delay, Duration::ZERO);
    assert_eq!(tweens[0].duration, ms(150));
}

// === Pointer ===

#[test]
fn test_click_toggles() {
    let mut harness = Harness::new(&[]);
    harness.connect().click().settle();
    assert!(harness.toggle().checked());
    harness.click().settle();
    assert!(!harness.toggle().checked());
    assert_eq!(harness.changes().values(), vec![true, false]);
}

#[test]
fn test_touch_press_marks_active() {
    let mut harness = Harness::new(&[]);
    harness.connect();
    let center = harness.toggle().bounds().center();
    harness.send(&Event::touch_down(center));
    assert!(harness.toggle().is_active());
    assert_eq!(harness.surface().active(), Some(true));

    harness.send(&Event::touch_up(center));
    harness.settle();
    assert!(harness.toggle().checked());
    assert!(!harness.toggle().is_active());
}

#[test]
fn test_long_press_is_not_a_tap() {
    let mut harness = Harness::new(&[]);
    harness.connect();
    let center = harness.toggle().bounds().center();
    harness.send(&Event::mouse_down(center));
    harness.advance(ms(400));
    harness.send(&Event::mouse_up(center));
    harness.settle();
    assert!(!harness.toggle().checked());
    assert_eq!(harness.changes().count(), 0);
}

#[test]
fn test_drag_to_seventy_percent_turns_on() {
    init_tracing();
    let mut harness = Harness::new(&[]);
    harness.connect();
    let shown = drag_and_release(&mut harness, 0.7);
    assert!((shown - 70.0).abs() < 0.01);

    harness.settle();
    assert!(harness.toggle().checked());
    assert_eq!(harness.toggle().completion(), 100.0);
    assert_eq!(harness.changes().values(), vec![true]);
}

#[test]
fn test_drag_back_from_on() {
    let mut harness = Harness::new(&[("checked", "")]);
    harness.connect().drag_to(0.2).settle();
    assert!(!harness.toggle().checked());
    assert_eq!(harness.changes().values(), vec![false]);
}

#[test]
fn test_short_drag_returns_to_start() {
    let mut harness = Harness::new(&[]);
    harness.connect().drag_to(0.3).settle();
    assert!(!harness.toggle().checked());
    assert_eq!(harness.toggle().completion(), 0.0);
    assert_eq!(harness.changes().count(), 0);
}

#[test]
fn test_drag_past_track_clamps() {
    let mut harness = Harness::new(&[]);
    harness.connect();
    let shown = drag_and_release(&mut harness, 3.0);
    assert_eq!(shown, 100.0);
    harness.settle();
    assert!(harness.toggle().checked());
}

#[test]
fn test_drag_while_animating_is_ignored() {
    let mut harness = Harness::new(&[]);
    harness.connect().press_key(Key::Enter);
    harness.advance(ms(50));
    harness.drag_to(0.9);
    harness.settle();
    assert_eq!(harness.changes().values(), vec![true]);
}

// === Disabled ===

#[test]
fn test_disabled_ignores_everything() {
    let mut harness = Harness::new(&[("disabled", "")]);
    harness.connect();
    harness
        .press_key(Key::Enter)
        .press_key(Key::Space)
        .click()
        .tap()
        .drag_to(0.9)
        .advance(ms(500));
    assert!(!harness.toggle().checked());
    assert!(!harness.toggle().is_active());
    assert_eq!(harness.toggle().completion(), 0.0);
    assert_eq!(harness.changes().count(), 0);
}

#[test]
fn test_disabling_drops_queued_toggle() {
    let mut harness = Harness::new(&[]);
    harness.connect();
    harness.key_down(Key::Enter);
    harness.key_down(Key::Enter);
    harness.set_attribute("disabled", "").settle();
    assert_eq!(harness.changes().values(), vec![true]);
    assert!(harness.toggle().checked());
    assert_eq!(harness.toggle().completion(), 100.0);

    harness.remove_attribute("disabled").advance(ms(1000));
    assert_eq!(harness.changes().values(), vec![true]);
}

#[test]
fn test_disabling_mid_drag_stops_tracking() {
    let mut harness = Harness::new(&[]);
    harness.connect();
    let bounds = harness.toggle().bounds();
    let y = bounds.center().y;
    harness.send(&Event::mouse_down(Point::new(bounds.left(), y)));
    harness.send(&Event::mouse_move(Point::new(bounds.left() + 10.0, y)));
    harness.set_attribute("disabled", "");
    let kills = harness.drag().kills();
    assert!(kills >= 1);

    let outcome = harness.send(&Event::mouse_up(Point::new(bounds.right(), y)));
    assert!(!outcome.handled);
    harness.remove_attribute("disabled").settle();
    assert!(!harness.toggle().checked());
    assert_eq!(harness.changes().count(), 0);
}

// === Detach ===

#[test]
fn test_detach_stops_input_and_animation() {
    let mut harness = Harness::new(&[]);
    harness.connect().press_key(Key::Enter);
    harness.advance(ms(250));
    let mid = harness.toggle().completion();

    harness.disconnect();
    assert!(harness.drag().kills() >= 1);
    assert!(!harness.toggle().is_listening(ListenerKind::Pointer));
    assert!(!harness.key_down(Key::Enter).handled);
    harness.advance(ms(500));
    assert_eq!(harness.toggle().completion(), mid);
    assert_eq!(harness.changes().count(), 0);
}

#[test]
fn test_reattach_resumes_from_attributes() {
    let mut harness = Harness::new(&[]);
    harness.connect().click().settle();
    harness.disconnect().connect();
    assert!(harness.toggle().checked());
    assert_eq!(harness.toggle().interaction_state(), InteractionState::Idle);
    harness.press_key(Key::Enter).settle();
    assert_eq!(harness.changes().values(), vec![true, false]);
}

proptest! {
    #[test]
    fn prop_drag_settles_on_majority_side(fraction in 0.1f32..1.2) {
        let mut harness = Harness::new(&[]);
        harness.connect();
        let shown = drag_and_release(&mut harness, fraction);
        harness.settle();
        prop_assert_eq!(harness.toggle().checked(), shown >= 50.0);
        prop_assert_eq!(harness.toggle().completion(), if shown >= 50.0 { 100.0 } else { 0.0 });
    }

    #[test]
    fn prop_drag_from_on_settles_on_majority_side(fraction in -0.2f32..0.9) {
        let mut harness = Harness::new(&[("checked", "")]);
        harness.connect();
        let shown = drag_and_release(&mut harness, fraction);
        harness.settle();
        prop_assert_eq!(harness.toggle().checked(), shown >= 50.0);
    }

    #[test]
    fn prop_set_checked_notifies_only_on_change(values in prop::collection::vec(any::<bool>(), 0..12)) {
        let mut harness = Harness::new(&[]);
        harness.connect();
        let mut current = false;
        let mut expected = Vec::new();
        for value in values {
            harness.toggle_mut().set_checked(value);
            if value != current {
                expected.push(value);
                current = value;
            }
        }
        prop_assert_eq!(harness.changes().values(), expected);
    }

    #[test]
    fn prop_unknown_size_is_medium(key in "[a-z0-9]{0,6}") {
        prop_assume!(SizeName::ALL.iter().all(|s| s.key() != key));
        let mut harness = Harness::new(&[("size", key.as_str())]);
        harness.connect();
        prop_assert_eq!(harness.toggle().size(), SizeName::Md);
    }

    #[test]
    fn prop_disabled_input_changes_nothing(
        steps in prop::collection::vec(0u8..6, 1..10),
        checked in any::<bool>(),
    ) {
        let attrs: &[(&str, &str)] = if checked {
            &[("disabled", ""), ("checked", "")]
        } else {
            &[("disabled", "")]
        };
        let mut harness = Harness::new(attrs);
        harness.connect();
        let before = (harness.toggle().checked(), harness.toggle().completion());
        for step in steps {
            match step {
                0 => { harness.press_key(Key::Enter); }
                1 => { harness.press_key(Key::Space); }
                2 => { harness.click(); }
                3 => { harness.tap(); }
                4 => { harness.drag_to(0.5); }
                _ => { harness.advance(ms(100)); }
            }
        }
        prop_assert_eq!((harness.toggle().checked(), harness.toggle().completion()), before);
        prop_assert!(!harness.toggle().is_active());
        prop_assert_eq!(harness.changes().count(), 0);
    }
}
