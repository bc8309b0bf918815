//! Behavior of the per-tool state store driven through the crate's public
//! surface, the way the shell and the tool widgets drive it.

use std::cell::RefCell;
use std::rc::Rc;

use toolbench::{StateEvent, StateObserver, StateProvider, ToolId};

#[derive(Clone, Default)]
struct SharedLog(Rc<RefCell<Vec<StateEvent>>>);

impl StateObserver for SharedLog {
    fn state_changed(&mut self, event: &StateEvent) {
        self.0.borrow_mut().push(*event);
    }
}

#[test]
fn edits_survive_switching_away_and_back() {
    let provider = StateProvider::new();
    let access = provider.access();

    // First mount adopts the initial value.
    let (text, setter) = access.use_state_or(ToolId::Base64Text, || String::from("hello"));
    assert_eq!(text, "hello");
    setter.set(String::from("hello, edited"));
    drop(setter);

    // Another tool runs in between.
    let (_, other) = access.use_state_or(ToolId::HashDigest, || 42_u32);
    other.set(7);

    // Remounting reads back the edit, not the initial value.
    let (text, _) = access.use_state_or(ToolId::Base64Text, || String::from("hello"));
    assert_eq!(text, "hello, edited");
}

#[test]
fn initial_value_is_built_only_for_a_vacant_slot() {
    let provider = StateProvider::new();
    let access = provider.access();

    let (_, setter) = access.use_state_or(ToolId::JwtInspector, || String::from("first"));
    setter.set(String::from("edited"));

    let mut built = false;
    let (value, _) = access.use_state_or(ToolId::JwtInspector, || {
        built = true;
        String::from("second")
    });
    assert_eq!(value, "edited");
    assert!(!built, "initializer ran for an occupied slot");
}

#[test]
fn slots_are_isolated_per_tool() {
    let provider = StateProvider::new();
    let access = provider.access();

    let (_, left) = access.use_state_or(ToolId::CaseConverter, || String::from("left"));
    let (_, _right) = access.use_state_or(ToolId::RegexTester, || String::from("right"));
    left.set(String::from("left, changed"));

    assert_eq!(
        access.get_cloned::<String>(ToolId::RegexTester).as_deref(),
        Some("right")
    );
    assert_eq!(
        access.get_cloned::<String>(ToolId::CaseConverter).as_deref(),
        Some("left, changed")
    );
}

#[test]
fn rapid_updates_compose_against_the_live_value() {
    let provider = StateProvider::new();
    let access = provider.access();

    let (count, setter) = access.use_state::<i32>(ToolId::UuidGenerator);
    assert_eq!(count, 0);
    for _ in 0..3 {
        setter.update(|n| n + 1);
    }
    assert_eq!(access.get_cloned::<i32>(ToolId::UuidGenerator), Some(3));
}

#[test]
fn absent_reads_are_none_not_a_falsy_default() {
    let provider = StateProvider::new();
    let access = provider.access();

    assert_eq!(access.get_cloned::<u32>(ToolId::NumberBase), None);
    assert_eq!(access.get_cloned::<bool>(ToolId::NumberBase), None);

    let (_, setter) = access.use_state::<u32>(ToolId::NumberBase);
    setter.set(0);
    assert_eq!(access.get_cloned::<u32>(ToolId::NumberBase), Some(0));
}

#[test]
fn update_on_a_vacant_slot_starts_from_default() {
    let provider = StateProvider::new();
    provider.with(|store| store.update(ToolId::LoremIpsum, |n: i32| n + 5));
    assert_eq!(
        provider.access().get_cloned::<i32>(ToolId::LoremIpsum),
        Some(5)
    );
}

#[test]
fn a_mismatched_slot_self_heals_on_adoption() {
    let provider = StateProvider::new();
    let access = provider.access();

    let (_, setter) = access.use_state::<u32>(ToolId::ImageDataUri);
    setter.set(9);

    // A consumer with a different schema under the same id re-adopts.
    let (text, _) = access.use_state_or(ToolId::ImageDataUri, || String::from("fresh"));
    assert_eq!(text, "fresh");
    assert_eq!(
        access.get_cloned::<String>(ToolId::ImageDataUri).as_deref(),
        Some("fresh")
    );
    assert_eq!(access.get_cloned::<u32>(ToolId::ImageDataUri), None);
}

#[test]
fn observers_hear_every_key_and_reads_stay_silent() {
    let events = SharedLog::default();
    let provider = StateProvider::new();
    provider.with(|store| store.subscribe(Box::new(events.clone())));
    let access = provider.access();

    let (_, a) = access.use_state_or(ToolId::HtmlEntities, || 1_u8);
    let (_, b) = access.use_state_or(ToolId::ColorConverter, || 2_u8);
    let _ = access.get_cloned::<u8>(ToolId::HtmlEntities);
    a.set(10);
    b.update(|n| n + 1);

    let seen = events.0.borrow();
    assert_eq!(
        *seen,
        vec![
            StateEvent::Adopted {
                id: ToolId::HtmlEntities
            },
            StateEvent::Adopted {
                id: ToolId::ColorConverter
            },
            StateEvent::Changed {
                id: ToolId::HtmlEntities
            },
            StateEvent::Changed {
                id: ToolId::ColorConverter
            },
        ]
    );
}

#[test]
fn revision_counts_writes_only() {
    let provider = StateProvider::new();
    let access = provider.access();

    assert_eq!(provider.with(|s| s.revision()), 0);
    let (_, setter) = access.use_state::<u8>(ToolId::Timestamp);
    let _ = access.get_cloned::<u8>(ToolId::Timestamp);
    let (_, _again) = access.use_state::<u8>(ToolId::Timestamp);
    assert_eq!(provider.with(|s| s.revision()), 1);

    setter.set(2);
    assert_eq!(provider.with(|s| s.revision()), 2);
}

#[test]
#[should_panic(expected = "StateProvider")]
fn reading_after_the_provider_is_gone_panics() {
    let provider = StateProvider::new();
    let access = provider.access();
    drop(provider);
    let _ = access.use_state::<i32>(ToolId::JsonFormatter);
}

#[test]
#[should_panic(expected = "StateProvider")]
fn writing_after_the_provider_is_gone_panics() {
    let provider = StateProvider::new();
    let access = provider.access();
    let (_, setter) = access.use_state::<i32>(ToolId::JsonFormatter);
    drop(provider);
    setter.set(1);
}
