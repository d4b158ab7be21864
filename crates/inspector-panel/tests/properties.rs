use inspector_panel::{MemorySettings, SettingOption, SettingsStore, TimerQueue};
use proptest::prelude::*;
use std::time::Duration;

proptest! {
    #[test]
    fn prop_timers_fire_in_deadline_then_schedule_order(
        delays in prop::collection::vec(0u64..50, 1..20),
        steps in prop::collection::vec(1u64..40, 1..10),
    ) {
        let mut queue = TimerQueue::new();
        let scheduled: Vec<_> = delays
            .iter()
            .enumerate()
            .map(|(i, delay)| (queue.schedule(Duration::from_millis(*delay), i), *delay))
            .collect();

        let mut fired = Vec::new();
        for step in steps {
            fired.extend(queue.advance(Duration::from_millis(step)));
        }
        fired.extend(queue.advance(Duration::from_millis(50)));
        prop_assert!(queue.is_empty());

        let mut expected = scheduled.clone();
        expected.sort_by_key(|(id, delay)| (*delay, *id));
        let expected: Vec<_> = expected.iter().map(|(id, _)| *id).collect();
        let fired: Vec<_> = fired.iter().map(|(id, _)| *id).collect();
        prop_assert_eq!(fired, expected);
    }

    #[test]
    fn prop_cancelled_timers_never_fire(
        delays in prop::collection::vec(0u64..50, 1..20),
        cancel_mask in prop::collection::vec(any::<bool>(), 20),
    ) {
        let mut queue = TimerQueue::new();
        let mut kept = Vec::new();
        for (i, delay) in delays.iter().enumerate() {
            let id = queue.schedule(Duration::from_millis(*delay), i);
            if cancel_mask[i] {
                prop_assert_eq!(queue.cancel(id), Some(i));
            } else {
                kept.push(id);
            }
        }
        let mut fired: Vec<_> = queue
            .advance(Duration::from_millis(100))
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        fired.sort();
        kept.sort();
        prop_assert_eq!(fired, kept);
    }

    #[test]
    fn prop_option_shows_what_was_applied(
        inverted in any::<bool>(),
        changes in prop::collection::vec(any::<bool>(), 1..10),
    ) {
        let mut store = MemorySettings::new();
        let mut option = SettingOption::new("flag", "Flag", "");
        if inverted {
            option = option.enabled_by_default();
        }
        for checked in changes {
            let stored = option.apply(&mut store, checked);
            prop_assert_eq!(option.is_checked(&store), checked);
            prop_assert_eq!(stored, store.get("flag").is_some());
            prop_assert_eq!(stored, checked != inverted);
        }
    }
}
