//! Property tests for the leading-edge debounce gate.
//!
//! 1. The first signal always passes.
//! 2. A later signal passes exactly when the gap to the previous signal
//!    (passed or dropped) is at least the cooldown.
//! 3. passed + dropped equals the number of signals offered.

use flexi_core::debounce::{DebounceGate, Gate};
use proptest::prelude::*;
use std::time::Duration;
use web_time::Instant;

fn gaps_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..400, 1..64)
}

proptest! {
    #[test]
    fn passes_iff_quiet_for_a_full_cooldown(cooldown in 1u64..300, gaps in gaps_strategy()) {
        let mut gate = DebounceGate::from_millis(cooldown);
        let mut now = Instant::now();
        for (i, gap) in gaps.iter().enumerate() {
            now += Duration::from_millis(*gap);
            let expected = if i == 0 || *gap >= cooldown { Gate::Pass } else { Gate::Drop };
            prop_assert_eq!(gate.signal(now), expected, "signal {} after gap {}", i, gap);
        }
        prop_assert_eq!(gate.passed_count() + gate.dropped_count(), gaps.len() as u64);
    }

    #[test]
    fn cancel_always_reopens(cooldown in 1u64..300, gap in 0u64..300) {
        let t0 = Instant::now();
        let mut gate = DebounceGate::from_millis(cooldown);
        gate.signal(t0);
        gate.cancel();
        prop_assert_eq!(gate.signal(t0 + Duration::from_millis(gap)), Gate::Pass);
    }
}
