//! Property tests for breakpoint resolution.
//!
//! 1. Resolved ranges are sorted, contiguous and non-overlapping.
//! 2. Their union is `[0, ∞)`: the first starts at 0, the last is unbounded.
//! 3. Every positive width maps to exactly one rule, and that rule contains it.
//! 4. Resolution does not depend on the input order.

use flexi_layout::breakpoint::{LayoutRuleSpec, active_for, resolve};
use proptest::prelude::*;

/// A base rule plus distinct positive breakpoints, shuffled.
fn specs_strategy() -> impl Strategy<Value = Vec<LayoutRuleSpec>> {
    (
        prop::collection::btree_set(1u32..5000, 0..12),
        1u32..6,
    )
        .prop_flat_map(|(widths, base_group)| {
            let mut specs = vec![LayoutRuleSpec::base().group(base_group)];
            for (i, w) in widths.into_iter().enumerate() {
                specs.push(LayoutRuleSpec::at_width(w).group(1 + (i as u32 % 4)));
            }
            Just(specs).prop_shuffle()
        })
}

proptest! {
    #[test]
    fn ranges_are_contiguous_and_cover_everything(specs in specs_strategy()) {
        let rules = resolve(&specs).unwrap();
        prop_assert_eq!(rules.len(), specs.len());
        prop_assert_eq!(rules[0].from_width, 0);
        prop_assert_eq!(rules.last().unwrap().to_width, None);
        for pair in rules.windows(2) {
            let to = pair[0].to_width.unwrap();
            prop_assert!(pair[0].from_width <= to);
            prop_assert_eq!(to + 1, pair[1].from_width);
        }
    }

    #[test]
    fn every_width_has_exactly_one_rule(specs in specs_strategy(), width in 1u32..10_000) {
        let rules = resolve(&specs).unwrap();
        let containing = rules.iter().filter(|r| r.contains(width)).count();
        prop_assert_eq!(containing, 1);
        let (index, rule) = active_for(width, &rules).unwrap();
        prop_assert!(rule.contains(width));
        prop_assert_eq!(rules[index], *rule);
    }

    #[test]
    fn input_order_does_not_matter(specs in specs_strategy()) {
        let mut reversed = specs.clone();
        reversed.reverse();
        prop_assert_eq!(resolve(&specs).unwrap(), resolve(&reversed).unwrap());
    }
}
