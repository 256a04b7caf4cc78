//! Property tests for project orderings

use std::cmp::Ordering;

use proptest::prelude::*;
use rush_core::config::ProjectRecord;
use rush_core::mutate::{ReviewCategoryOrder, SortOrder, compare_alphabetically, sort_records};

const CATEGORIES: &[&str] = &["production", "tools", "Tools", "experimental", "prototype"];

fn arb_record() -> impl Strategy<Value = ProjectRecord> {
    (
        "(@[a-c]/)?[a-dA-D]{1,4}",
        proptest::option::of(proptest::sample::select(CATEGORIES)),
    )
        .prop_map(|(name, category)| {
            let record = ProjectRecord::new(name.clone(), format!("libs/{name}"));
            match category {
                Some(category) => record.with_review_category(category),
                None => record,
            }
        })
}

fn arb_priorities() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(vec!["production", "tools", "prototype"], 0..=3)
        .prop_map(|list| list.into_iter().map(str::to_string).collect())
}

proptest! {
    #[test]
    fn compare_agrees_with_sort_key(
        a in arb_record(),
        b in arb_record(),
        priorities in arb_priorities(),
    ) {
        let order = ReviewCategoryOrder::new(&priorities);
        prop_assert_eq!(order.compare(&a, &b), order.sort_key(&a).cmp(&order.sort_key(&b)));
    }

    #[test]
    fn compare_is_antisymmetric(
        a in arb_record(),
        b in arb_record(),
        priorities in arb_priorities(),
    ) {
        let order = ReviewCategoryOrder::new(&priorities);
        prop_assert_eq!(order.compare(&a, &b), order.compare(&b, &a).reverse());
    }

    #[test]
    fn review_category_sort_orders_by_key(
        mut records in proptest::collection::vec(arb_record(), 0..12),
        priorities in arb_priorities(),
    ) {
        sort_records(&mut records, SortOrder::ReviewCategory, &priorities);
        let order = ReviewCategoryOrder::new(&priorities);
        for pair in records.windows(2) {
            prop_assert_ne!(order.compare(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn unlisted_categories_precede_listed_ones(
        name_a in "[a-d]{1,3}",
        name_b in "[a-d]{1,3}",
    ) {
        let order = ReviewCategoryOrder::new(&["production", "tools"]);
        let unlisted = ProjectRecord::new(name_a.clone(), name_a).with_review_category("experimental");
        let listed = ProjectRecord::new(name_b.clone(), name_b).with_review_category("production");
        prop_assert_eq!(order.compare(&unlisted, &listed), Ordering::Less);
    }

    #[test]
    fn alphabetical_sort_is_stable_and_case_insensitive(
        mut records in proptest::collection::vec(arb_record(), 0..12),
    ) {
        let original = records.clone();
        sort_records(&mut records, SortOrder::Alphabetically, &[]);

        for pair in records.windows(2) {
            prop_assert!(
                pair[0].package_name.to_uppercase() <= pair[1].package_name.to_uppercase()
            );
        }
        // equal names keep their original relative order
        for pair in records.windows(2) {
            if compare_alphabetically(&pair[0], &pair[1]) == Ordering::Equal {
                let first = original.iter().position(|r| r == &pair[0]);
                let second = original.iter().rposition(|r| r == &pair[1]);
                prop_assert!(first <= second);
            }
        }
    }
}
