//! Property tests for the order set.
//!
//! Random operation sequences must never leave two members with the same
//! name, and rejected operations must leave the set untouched.

use finclient_domain::{same_identity, Party, SortCriterion};
use finclient_store::{OrderSet, StoreError};
use finclient_testkit::PartyBuilder;
use proptest::prelude::*;
use proptest::test_runner::Config;

const NAMES: [&str; 6] = ["Ann", "Ben", "Cat", "Dan", "Eve", "Fay"];

fn party_strategy() -> impl Strategy<Value = Party> {
    (0..NAMES.len(), prop_oneof![Just(None), (any::<bool>(), 1_u64..20, 1_u32..30).prop_map(Some)], 0_u32..3)
        .prop_map(|(name, order, phone)| {
            let mut builder = PartyBuilder::new(NAMES[name]).with_phones(&[&format!("9000000{}", phone)]);
            if let Some((buy, qty, price)) = order {
                let side = if buy { "BUY" } else { "SELL" };
                builder = builder.with_order(&format!("{} {} @ ${}", side, qty, price));
            }
            builder.build()
        })
}

#[derive(Debug, Clone)]
enum Op {
    Add(Party),
    Replace(Party, Party),
    Remove(Party),
    ReplaceAll(Vec<Party>),
    Sort(SortCriterion),
    Hide(Party),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => party_strategy().prop_map(Op::Add),
        2 => (party_strategy(), party_strategy()).prop_map(|(a, b)| Op::Replace(a, b)),
        2 => party_strategy().prop_map(Op::Remove),
        1 => proptest::collection::vec(party_strategy(), 0..6).prop_map(Op::ReplaceAll),
        1 => proptest::sample::select(SortCriterion::ALL.to_vec()).prop_map(Op::Sort),
        1 => party_strategy().prop_map(Op::Hide),
    ]
}

fn has_duplicates(parties: &[Party]) -> bool {
    parties
        .iter()
        .enumerate()
        .any(|(i, a)| parties[i + 1..].iter().any(|b| same_identity(a, b)))
}

fn apply(set: &mut OrderSet, op: Op) -> Result<(), StoreError> {
    match op {
        Op::Add(party) => set.add(party),
        Op::Replace(target, replacement) => set.replace(&target, replacement),
        Op::Remove(party) => set.remove(&party).map(|_| ()),
        Op::ReplaceAll(parties) => set.replace_all(parties),
        Op::Sort(criterion) => {
            set.sort_by(criterion);
            Ok(())
        },
        Op::Hide(party) => {
            set.hide_party(&party);
            Ok(())
        },
    }
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn names_stay_unique(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut set = OrderSet::new();
        for op in ops {
            let before: Vec<Party> = set.parties().to_vec();
            if apply(&mut set, op).is_err() {
                prop_assert_eq!(set.parties(), before.as_slice());
            }
            prop_assert!(!has_duplicates(set.parties()));
        }
    }

    #[test]
    fn replace_all_is_all_or_nothing(
        initial in proptest::collection::vec(party_strategy(), 0..6),
        batch in proptest::collection::vec(party_strategy(), 0..8),
    ) {
        let mut set = OrderSet::new();
        for party in initial {
            let _ = set.add(party);
        }
        let before: Vec<Party> = set.parties().to_vec();

        match set.replace_all(batch.clone()) {
            Ok(()) => {
                prop_assert!(!has_duplicates(&batch));
                prop_assert_eq!(set.parties(), batch.as_slice());
            },
            Err(StoreError::DuplicateEntity { .. }) => {
                prop_assert!(has_duplicates(&batch));
                prop_assert_eq!(set.parties(), before.as_slice());
            },
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn sort_is_stable(
        parties in proptest::collection::vec(party_strategy(), 0..6),
        criterion in proptest::sample::select(SortCriterion::ALL.to_vec()),
    ) {
        let mut set = OrderSet::new();
        for party in parties {
            let _ = set.add(party);
        }
        let before: Vec<Party> = set.parties().to_vec();

        set.sort_by(criterion);
        let after = set.parties();

        prop_assert_eq!(after.len(), before.len());
        for pair in after.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.compare(b, criterion).is_le());
            if a.compare(b, criterion).is_eq() {
                let pos = |p: &Party| before.iter().position(|q| same_identity(p, q));
                prop_assert!(pos(a) < pos(b));
            }
        }
    }

    #[test]
    fn removal_needs_exact_value(party in party_strategy(), other in party_strategy()) {
        let mut set = OrderSet::new();
        set.add(party.clone()).unwrap();

        let result = set.remove(&other);
        if party == other {
            prop_assert!(result.is_ok());
            prop_assert!(set.is_empty());
        } else {
            prop_assert!(
                matches!(result, Err(StoreError::EntityNotFound { .. })),
                "expected EntityNotFound"
            );
            prop_assert_eq!(set.len(), 1);
        }
    }

    #[test]
    fn clearing_matches_engine_on_snapshot(parties in proptest::collection::vec(party_strategy(), 0..6)) {
        let mut set = OrderSet::new();
        for party in parties {
            let _ = set.add(party);
        }
        let orders = set.snapshot_orders();
        prop_assert_eq!(orders.len(), set.len());
        prop_assert_eq!(set.clearing_price(), finclient_engine::ClearingEngine::compute(&orders));
    }
}
