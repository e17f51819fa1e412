use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeSet;

fn validate_trie(t: &DlbTrie) {
    let issues = t.verify_integrity();
    assert!(issues.is_empty(), "integrity violations: {issues:?}");
}

/// Words the model holds that start with `prefix`, in order.
fn model_predictions(m: &BTreeSet<String>, prefix: &str) -> Vec<String> {
    m.range(prefix.to_owned()..)
        .take_while(|w| w.starts_with(prefix))
        .cloned()
        .collect()
}

fn word_strategy() -> impl Strategy<Value = String> {
    // A tiny alphabet keeps shared prefixes (and thus pruning) frequent.
    "[abc]{1,5}"
}

fn letter_strategy() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['a', 'b', 'c', 'd'])
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 4)]
    Add(#[proptest(strategy = "word_strategy()")] String),
    #[proptest(weight = 2)]
    Delete(#[proptest(strategy = "word_strategy()")] String),
    #[proptest(weight = 4)]
    Advance(#[proptest(strategy = "letter_strategy()")] char),
    #[proptest(weight = 2)]
    Retreat,
    #[proptest(weight = 1)]
    Reset,
    #[proptest(weight = 1)]
    AddPrefix,
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=300)) {
        let mut ac = AutoComplete::new();
        let mut m: BTreeSet<String> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Add(word) => {
                    prop_assert_eq!(ac.add(&word), Ok(m.insert(word.clone())));
                }
                Op::Delete(word) => {
                    prop_assert_eq!(ac.delete(&word), m.remove(&word));
                }
                Op::Advance(c) => {
                    let prefix = format!("{}{c}", ac.prefix());
                    let expected = !ac.cursor().is_stuck(ac.trie())
                        && m.iter().any(|w| w.starts_with(&prefix));
                    prop_assert_eq!(ac.advance(c), expected);
                }
                Op::Retreat => {
                    let was_empty = ac.prefix().is_empty();
                    prop_assert_eq!(ac.retreat().is_err(), was_empty);
                }
                Op::Reset => ac.reset(),
                Op::AddPrefix => {
                    let prefix = ac.prefix().to_owned();
                    match ac.add_prefix() {
                        Ok(added) => prop_assert_eq!(added, m.insert(prefix)),
                        Err(err) => {
                            prop_assert!(prefix.is_empty());
                            prop_assert_eq!(err, Error::InvalidState("running prefix is empty"));
                        }
                    }
                }
            }

            prop_assert_eq!(ac.len(), m.len());

            let prefix = ac.prefix().to_owned();
            if ac.cursor().is_stuck(ac.trie()) || ac.trie().root().is_none() {
                prop_assert_eq!(ac.number_of_predictions(), 0);
                prop_assert_eq!(ac.retrieve_predictions(), None);
            } else {
                let expected = model_predictions(&m, &prefix);
                prop_assert_eq!(ac.number_of_predictions(), expected.len());
                prop_assert_eq!(ac.retrieve_prediction(), expected.first().cloned());
                prop_assert_eq!(ac.is_word(), m.contains(&prefix));
                prop_assert_eq!(ac.retrieve_predictions(), Some(expected));
            }
        }

        validate_trie(ac.trie());
        let got: Vec<String> = ac.trie().iter().collect();
        let expected: Vec<String> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_miss_then_retreat_restores_cursor(
        words in prop::collection::vec(word_strategy(), 1..20),
        path in "[abc]{0,4}",
        misses in 1usize..6,
    ) {
        let mut t = DlbTrie::new();
        for w in &words {
            t.add(w).unwrap();
        }
        let mut c = PrefixCursor::new();
        for ch in path.chars() {
            c.advance(&t, ch);
        }
        let position = c.position(&t);
        let prefix = c.prefix().to_owned();
        let stuck = c.miss_offset(&t);

        // 'z' never occurs in a word.
        for _ in 0..misses {
            prop_assert!(!c.advance(&t, 'z'));
        }
        prop_assert_eq!(c.miss_offset(&t), stuck + misses);
        for _ in 0..misses {
            c.retreat(&t).unwrap();
        }

        prop_assert_eq!(c.position(&t), position);
        prop_assert_eq!(c.prefix(), prefix.as_str());
        prop_assert_eq!(c.miss_offset(&t), stuck);
    }

    #[test]
    fn prop_predictions_strictly_ascending(
        words in prop::collection::vec("[a-e]{1,6}", 1..50),
        prefix in "[a-e]{0,2}",
    ) {
        let mut t = DlbTrie::new();
        for w in &words {
            t.add(w).unwrap();
        }
        let mut c = PrefixCursor::new();
        for ch in prefix.chars() {
            c.advance(&t, ch);
        }
        if let Some(found) = c.retrieve_all_predictions(&t) {
            prop_assert!(found.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(found.len(), c.number_of_predictions(&t));
            prop_assert!(found.iter().all(|w| w.starts_with(&prefix)));
        }
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

const SMALL_SET: [&str; 6] = ["a", "b", "ab", "abc", "ac", "ba"];

#[test]
fn exhaustive_insert_order_small_set() {
    let expected: Vec<String> = {
        let mut v: Vec<String> = SMALL_SET.iter().map(|w| (*w).to_owned()).collect();
        v.sort();
        v
    };

    for_each_permutation(&SMALL_SET, |perm| {
        let mut t = DlbTrie::new();
        for w in perm {
            assert_eq!(t.add(w), Ok(true));
        }
        validate_trie(&t);
        assert_eq!(t.iter().collect::<Vec<_>>(), expected);
    });
}

#[test]
fn exhaustive_delete_order_small_set() {
    let mut base = DlbTrie::new();
    for w in SMALL_SET {
        base.add(w).unwrap();
    }

    for_each_permutation(&SMALL_SET, |perm| {
        let mut t = base.clone();
        let mut remaining = SMALL_SET.len();
        for w in perm {
            assert!(t.delete(w));
            assert!(!t.delete(w));
            remaining -= 1;
            assert_eq!(t.len(), remaining);
            validate_trie(&t);
        }
        assert!(t.is_empty());
        assert_eq!(t.node_count(), 1);
    });
}
