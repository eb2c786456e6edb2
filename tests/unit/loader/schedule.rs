use std::collections::BTreeSet;

use super::*;

fn assert_partition(s: &LoadSchedule, n: usize) {
    let all: Vec<usize> = s.priority.iter().chain(&s.background).copied().collect();
    let set: BTreeSet<usize> = all.iter().copied().collect();
    assert_eq!(all.len(), n, "duplicates in schedule for n={n}");
    assert_eq!(set, (0..n).collect::<BTreeSet<_>>(), "coverage for n={n}");
}

#[test]
fn small_sequences_hand_traced() {
    assert_eq!(LoadSchedule::bisection(0), LoadSchedule::default());

    let one = LoadSchedule::bisection(1);
    assert_eq!(one.priority, vec![0]);
    assert!(one.background.is_empty());

    // max index 3: d=2 -> 1, d=4 -> floor(3/4)=0 (taken), floor(9/4)=2.
    let four = LoadSchedule::bisection(4);
    assert_eq!(four.priority, vec![0, 3, 1, 2]);
    assert!(four.background.is_empty());

    assert_eq!(LoadSchedule::bisection(5).priority, vec![0, 4, 2, 1, 3]);
}

#[test]
fn hero_sequence_priority_set() {
    let s = LoadSchedule::bisection(218);
    assert_eq!(
        s.priority,
        vec![
            0, 217, 108, 54, 162, 27, 81, 135, 189, 13, 40, 67, 94, 122, 149, 176, 203
        ]
    );
    assert_eq!(s.background.len(), 201);
    assert_eq!(&s.background[..4], &[6, 20, 33, 47]);
    assert_partition(&s, 218);
}

#[test]
fn every_size_partitions_the_range() {
    for n in 0..600 {
        let s = LoadSchedule::bisection(n);
        assert_partition(&s, n);
        if n > 0 {
            assert_eq!(s.priority[0], 0);
            assert!(s.is_priority(n - 1));
        }
    }
}

#[test]
fn background_levels_stop_once_quotient_drops_below_one() {
    // max index 9: the d=32 level adds nothing new and the loop stops there.
    let s = LoadSchedule::bisection(10);
    assert_eq!(s.priority, vec![0, 9, 4, 2, 6, 1, 3, 5, 7, 8]);
    assert!(s.background.is_empty());

    let big = LoadSchedule::bisection(2000);
    assert_eq!(big.background.last(), Some(&1998));
    assert_partition(&big, 2000);
}
