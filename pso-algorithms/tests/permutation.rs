use proptest::prelude::*;
use pso_algorithms::travelling_salesman::swap_swarm::SwapSequence;

fn tour(max_len: usize) -> impl Strategy<Value = Vec<usize>> {
    (1..max_len).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
}

fn tour_pair(max_len: usize) -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    (1..max_len).prop_flat_map(|n| {
        let identity = (0..n).collect::<Vec<_>>();
        (Just(identity.clone()).prop_shuffle(), Just(identity).prop_shuffle())
    })
}

#[test]
fn test_subtract_records_swaps_left_to_right() {
    let s = SwapSequence::between(&[0, 1, 2, 3], &[3, 2, 1, 0]);
    assert_eq!(s.swaps(), &[(0, 3), (1, 2)]);

    let s = SwapSequence::between(&[1, 2, 0], &[0, 1, 2]);
    assert_eq!(s.swaps(), &[(0, 2), (1, 2)]);
    assert_eq!(s.apply(&[1, 2, 0]), vec![0, 1, 2]);
}

#[test]
fn test_add_concatenates_in_order() {
    let a = SwapSequence::from_swaps(vec![(0, 1)]);
    let b = SwapSequence::from_swaps(vec![(1, 2), (0, 2)]);
    let sum = a.clone() + b.clone();
    assert_eq!(sum.swaps(), &[(0, 1), (1, 2), (0, 2)]);
    assert_eq!(a.then(b), sum);
    assert_eq!(sum.apply(&[0, 1, 2]), vec![0, 2, 1]);
}

#[test]
fn test_scale_truncates() {
    let s = SwapSequence::from_swaps(vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
    assert_eq!(s.scale(0.5).swaps(), &[(0, 1), (1, 2)]);
    assert_eq!(s.scale(0.3).swaps(), &[(0, 1)]);
    assert_eq!(s.scale(0.4).swaps(), &[(0, 1), (1, 2)]);
    assert_eq!(s.scale(0.1), SwapSequence::new());
    assert_eq!(s.scale(2.05), s);
    assert_eq!(s.scale(-1.0), SwapSequence::new());
    assert_eq!(s.scale(f64::NAN), SwapSequence::new());
    assert_eq!(0.75 * &s, s.scale(0.75));
}

#[test]
fn test_scale_rounds_halves_to_even() {
    let one = SwapSequence::from_swaps(vec![(0, 1)]);
    assert!(one.scale(0.5).is_empty());
    let three = SwapSequence::from_swaps(vec![(0, 1), (1, 2), (2, 3)]);
    assert_eq!(three.scale(0.5).len(), 2);
}

#[test]
fn test_apply_empty_returns_copy() {
    let p = vec![2, 0, 1];
    let moved = SwapSequence::new().apply(&p);
    assert_eq!(moved, p);
}

#[test]
#[should_panic]
fn test_subtract_panics_on_foreign_city() {
    let _ = SwapSequence::between(&[0, 1, 2], &[0, 1, 3]);
}

#[test]
#[should_panic]
fn test_subtract_panics_on_length_mismatch() {
    let _ = SwapSequence::between(&[0, 1, 2], &[0, 1]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_subtract_self_is_empty(p in tour(40)) {
        let s = SwapSequence::between(&p, &p);
        prop_assert!(s.is_empty());
        prop_assert_eq!(s.apply(&p), p);
    }

    #[test]
    fn prop_apply_subtract_round_trips((p1, p2) in tour_pair(40)) {
        let s = SwapSequence::between(&p1, &p2);
        prop_assert!(s.len() < p1.len());
        prop_assert!(s.swaps().iter().all(|&(i, j)| i != j));
        prop_assert_eq!(s.apply(&p1), p2);
    }

    #[test]
    fn prop_scale_bounds((p1, p2) in tour_pair(40), k in 0.0..3.0f64) {
        let s = SwapSequence::between(&p1, &p2);
        prop_assert!(s.scale(0.0).is_empty());
        prop_assert_eq!(s.scale(1.0), s.clone());
        let scaled = s.scale(k);
        prop_assert!(scaled.len() <= s.len());
        prop_assert_eq!(scaled.swaps(), &s.swaps()[..scaled.len()]);
    }

    #[test]
    fn prop_any_velocity_keeps_a_permutation((p1, p2) in tour_pair(30), (q1, q2) in tour_pair(30), k in 0.0..2.1f64) {
        let n = p1.len().min(q1.len());
        let restrict = |t: &[usize]| t.iter().copied().filter(|&c| c < n).collect::<Vec<_>>();
        let (p1, p2, q1, q2) = (restrict(&p1), restrict(&p2), restrict(&q1), restrict(&q2));
        let velocity = k * &SwapSequence::between(&p1, &p2) + SwapSequence::between(&q1, &q2);
        let mut moved = velocity.apply(&p1);
        moved.sort_unstable();
        prop_assert_eq!(moved, (0..n).collect::<Vec<_>>());
    }
}
