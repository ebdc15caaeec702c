// Snake turn order.
//
// Round 0 runs through the coaches as registered, round 1 in reverse, and so
// on, so whoever picks last in one round picks first in the next.

/// Build the full turn sequence for `rounds` rounds.
///
/// The result has `rounds * coaches.len()` entries. `rounds == 0` yields an
/// empty sequence. Coach-list validity (at least two distinct names) is
/// checked by the caller before the session starts.
pub fn snake_order<S: AsRef<str>>(coaches: &[S], rounds: usize) -> Vec<String> {
    let mut order = Vec::with_capacity(coaches.len() * rounds);
    for round in 0..rounds {
        if round % 2 == 0 {
            order.extend(coaches.iter().map(|c| c.as_ref().to_string()));
        } else {
            order.extend(coaches.iter().rev().map(|c| c.as_ref().to_string()));
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("coach_{i}")).collect()
    }

    #[test]
    fn two_coaches_two_rounds() {
        assert_eq!(snake_order(&["A", "B"], 2), vec!["A", "B", "B", "A"]);
    }

    #[test]
    fn three_coaches_three_rounds() {
        assert_eq!(
            snake_order(&["A", "B", "C"], 3),
            vec!["A", "B", "C", "C", "B", "A", "A", "B", "C"]
        );
    }

    #[test]
    fn zero_rounds_is_empty() {
        assert!(snake_order(&["A", "B"], 0).is_empty());
    }

    #[test]
    fn length_and_round_shape_hold_for_many_sizes() {
        for num_coaches in 2..=8 {
            let coaches = names(num_coaches);
            let reversed: Vec<String> = coaches.iter().rev().cloned().collect();
            for rounds in 0..=12 {
                let order = snake_order(&coaches, rounds);
                assert_eq!(order.len(), rounds * num_coaches);

                for (r, chunk) in order.chunks(num_coaches).enumerate() {
                    if r % 2 == 0 {
                        assert_eq!(chunk, coaches.as_slice(), "round {r} should be forward");
                    } else {
                        assert_eq!(chunk, reversed.as_slice(), "round {r} should be reversed");
                    }
                }
            }
        }
    }

    #[test]
    fn round_boundaries_repeat_the_same_coach() {
        let order = snake_order(&names(4), 4);
        assert_eq!(order[3], order[4]);
        assert_eq!(order[7], order[8]);
        assert_eq!(order[11], order[12]);
    }
}
