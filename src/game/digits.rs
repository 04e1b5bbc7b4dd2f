/*!
Digit composition: scores to the eight-position display buffer.

Layout (position 0 is the rightmost digit):

```text
position:  7        6         5  4  3        2         1  0
content:   P1 1000s P1 100s   0  0  P2 1000s P2 100s   0  0
```

Scores move in steps of 100, so the tens and units positions stay blank (0).
The final buffer additionally carries the win marker (see `compose_final`).
*/

use crate::peripherals::DIGIT_COUNT;

pub const P2_HUNDREDS: usize = 2;
pub const P2_THOUSANDS: usize = 3;
pub const P1_HUNDREDS: usize = 6;
pub const P1_THOUSANDS: usize = 7;

/// Largest value a single display position can hold.
const DIGIT_MAX: u32 = 0xF;

#[inline]
fn hundreds(score: u32) -> u8 {
    ((score / 100) % 10) as u8
}

#[inline]
fn thousands(score: u32) -> u8 {
    (score / 1000).min(DIGIT_MAX) as u8
}

/// Display buffer for a match in progress.
pub fn compose(player_one: u32, player_two: u32) -> [u8; DIGIT_COUNT] {
    let mut digits = [0u8; DIGIT_COUNT];
    digits[P2_HUNDREDS] = hundreds(player_two);
    digits[P2_THOUSANDS] = thousands(player_two);
    digits[P1_HUNDREDS] = hundreds(player_one);
    digits[P1_THOUSANDS] = thousands(player_one);
    digits
}

/// Display buffer once the match is over.
///
/// If player one's score is strictly greater, player one's thousands position
/// is forced to 1; in every other case (including a tie) player two's is.
pub fn compose_final(player_one: u32, player_two: u32) -> [u8; DIGIT_COUNT] {
    let mut digits = compose(player_one, player_two);
    if player_one > player_two {
        digits[P1_THOUSANDS] = 1;
    } else {
        digits[P2_THOUSANDS] = 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_point_layouts() {
        assert_eq!(compose(100, 0), [0, 0, 0, 0, 0, 0, 1, 0]);
        assert_eq!(compose(0, 100), [0, 0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(compose(0, 0), [0; DIGIT_COUNT]);
    }

    #[test]
    fn thousands_roll_over() {
        assert_eq!(compose(1000, 900), [0, 0, 9, 0, 0, 0, 0, 1]);
        assert_eq!(compose(300, 1000), [0, 0, 0, 1, 0, 0, 3, 0]);
    }

    #[test]
    fn final_marker_follows_strict_comparison() {
        let d = compose_final(1000, 300);
        assert_eq!(d[P1_THOUSANDS], 1);
        assert_eq!(d[P2_THOUSANDS], 0);

        let d = compose_final(400, 1000);
        assert_eq!(d[P1_THOUSANDS], 0);
        assert_eq!(d[P2_THOUSANDS], 1);

        // A tie falls through to player two's side.
        let d = compose_final(500, 500);
        assert_eq!(d[P1_THOUSANDS], 0);
        assert_eq!(d[P2_THOUSANDS], 1);
    }

    proptest! {
        #[test]
        fn compose_is_pure_and_blanks_unused_positions(p1 in 0u32..=50, p2 in 0u32..=50) {
            let (p1, p2) = (p1 * 100, p2 * 100);
            let a = compose(p1, p2);
            prop_assert_eq!(a, compose(p1, p2));
            for pos in [0usize, 1, 4, 5] {
                prop_assert_eq!(a[pos], 0);
            }
            prop_assert!(a.iter().all(|&d| d <= 15));
            prop_assert_eq!(a[P1_HUNDREDS] as u32, (p1 / 100) % 10);
            prop_assert_eq!(a[P2_HUNDREDS] as u32, (p2 / 100) % 10);
        }

        #[test]
        fn final_sets_exactly_one_marker_for_reachable_endings(loser in 0u32..=9, p1_wins in any::<bool>()) {
            let (p1, p2) = if p1_wins { (1000, loser * 100) } else { (loser * 100, 1000) };
            let d = compose_final(p1, p2);
            let marked = [d[P1_THOUSANDS], d[P2_THOUSANDS]].iter().filter(|&&v| v == 1).count();
            prop_assert_eq!(marked, 1);
        }
    }
}
