use rand::seq::SliceRandom;
use rand::Rng;

/// Pick what to show: optionally shuffle the whole sequence, then keep at
/// most `display_limit` items.
pub fn select_entries<T, R>(
    mut entries: Vec<T>,
    display_limit: usize,
    randomize: bool,
    rng: &mut R,
) -> Vec<T>
where
    R: Rng + ?Sized,
{
    if randomize {
        entries.shuffle(rng);
    }
    entries.truncate(display_limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_truncates_to_limit() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in 0..6 {
            for limit in 0..8 {
                let items: Vec<usize> = (0..len).collect();
                let selected = select_entries(items.clone(), limit, false, &mut rng);
                assert_eq!(selected.len(), limit.min(len));
                assert_eq!(selected, items[..limit.min(len)].to_vec());
            }
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in [0usize, 1, 2, 10, 50] {
            let items: Vec<usize> = (0..len).collect();
            let mut shuffled = select_entries(items.clone(), usize::MAX, true, &mut rng);
            assert_eq!(shuffled.len(), len);
            shuffled.sort_unstable();
            assert_eq!(shuffled, items);
        }
    }

    #[test]
    fn test_shuffle_happens_before_truncation() {
        let items: Vec<usize> = (0..100).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_entries(items, 5, true, &mut rng);
        assert_eq!(picked.len(), 5);
        // With 100 items it is practically impossible to land on the head.
        assert_ne!(picked, vec![0, 1, 2, 3, 4]);
        assert!(picked.iter().any(|&i| i >= 5));
    }
}
