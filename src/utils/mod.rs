/*!
# Utilities

Helper structures shared by several algorithms:
- [`UnionFind`] is a disjoint-set forest used to build heaviest-edge trees,
- [`bucket_sort_by_key`] is a stable counting sort for small integer keys.
*/

mod union_find;

use crate::*;

pub use union_find::*;

/// Stable bucket sort of `items` by `key`, where all keys lie in `0..buckets`.
///
/// Runs in `O(items.len() + buckets)` and preserves the relative order of items with equal keys,
/// so sorting by a secondary key first and a primary key second yields a lexicographic order.
/// ** Panics if a key is `>= buckets` **
///
/// # Example
/// ```
/// use steiner_approx::utils::bucket_sort_by_key;
///
/// let items = vec![(2, 'a'), (0, 'b'), (2, 'c'), (1, 'd')];
/// let sorted = bucket_sort_by_key(items, 3, |&(k, _)| k);
/// assert_eq!(sorted, vec![(0, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
/// ```
pub fn bucket_sort_by_key<T, F>(items: Vec<T>, buckets: usize, key: F) -> Vec<T>
where
    F: Fn(&T) -> usize,
{
    let mut offsets = vec![0usize; buckets + 1];
    for item in &items {
        offsets[key(item) + 1] += 1;
    }
    for i in 1..offsets.len() {
        offsets[i] += offsets[i - 1];
    }

    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(items.len()).collect();
    for item in items {
        let k = key(&item);
        slots[offsets[k]] = Some(item);
        offsets[k] += 1;
    }

    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_pass_sort_is_lexicographic() {
        let pairs: Vec<(usize, usize, char)> = vec![
            (3, 1, 'a'),
            (0, 2, 'b'),
            (1, 1, 'c'),
            (0, 1, 'd'),
            (3, 1, 'e'),
            (1, 0, 'f'),
        ];

        let by_second = bucket_sort_by_key(pairs, 4, |p| p.1);
        let sorted = bucket_sort_by_key(by_second, 4, |p| p.0);

        assert_eq!(
            sorted.iter().map(|p| p.2).collect::<String>(),
            "dbfcae"
        );
    }
}
