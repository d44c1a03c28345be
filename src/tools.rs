use itertools::{EitherOrBoth, Itertools};

/// Returns whether two sorted slices share an element.
///
/// Stops at the first common element. When one side is much shorter the
/// longer side is probed by binary search instead of a linear merge.
pub fn intersects<T: Ord>(a: &[T], b: &[T]) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return false;
    }
    if short.len() * 16 < long.len() {
        let mut rest = long;
        for x in short {
            match rest.binary_search(x) {
                Ok(_) => return true,
                Err(idx) => rest = &rest[idx..],
            }
            if rest.is_empty() {
                return false;
            }
        }
        false
    } else {
        short
            .iter()
            .merge_join_by(long, |x, y| x.cmp(y))
            .any(|x| matches!(x, EitherOrBoth::Both(..)))
    }
}

/// Returns whether `x` is in the sorted slice.
#[inline]
pub fn contains<T: Ord>(sorted: &[T], x: &T) -> bool {
    sorted.binary_search(x).is_ok()
}

/// Merges sorted slices into one sorted slice without duplicates.
pub fn sorted_union<'a, T, I>(slices: I) -> Box<[T]>
where
    T: 'a + Ord + Copy,
    I: IntoIterator<Item = &'a [T]>,
{
    slices
        .into_iter()
        .map(|s| s.iter().copied())
        .kmerge()
        .dedup()
        .collect()
}
