use std::cmp::Ordering;

/// Stable merge sort.
///
/// Unlike `slice::sort_by`, this never panics when `compare` is not a total order. Cell
/// comparisons mix numeric and textual rules and are not guaranteed to be transitive.
pub fn sort_by<T, F>(items: &mut [T], mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    let mut scratch = items.to_vec();
    split_merge(&mut scratch, items, &mut compare);
}

/// Sort `dst` using `src` as scratch space. Both slices hold the same items on entry.
fn split_merge<T, F>(src: &mut [T], dst: &mut [T], compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = dst.len();
    if len < 2 {
        return;
    }
    let mid = len / 2;
    split_merge(&mut dst[..mid], &mut src[..mid], compare);
    split_merge(&mut dst[mid..], &mut src[mid..], compare);
    merge(&src[..mid], &src[mid..], dst, compare);
}

fn merge<T, F>(left: &[T], right: &[T], out: &mut [T], compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        let take_left = j >= right.len()
            || (i < left.len() && compare(&left[i], &right[j]) != Ordering::Greater);
        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}
