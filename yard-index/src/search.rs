use std::cmp::Ordering;

// NOTE: callers keep `items` sorted by `compare`

// NOTE: lands after every equal element, equal items keep insertion order
pub(crate) fn insertion_point<T, F>(items: &[T], item: &T, compare: F) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    let (first, last) = match (items.first(), items.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0,
    };

    if compare(item, first) == Ordering::Less {
        return 0;
    }

    if compare(item, last) != Ordering::Less {
        return items.len();
    }

    // item sorts at or after items[a] and strictly before items[b]
    let (mut a, mut b) = (0, items.len() - 1);
    while b > a + 1 {
        let c = a + (b - a) / 2;
        if compare(item, &items[c]) == Ordering::Less {
            b = c;
        } else {
            a = c;
        }
    }

    b
}

pub(crate) fn lower_bound<T, K, F>(items: &[T], key: &K, compare: F) -> usize
where
    K: ?Sized,
    F: Fn(&T, &K) -> Ordering,
{
    let (first, last) = match (items.first(), items.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0,
    };

    if compare(first, key) != Ordering::Less {
        return 0;
    }

    if compare(last, key) == Ordering::Less {
        return items.len();
    }

    // items[a] sorts before key, items[b] does not
    let (mut a, mut b) = (0, items.len() - 1);
    while b > a + 1 {
        let c = a + (b - a) / 2;
        if compare(&items[c], key) == Ordering::Less {
            a = c;
        } else {
            b = c;
        }
    }

    b
}
