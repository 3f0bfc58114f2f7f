/// Returns true once `predicate` has held for `required_run` items in a row.
///
/// Only sequence position counts: the scan keeps a run counter that grows on
/// every match and resets on every miss, so gaps between record dates neither
/// break nor extend a streak.
///
/// # Examples
///
/// ```
/// use vitalwatch_analysis::window::has_consecutive_condition;
///
/// let flags = [true, false, true, true, true];
/// assert!(has_consecutive_condition(&flags, 3, |f| *f));
///
/// let flags = [true, true, false, true, true];
/// assert!(!has_consecutive_condition(&flags, 3, |f| *f));
/// ```
pub fn has_consecutive_condition<T, F>(items: &[T], required_run: usize, mut predicate: F) -> bool
where
    F: FnMut(&T) -> bool,
{
    let mut run = 0usize;
    for item in items {
        if predicate(item) {
            run += 1;
            if run >= required_run {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Length of the longest run of consecutive items matching `predicate`.
pub fn longest_run<T, F>(items: &[T], mut predicate: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let mut longest = 0usize;
    let mut run = 0usize;
    for item in items {
        if predicate(item) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}
