//! Interval merging and free-gap analysis.
//!
//! Intervals are half-open `[start, end)` pairs of minutes since midnight.
//! Overlapping or touching intervals merge, so back-to-back sessions leave
//! no gap between them.

/// Sorts by start and merges intervals that overlap or touch.
pub fn merge<I>(intervals: I) -> Vec<(u16, u16)>
where
    I: IntoIterator<Item = (u16, u16)>,
{
    let mut sorted: Vec<(u16, u16)> = intervals.into_iter().collect();
    sorted.sort_unstable_by_key(|&(start, _)| start);

    let mut merged: Vec<(u16, u16)> = Vec::with_capacity(sorted.len());
    for (start, end) in sorted {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Free intervals between the merged input intervals.
///
/// With a `window`, gaps are taken over the whole window and clipped to it,
/// including the lead-in before the first interval and the tail after the
/// last. Without one, gaps are taken between the first start and the last
/// end, so an empty input has no gaps.
pub fn gap_intervals<I>(intervals: I, window: Option<(u16, u16)>) -> Vec<(u16, u16)>
where
    I: IntoIterator<Item = (u16, u16)>,
{
    let merged = merge(intervals);
    let (lower, upper) = match window {
        Some(bounds) => bounds,
        None => match (merged.first(), merged.last()) {
            (Some(first), Some(last)) => (first.0, last.1),
            _ => return Vec::new(),
        },
    };

    let mut gaps = Vec::new();
    let mut current = lower;
    for &(start, end) in &merged {
        if start > current {
            let gap_end = start.min(upper);
            if gap_end > current {
                gaps.push((current, gap_end));
            }
        }
        current = current.max(end);
    }
    if current < upper {
        gaps.push((current, upper));
    }
    gaps
}

/// Durations of [`gap_intervals`].
pub fn gaps<I>(intervals: I, window: Option<(u16, u16)>) -> Vec<u16>
where
    I: IntoIterator<Item = (u16, u16)>,
{
    gap_intervals(intervals, window)
        .into_iter()
        .map(|(start, end)| end - start)
        .collect()
}

/// Longest free interval inside `window`, or the window's full length when
/// nothing falls inside it.
pub fn max_gap<I>(intervals: I, window: (u16, u16)) -> u16
where
    I: IntoIterator<Item = (u16, u16)>,
{
    gaps(intervals, Some(window))
        .into_iter()
        .max()
        .unwrap_or(window.1 - window.0)
}
