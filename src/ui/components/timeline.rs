use chrono::NaiveDate;

/// Earliest start and latest finish across `ranges`
pub fn window<I>(ranges: I) -> Option<(NaiveDate, NaiveDate)>
where
    I: IntoIterator<Item = (NaiveDate, NaiveDate)>,
{
    ranges.into_iter().fold(None, |acc, (start, end)| match acc {
        None => Some((start, end)),
        Some((lo, hi)) => Some((lo.min(start), hi.max(end))),
    })
}

/// A text Gantt bar of `width` cells for `start..end` within `window`
pub fn gantt_bar(
    start: NaiveDate,
    end: NaiveDate,
    window: (NaiveDate, NaiveDate),
    width: usize,
) -> String {
    let (lo, hi) = window;
    let span = (hi - lo).num_days().max(1) as f64;
    let cell = |date: NaiveDate| -> usize {
        let offset = (date - lo).num_days().clamp(0, span as i64) as f64;
        ((offset / span) * width as f64).round() as usize
    };

    let from = cell(start).min(width.saturating_sub(1));
    let to = cell(end).max(from + 1).min(width);

    let mut bar = String::with_capacity(width * 3);
    for i in 0..width {
        bar.push(if i >= from && i < to { '█' } else { '·' });
    }
    bar
}
