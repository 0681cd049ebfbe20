//! Consecutive-day streak computation.

use chrono::NaiveDate;

/// Length of the run of consecutive calendar days ending at the most recent
/// date in `dates`.
///
/// `dates` may be unsorted and contain duplicates. Returns 0 when empty.
pub fn compute_streak(dates: &[NaiveDate]) -> i32 {
    let mut days: Vec<NaiveDate> = dates.to_vec();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let Some(&latest) = days.first() else {
        return 0;
    };

    let mut streak = 1;
    let mut expected = latest;
    for day in days.into_iter().skip(1) {
        match expected.pred_opt() {
            Some(previous) if previous == day => {
                streak += 1;
                expected = day;
            }
            _ => break,
        }
    }

    streak
}
