/// Default share of the group's top working volume below which an earlier
/// set counts as a warm-up.
pub const DEFAULT_WORK_THRESHOLD: f64 = 0.6;

/// Flag warm-up sets within one (calendar day, exercise) group.
///
/// `work` holds weight × reps per set in original order. Only sets strictly
/// before the first occurrence of the maximum can be warm-ups: lighter sets
/// after the peak are deliberate (drop sets, burnouts) and are never
/// flagged. A set before the peak is flagged when its work is strictly
/// below `threshold × max`. A group with no recorded work at all is left
/// unflagged, since nothing distinguishes ramp-up from working sets.
pub fn detect_warmups(work: &[f64], threshold: f64) -> Vec<bool> {
    let mut flags = vec![false; work.len()];

    let mut top = 0.0;
    let mut top_index = 0;
    for (i, &w) in work.iter().enumerate() {
        if w > top {
            top = w;
            top_index = i;
        }
    }
    if top == 0.0 {
        return flags;
    }

    for (i, &w) in work.iter().enumerate().take(top_index) {
        if w < top * threshold {
            flags[i] = true;
        }
    }

    flags
}
