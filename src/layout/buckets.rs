/// Distinct volumes in ascending order.
pub fn distinct_sorted(volumes: &[f64]) -> Vec<f64> {
    let mut values = volumes.to_vec();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// Reduce the distinct volumes to at most `target` representative values.
///
/// Repeatedly replaces the closest adjacent pair with its mean. Each merge
/// removes exactly one value, so this runs `distinct - target` merges at most.
/// A target of 0 is treated as 1.
pub fn compute_buckets(volumes: &[f64], target: usize) -> Vec<f64> {
    let target = target.max(1);
    let mut values = distinct_sorted(volumes);
    let distinct = values.len();

    while values.len() > target {
        merge_closest_pair(&mut values);
    }

    tracing::debug!(
        "Size buckets: {} distinct volumes reduced to {} ({} merges)",
        distinct,
        values.len(),
        distinct - values.len()
    );
    values
}

/// Replace the adjacent pair with the smallest gap by its average.
/// Ties go to the lowest index.
fn merge_closest_pair(values: &mut Vec<f64>) {
    if values.len() < 2 {
        return;
    }

    let mut best = 0;
    let mut min_gap = f64::INFINITY;
    for (i, pair) in values.windows(2).enumerate() {
        let gap = pair[1] - pair[0];
        if gap < min_gap {
            min_gap = gap;
            best = i;
        }
    }

    let mean = (values[best] + values[best + 1]) / 2.0;
    values.splice(best..best + 2, [mean]);
}

/// 0-based index of the bucket closest to `volume` (first one on ties).
/// An empty bucket set maps everything to 0.
pub fn size_class(volume: f64, buckets: &[f64]) -> usize {
    let mut out = 0;
    let mut minimum = f64::INFINITY;
    for (i, &b) in buckets.iter().enumerate() {
        let diff = (volume - b).abs();
        if diff < minimum {
            minimum = diff;
            out = i;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bucket_collapses_to_iterated_midpoint() {
        // 10,20,30: tie on gap 10 merges (10,20) -> 15, then (15,30) -> 22.5
        let b = compute_buckets(&[10.0, 20.0, 30.0], 1);
        assert_eq!(b, vec![22.5]);
        for v in [10.0, 20.0, 30.0] {
            assert_eq!(size_class(v, &b), 0);
        }
    }

    #[test]
    fn target_above_distinct_count_keeps_values() {
        let b = compute_buckets(&[5.0, 1.0, 5.0, 3.0], 6);
        assert_eq!(b, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn closest_pair_merges_first() {
        let b = compute_buckets(&[1.0, 2.0, 10.0, 20.0], 3);
        assert_eq!(b, vec![1.5, 10.0, 20.0]);
    }

    #[test]
    fn tie_breaks_on_lowest_index() {
        let b = compute_buckets(&[0.0, 4.0, 8.0, 12.0], 3);
        assert_eq!(b, vec![2.0, 8.0, 12.0]);
    }

    #[test]
    fn class_ties_pick_first_bucket() {
        assert_eq!(size_class(15.0, &[10.0, 20.0]), 0);
        assert_eq!(size_class(16.0, &[10.0, 20.0]), 1);
        assert_eq!(size_class(99.0, &[]), 0);
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(compute_buckets(&[], 3).is_empty());
    }
}
