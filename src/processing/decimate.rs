//! Peak-preserving display decimation
//!
//! Charts cannot usefully draw hundreds of thousands of points, but naive
//! stride decimation drops exactly the vibration peaks the analysis is
//! about. This decimator buckets the series and keeps, per bucket, every
//! sample that is a min or max of some channel — so the rendered extrema
//! equal the true extrema on every channel.

use crate::types::{Channel, ProcessedDataPoint};

/// Default display budget, matching the charting layer.
pub const DISPLAY_TARGET_POINTS: usize = 8000;

/// Downsample `data` to roughly `target` points, preserving per-channel
/// extrema. Input shorter than `target` is returned unchanged.
pub fn decimate(data: &[ProcessedDataPoint], target: usize) -> Vec<ProcessedDataPoint> {
    if target == 0 || data.len() <= target {
        return data.to_vec();
    }

    // Each bucket contributes up to 2 points per channel; budgeting two
    // slots per bucket keeps the output near the target in practice.
    let buckets = (target / 2).max(1);
    let bucket_len = data.len().div_ceil(buckets);

    let mut output = Vec::with_capacity(target);
    for bucket in data.chunks(bucket_len) {
        let mut keep: Vec<usize> = Vec::with_capacity(Channel::ALL.len() * 2);
        for channel in Channel::ALL {
            let mut min_idx = 0;
            let mut max_idx = 0;
            for (i, p) in bucket.iter().enumerate() {
                let v = channel.value(p);
                if v < channel.value(&bucket[min_idx]) {
                    min_idx = i;
                }
                if v > channel.value(&bucket[max_idx]) {
                    max_idx = i;
                }
            }
            keep.push(min_idx);
            keep.push(max_idx);
        }
        keep.sort_unstable();
        keep.dedup();
        output.extend(keep.into_iter().map(|i| bucket[i]));
    }
    output
}
