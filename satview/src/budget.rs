use orbit_types::prelude::PerformanceTier;

/// The leading records that fit the tier's cap, in their original order
pub fn select<T>(records: &[T], tier: PerformanceTier) -> &[T] {
    match tier.cap() {
        Some(cap) if cap < records.len() => &records[..cap],
        _ => records,
    }
}
