//! Week-over-week keyword momentum: bucket counting over two adjacent
//! windows and growth ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use trendscout_core::{Candidate, GrowthRecord, KeywordBucket, SortMode};

/// Compares keyword-bucket occurrence counts between the current and the
/// previous window and returns ranked [`GrowthRecord`]s.
///
/// A candidate belongs to a bucket when its title or description contains
/// any of the bucket's synonym tokens; it may hit several buckets but
/// counts at most once per bucket. Buckets silent in both windows are not
/// reported at all.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
pub fn analyze(
    current: &[Candidate],
    previous: &[Candidate],
    buckets: &[KeywordBucket],
    sort: SortMode,
) -> Vec<GrowthRecord> {
    let current_hits = bucket_members(current, buckets);
    let previous_hits = bucket_members(previous, buckets);

    let mut records: Vec<GrowthRecord> = Vec::new();
    for bucket in buckets {
        let members = current_hits.get(bucket.name.as_str());
        let cur = members.map_or(0, |m| m.len()) as u64;
        let prev = previous_hits
            .get(bucket.name.as_str())
            .map_or(0, |m| m.len()) as u64;

        if cur == 0 && prev == 0 {
            continue;
        }

        let delta = cur as i64 - prev as i64;
        // previous == 0 with a positive current is the NEW case; no
        // percentage is computable there.
        let change_fraction = if prev == 0 {
            None
        } else {
            Some((cur as f64 - prev as f64) / prev as f64)
        };
        let representative = members
            .and_then(|m| m.iter().max_by_key(|c| c.views))
            .map(|c| (*c).clone());

        records.push(GrowthRecord {
            bucket: bucket.name.clone(),
            current: cur,
            previous: prev,
            delta,
            change_fraction,
            representative,
        });
    }

    rank(&mut records, sort);
    records
}

/// Collects each bucket's members; a candidate appears at most once per
/// bucket regardless of how many synonyms match.
pub(crate) fn bucket_members<'a, 'b>(
    candidates: &'a [Candidate],
    buckets: &'b [KeywordBucket],
) -> HashMap<&'b str, Vec<&'a Candidate>> {
    let mut members: HashMap<&'b str, Vec<&'a Candidate>> = HashMap::new();

    for candidate in candidates {
        let text = format!("{} {}", candidate.title, candidate.description).to_lowercase();
        for bucket in buckets {
            let hit = bucket
                .synonyms
                .iter()
                .any(|syn| text.contains(&syn.to_lowercase()));
            if hit {
                members
                    .entry(bucket.name.as_str())
                    .or_default()
                    .push(candidate);
            }
        }
    }

    members
}

fn rank(records: &mut [GrowthRecord], sort: SortMode) {
    match sort {
        SortMode::Percent => {
            records.sort_by(|a, b| {
                b.is_new()
                    .cmp(&a.is_new())
                    .then_with(|| cmp_f64(fraction_rank(b), fraction_rank(a)))
                    .then_with(|| b.delta.cmp(&a.delta))
                    .then_with(|| b.current.cmp(&a.current))
            });
        }
        SortMode::Delta => {
            records.sort_by(|a, b| {
                b.delta
                    .cmp(&a.delta)
                    .then_with(|| b.current.cmp(&a.current))
                    .then_with(|| {
                        cmp_f64(
                            b.change_fraction.unwrap_or(0.0),
                            a.change_fraction.unwrap_or(0.0),
                        )
                    })
            });
        }
    }
}

/// NEW records carry no fraction; within the NEW group the later
/// tie-breakers (delta, current) decide.
fn fraction_rank(record: &GrowthRecord) -> f64 {
    record.change_fraction.unwrap_or(f64::INFINITY)
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
#[path = "trend_test.rs"]
mod tests;
