use crate::timestamp::Timestamp;
use serde_json::{json, Value};

/// Groups `(timestamp, encoded_fingerprint)` pairs into the nested
/// `[[year, [month, [day, [hms, hash_index], ...], ...], ...], ...]` shape,
/// deduplicating the fingerprints themselves into a first-seen `hashes` list.
pub fn compress_captures(entries: &[(Timestamp, String)]) -> (Value, Vec<String>) {
    let mut hashes: Vec<String> = Vec::new();

    // (year -> (month -> (day -> [(hms, hash_index)])), insertion order preserved
    // at every level since the response is meant to read chronologically.
    let mut years: Vec<(String, Vec<(String, Vec<(String, Vec<(String, usize)>)>)>)> = Vec::new();

    for (ts, encoded) in entries {
        let hash_index = match hashes.iter().position(|h| h == encoded) {
            Some(idx) => idx,
            None => {
                hashes.push(encoded.clone());
                hashes.len() - 1
            }
        };

        let year_bucket = find_or_push(&mut years, ts.year());
        let month_bucket = find_or_push(year_bucket, ts.month());
        let day_bucket = find_or_push(month_bucket, ts.day());
        day_bucket.push((ts.hms().to_string(), hash_index));
    }

    let captures = Value::Array(
        years
            .into_iter()
            .map(|(year, months)| {
                json!([
                    year,
                    months
                        .into_iter()
                        .map(|(month, days)| {
                            json!([
                                month,
                                days.into_iter()
                                    .map(|(day, hms_entries)| {
                                        json!([
                                            day,
                                            hms_entries
                                                .into_iter()
                                                .map(|(hms, idx)| json!([hms, idx]))
                                                .collect::<Vec<_>>()
                                        ])
                                    })
                                    .collect::<Vec<_>>()
                            ])
                        })
                        .collect::<Vec<_>>()
                ])
            })
            .collect(),
    );

    (captures, hashes)
}

fn find_or_push<'a, T>(buckets: &'a mut Vec<(String, Vec<T>)>, key: &str) -> &'a mut Vec<T> {
    if let Some(pos) = buckets.iter().position(|(k, _)| k == key) {
        &mut buckets[pos].1
    } else {
        buckets.push((key.to_string(), Vec::new()));
        &mut buckets.last_mut().unwrap().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedups_hashes_in_first_seen_order() {
        let entries = vec![
            (Timestamp::parse("20160101000000").unwrap(), "AAA".to_string()),
            (Timestamp::parse("20160102000000").unwrap(), "BBB".to_string()),
            (Timestamp::parse("20160103000000").unwrap(), "AAA".to_string()),
        ];
        let (captures, hashes) = compress_captures(&entries);
        assert_eq!(hashes, vec!["AAA".to_string(), "BBB".to_string()]);
        // Single year, single month, three days.
        let years = captures.as_array().unwrap();
        assert_eq!(years.len(), 1);
        assert_eq!(years[0][0], "2016");
    }

    #[test]
    fn groups_by_year_month_day() {
        let entries = vec![
            (Timestamp::parse("20160101000000").unwrap(), "AAA".to_string()),
            (Timestamp::parse("20170601120000").unwrap(), "BBB".to_string()),
        ];
        let (captures, _hashes) = compress_captures(&entries);
        let years = captures.as_array().unwrap();
        assert_eq!(years.len(), 2);
        assert_eq!(years[0][0], "2016");
        assert_eq!(years[1][0], "2017");
    }
}
