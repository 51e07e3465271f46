//! Reshapes raw platform records into chart-ready series.

use chrono::{DateTime, Utc};
use gritboard_api_types::{SkillEntry, SkillTransaction, TransactionRecord};

/// Decides which XP transactions count towards the progression series.
///
/// A path is included when it sits under `root` and does not start with any of the
/// `excluded` sub-paths, or when it ends with one of the `always_include` suffixes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathFilter {
    pub root: String,
    pub excluded: Vec<String>,
    pub always_include: Vec<String>,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self {
            root: "/gritlab/school-curriculum".to_string(),
            excluded: vec!["checkpoint".to_string(), "piscine-".to_string()],
            always_include: vec!["piscine-js".to_string()],
        }
    }
}

impl PathFilter {
    pub fn includes(&self, path: &str) -> bool {
        self.matches_suffix(path)
            || (self.relative_to_root(path).is_some() && !self.is_excluded(path))
    }

    pub fn includes_record(&self, record: &TransactionRecord) -> bool {
        record
            .path
            .as_deref()
            .map(|path| self.includes(path))
            .unwrap_or_default()
    }

    /// Path below the root with the separating slash removed, `Some("")` for the root itself.
    fn relative_to_root<'a>(&self, path: &'a str) -> Option<&'a str> {
        let root = self.root.trim_end_matches('/');
        let rest = path.strip_prefix(root)?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.relative_to_root(path)
            .map(|relative| {
                self.excluded
                    .iter()
                    .any(|excluded| relative.starts_with(excluded.trim_matches('/')))
            })
            .unwrap_or_default()
    }

    fn matches_suffix(&self, path: &str) -> bool {
        let path = path.trim_end_matches('/');
        self.always_include.iter().any(|suffix| {
            let suffix = suffix.trim_matches('/');
            !suffix.is_empty()
                && path
                    .strip_suffix(suffix)
                    .map(|head| head.is_empty() || head.ends_with('/'))
                    .unwrap_or_default()
        })
    }
}

/// One point of the cumulative XP series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressionPoint {
    pub cumulative_amount: i64,
    pub point_amount: i64,
    pub timestamp: DateTime<Utc>,
    pub path: Option<String>,
}

pub fn filter_records<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
    filter: &PathFilter,
) -> Vec<&'a TransactionRecord> {
    records
        .into_iter()
        .filter(|record| filter.includes_record(record))
        .collect()
}

/// Stable ascending sort, equal timestamps keep their input order.
pub fn sort_by_timestamp(records: &mut [&TransactionRecord]) {
    records.sort_by_key(|record| record.created_at);
}

/// Running total over already ordered records. Missing amounts count as zero.
pub fn accumulate<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Vec<ProgressionPoint> {
    records
        .into_iter()
        .scan(0i64, |total, record| {
            let point_amount = record.amount_or_zero();
            *total = total.saturating_add(point_amount);
            Some(ProgressionPoint {
                cumulative_amount: *total,
                point_amount,
                timestamp: record.created_at,
                path: record.path.clone(),
            })
        })
        .collect()
}

/// Filter, order and accumulate in one go. An empty result is a valid "no data" series.
pub fn build_progression(
    records: &[TransactionRecord],
    filter: &PathFilter,
) -> Vec<ProgressionPoint> {
    let mut included = filter_records(records, filter);
    sort_by_timestamp(&mut included);
    let series = accumulate(included);
    log::debug!(
        "built progression series of {} points from {} records",
        series.len(),
        records.len()
    );
    series
}

pub fn total_amount(series: &[ProgressionPoint]) -> i64 {
    series
        .last()
        .map(|point| point.cumulative_amount)
        .unwrap_or_default()
}

/// Strips `prefix` from each skill type. Deduplication is left to the query.
pub fn skill_entries(raw: &[SkillTransaction], prefix: &str) -> Vec<SkillEntry> {
    raw.iter()
        .map(|skill| {
            let category = skill.kind.strip_prefix(prefix).unwrap_or(&skill.kind);
            SkillEntry::new(category, skill.amount.unwrap_or_default() as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn record(amount: i64, d: u32, path: &str) -> TransactionRecord {
        TransactionRecord::new(amount, day(d), path)
    }

    #[test]
    fn checkpoint_excluded_piscine_js_included() {
        let records = vec![
            record(100, 1, "/gritlab/school-curriculum/proj-a"),
            record(50, 3, "/gritlab/school-curriculum/checkpoint-x"),
            record(200, 2, "/gritlab/school-curriculum/piscine-js"),
        ];
        let series = build_progression(&records, &PathFilter::default());
        let projects: Vec<_> = series.iter().map(|p| p.path.as_deref().unwrap()).collect();
        assert_eq!(
            projects,
            vec![
                "/gritlab/school-curriculum/proj-a",
                "/gritlab/school-curriculum/piscine-js"
            ]
        );
        let totals: Vec<_> = series.iter().map(|p| p.cumulative_amount).collect();
        assert_eq!(totals, vec![100, 300]);
        assert_eq!(series[1].point_amount, 200);
        assert_eq!(series[1].timestamp, day(2));
    }

    #[test]
    fn filter_rules() {
        let filter = PathFilter::default();
        assert!(filter.includes("/gritlab/school-curriculum"));
        assert!(filter.includes("/gritlab/school-curriculum/go-reloaded"));
        assert!(!filter.includes("/gritlab/school-curriculumx/go-reloaded"));
        assert!(!filter.includes("/gritlab/school-curriculum/piscine-go/quest-01"));
        assert!(!filter.includes("/gritlab/school-curriculum/checkpoint-01/sum"));
        assert!(!filter.includes("/gritlab/piscine-go"));
        assert!(filter.includes("/gritlab/school-curriculum/piscine-js/"));
        assert!(filter.includes("/elsewhere/piscine-js"));
        assert!(!filter.includes("/elsewhere/not-piscine-js"));

        let missing_path = TransactionRecord {
            amount: Some(10),
            created_at: day(1),
            path: None,
        };
        assert!(!filter.includes_record(&missing_path));
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = vec![
            record(1, 1, "/gritlab/school-curriculum/a"),
            record(2, 2, "/gritlab/school-curriculum/checkpoint-1"),
            record(3, 3, "/gritlab/school-curriculum/piscine-js"),
            record(4, 4, "/other/b"),
        ];
        let filter = PathFilter::default();
        let once: Vec<TransactionRecord> = filter_records(&records, &filter)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<TransactionRecord> = filter_records(&once, &filter)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn sort_is_stable_for_equal_timestamps() {
        let records = vec![
            record(1, 5, "/gritlab/school-curriculum/late"),
            record(2, 2, "/gritlab/school-curriculum/first"),
            record(3, 2, "/gritlab/school-curriculum/second"),
            record(4, 2, "/gritlab/school-curriculum/third"),
        ];
        let series = build_progression(&records, &PathFilter::default());
        let amounts: Vec<_> = series.iter().map(|p| p.point_amount).collect();
        assert_eq!(amounts, vec![2, 3, 4, 1]);
    }

    #[test]
    fn newest_first_input_is_reordered() {
        let records: Vec<_> = (1..=10)
            .rev()
            .map(|d| record(d as i64 * 10, d, "/gritlab/school-curriculum/p"))
            .collect();
        let series = build_progression(&records, &PathFilter::default());
        assert!(series.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(series
            .windows(2)
            .all(|w| w[0].cumulative_amount <= w[1].cumulative_amount));
        let sum: i64 = series.iter().map(|p| p.point_amount).sum();
        assert_eq!(total_amount(&series), sum);
        assert_eq!(sum, 550);
    }

    #[test]
    fn missing_amount_counts_as_zero() {
        let records = vec![
            record(10, 1, "/gritlab/school-curriculum/a"),
            TransactionRecord {
                amount: None,
                created_at: day(2),
                path: Some("/gritlab/school-curriculum/b".into()),
            },
        ];
        let series = build_progression(&records, &PathFilter::default());
        assert_eq!(series[1].point_amount, 0);
        assert_eq!(series[1].cumulative_amount, 10);
    }

    #[test]
    fn empty_after_filtering_is_not_an_error() {
        let records = vec![record(10, 1, "/gritlab/school-curriculum/checkpoint-2")];
        assert!(build_progression(&records, &PathFilter::default()).is_empty());
        assert!(build_progression(&[], &PathFilter::default()).is_empty());
        assert_eq!(total_amount(&[]), 0);
    }

    #[test]
    fn skill_prefix_is_stripped() {
        let raw = vec![
            SkillTransaction {
                kind: "skill_go".into(),
                amount: Some(40),
                created_at: None,
            },
            SkillTransaction {
                kind: "skill_js".into(),
                amount: Some(85),
                created_at: None,
            },
            SkillTransaction {
                kind: "algo".into(),
                amount: None,
                created_at: None,
            },
        ];
        let entries = skill_entries(&raw, "skill_");
        assert_eq!(
            entries,
            vec![
                SkillEntry::new("go", 40.0),
                SkillEntry::new("js", 85.0),
                SkillEntry::new("algo", 0.0)
            ]
        );
    }
}
