use chrono::{DateTime, Datelike, Utc};
use thousands::Separable;

pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// `100000` -> `100,000`
pub fn grouped(value: i64) -> String {
    value.separate_with_commas()
}

/// Bottom axis label, `month/2-digit-year` without padding the month.
pub fn month_label(date: &DateTime<Utc>) -> String {
    format!("{}/{:02}", date.month(), date.year().rem_euclid(100))
}

pub fn day_label(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Last `/` separated segment of a project path.
pub fn project_name(path: Option<&str>) -> &str {
    path.and_then(|path| path.split('/').next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or(UNKNOWN_PROJECT)
}

pub fn percentage(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn labels() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(month_label(&date), "3/24");
        assert_eq!(day_label(&date), "07/03/2024");
        let date = Utc.with_ymd_and_hms(2005, 11, 1, 0, 0, 0).unwrap();
        assert_eq!(month_label(&date), "11/05");
    }

    #[test]
    fn numbers() {
        assert_eq!(grouped(100000), "100,000");
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(1234567), "1,234,567");
        assert_eq!(percentage(85.0), "85.0%");
    }

    #[test]
    fn project_names() {
        assert_eq!(project_name(Some("/gritlab/school-curriculum/proj-a")), "proj-a");
        assert_eq!(project_name(Some("/gritlab/school-curriculum/")), UNKNOWN_PROJECT);
        assert_eq!(project_name(Some("")), UNKNOWN_PROJECT);
        assert_eq!(project_name(None), UNKNOWN_PROJECT);
        assert_eq!(project_name(Some("standalone")), "standalone");
    }
}
