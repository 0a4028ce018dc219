use chrono::{DateTime, Local, NaiveDate};

pub fn display_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(timestamp) => timestamp.format("%Y-%m-%d").to_string(),
        None => fallback(value),
    }
}

pub fn display_datetime(value: &str) -> String {
    match parse_timestamp(value) {
        Some(timestamp) => timestamp.format("%Y-%m-%d %H:%M").to_string(),
        None => fallback(value),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Local))
}

fn fallback(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return "unknown".to_string();
    }
    match value.get(..10).and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()) {
        Some(day) => day.format("%Y-%m-%d").to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_timestamps_with_nanoseconds_parse() {
        let value = "2026-02-03T12:00:00.123456789Z";
        let expected = DateTime::parse_from_rfc3339(value)
            .unwrap()
            .with_timezone(&Local)
            .format("%Y-%m-%d")
            .to_string();
        assert_eq!(display_date(value), expected);
    }

    #[test]
    fn datetime_includes_minutes() {
        let shown = display_datetime("2026-02-03T12:34:00+00:00");
        assert_eq!(shown.len(), "2026-02-03 12:34".len());
    }

    #[test]
    fn unparsable_values_degrade_gracefully() {
        assert_eq!(display_date(""), "unknown");
        assert_eq!(display_date("2026-02-03 10:00:00"), "2026-02-03");
        assert_eq!(display_date("yesterday"), "yesterday");
    }
}
