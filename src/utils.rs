use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};

/// India Standard Time, UTC+05:30
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Epoch seconds as IST, `DD/MM/YY HH:MM:SS`
pub fn format_epoch_ist(epoch: i64) -> Option<String> {
    let ist = FixedOffset::east_opt(IST_OFFSET_SECS)?;
    let utc = DateTime::<Utc>::from_timestamp(epoch, 0)?;
    Some(utc.with_timezone(&ist).format("%d/%m/%y %H:%M:%S").to_string())
}

/// Epoch seconds as UTC, `YYYY-MM-DD HH:MM:SS`
pub fn format_epoch_utc(epoch: i64) -> Option<String> {
    let utc = DateTime::<Utc>::from_timestamp(epoch, 0)?;
    Some(utc.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Epoch seconds in the machine's local time without offset, `YYYY-MM-DD HH:MM:SS`
pub fn format_epoch_local(epoch: i64) -> Option<String> {
    let local = Local.timestamp_opt(epoch, 0).single()?;
    Some(local.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// `YYYYMMDD` becomes `YYYY-MM-DD`; anything else passes through
pub fn format_compact_date(date: &str) -> String {
    if date.len() == 8 && date.is_ascii() {
        format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..])
    } else {
        date.to_string()
    }
}

/// Split newline-separated input into URLs, dropping blank lines and keeping duplicates
pub fn parse_batch(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_epoch_ist() {
        // 2023-11-14 22:13:20 UTC
        assert_eq!(format_epoch_ist(1_700_000_000).as_deref(), Some("15/11/23 03:43:20"));
        assert_eq!(format_epoch_ist(0).as_deref(), Some("01/01/70 05:30:00"));
    }

    #[test]
    fn test_format_epoch_utc() {
        assert_eq!(
            format_epoch_utc(1_700_000_000).as_deref(),
            Some("2023-11-14 22:13:20")
        );
    }

    #[test]
    fn test_format_epoch_local_shape() {
        let formatted = format_epoch_local(1_700_000_000).unwrap();
        let expected = Local
            .timestamp_opt(1_700_000_000, 0)
            .unwrap()
            .naive_local()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(formatted, expected);
        assert_eq!(formatted.len(), 19);
        assert!(!formatted.contains('+'));
    }

    #[test]
    fn test_format_compact_date() {
        assert_eq!(format_compact_date("20240131"), "2024-01-31");
        assert_eq!(format_compact_date("2024-01-31"), "2024-01-31");
        assert_eq!(format_compact_date("N/A"), "N/A");
    }

    #[test]
    fn test_parse_batch() {
        let text = "  https://a.example/1 \n\n https://b.example/2\nhttps://a.example/1\n   \n";
        assert_eq!(
            parse_batch(text),
            vec![
                "https://a.example/1",
                "https://b.example/2",
                "https://a.example/1"
            ]
        );
    }
}
