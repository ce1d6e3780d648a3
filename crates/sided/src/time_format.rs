use time::format_description::{parse_owned, OwnedFormatItem};
use time::OffsetDateTime;

const DEFAULT_ABSOLUTE_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]";

/// Formats file modification and commit times for the CLI listings
#[derive(Debug, Clone)]
pub struct TimeFormatter {
    format: Option<OwnedFormatItem>,
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self {
            format: parse_owned::<2>(DEFAULT_ABSOLUTE_FORMAT).ok(),
        }
    }
}

impl TimeFormatter {
    pub fn format(&self, epoch: Option<i64>) -> String {
        epoch
            .and_then(|epoch| {
                let format = self.format.as_ref()?;
                let date_time = OffsetDateTime::from_unix_timestamp(epoch).ok()?;
                date_time.format(format).ok()
            })
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Human readable byte size, e.g. `1.5 KiB`
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_epoch() {
        let formatter = TimeFormatter::default();
        assert_eq!(formatter.format(Some(0)), "1970-01-01 00:00");
        assert_eq!(formatter.format(Some(1_700_000_000)), "2023-11-14 22:13");
        assert_eq!(formatter.format(None), "Unknown");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(10 * 1024 * 1024), "10.0 MiB");
    }
}
