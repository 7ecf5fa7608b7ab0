use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// The current time in the local offset, or UTC when the offset cannot be determined.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_generated_on(at: OffsetDateTime) -> String {
    // Every component is present on an OffsetDateTime and the target is a
    // String, so formatting cannot fail; the RFC 3339 form stands in if it does.
    let generated_on = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    at.format(generated_on)
        .or_else(|_| at.format(&Rfc3339))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn zero_padded() {
        assert_eq!(
            format_generated_on(datetime!(2026-01-02 03:04:05 UTC)),
            "2026-01-02 03:04:05"
        );
    }

    #[test]
    fn midnight_and_24_hour_clock() {
        assert_eq!(
            format_generated_on(datetime!(2026-12-31 00:00:00 UTC)),
            "2026-12-31 00:00:00"
        );
        assert_eq!(
            format_generated_on(datetime!(2026-12-31 23:59:59 UTC)),
            "2026-12-31 23:59:59"
        );
    }

    #[test]
    fn keeps_local_offset() {
        assert_eq!(
            format_generated_on(datetime!(2026-10-18 23:30:00 +05:30)),
            "2026-10-18 23:30:00"
        );
    }
}
