pub trait TimeSource {
    // Returns an ISO-8601 timestamp
    fn current_time(&self) -> String;
}

#[derive(Clone)]
pub struct SystemClock {}

impl TimeSource for SystemClock {
    fn current_time(&self) -> String {
        let now = time::OffsetDateTime::now_utc();

        now.format(&time::format_description::well_known::Iso8601::DEFAULT)
            .expect("failed to iso8601 format timestamp")
    }
}
