//! Wall-clock timestamp source.

use chrono::{Datelike, Local, Timelike};
use session_core::Clock;

/// System clock rendering the in-fiction combat-log stamp (three millennia
/// ahead of the wall clock).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        let now = Local::now();
        format!(
            "{}.{}.{:02}//{:02}:{:02}:{:02}",
            now.year() + 3000,
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_is_pushed_three_millennia_out() {
        let stamp = SystemClock.timestamp();
        let year: i32 = stamp.split('.').next().unwrap().parse().unwrap();
        assert!(year >= 5000);
        assert!(stamp.contains("//"));
    }
}
