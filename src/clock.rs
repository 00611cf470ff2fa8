use std::fmt::Debug;
use time::{Date, OffsetDateTime, UtcOffset};

/// A source for the current date
pub(crate) trait Clock: Debug {
    fn today(&self) -> Date;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn today(&self) -> Date {
        (**self).today()
    }
}

impl<T: Clock + ?Sized> Clock for Box<T> {
    fn today(&self) -> Date {
        (**self).today()
    }
}

/// The date in the local timezone.
///
/// The local UTC offset is determined once, on construction, as it cannot be
/// reliably queried once the program has spawned any threads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LocalClock {
    offset: UtcOffset,
}

impl LocalClock {
    pub(crate) fn new() -> LocalClock {
        let offset = match UtcOffset::current_local_offset() {
            Ok(offset) => offset,
            Err(e) => {
                tracing::warn!(error = %e, "could not determine local UTC offset; using UTC");
                UtcOffset::UTC
            }
        };
        LocalClock { offset }
    }
}

impl Clock for LocalClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.offset).date()
    }
}

/// A clock stuck on a single date
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FixedClock(pub(crate) Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(date!(2025 - 03 - 15));
        assert_eq!(clock.today(), date!(2025 - 03 - 15));
        let boxed: Box<dyn Clock> = Box::new(clock);
        assert_eq!(boxed.today(), date!(2025 - 03 - 15));
    }

    #[test]
    fn test_local_clock_is_near_utc() {
        let today = LocalClock::new().today();
        let utc = OffsetDateTime::now_utc().date();
        // Offsets never exceed one day in either direction.
        assert!(
            utc.previous_day() == Some(today) || utc == today || utc.next_day() == Some(today),
            "{today} should be within a day of {utc}"
        );
    }
}
