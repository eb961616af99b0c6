/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn from_ms(ms: f64) -> Self {
        Time(ms / 1000.0)
    }

    pub fn as_ms(self) -> f64 {
        self.0 * 1000.0
    }

    pub fn after_ms(self, ms: f64) -> Self {
        Time(self.0 + ms / 1000.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    /// Span starting at `start` and lasting `duration_ms`.
    pub fn starting_at(start: Time, duration_ms: f64) -> Self {
        Self {
            start,
            end: start.after_ms(duration_ms.max(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Time, TimeSpan};

    #[test]
    fn millisecond_conversions_agree() {
        let t = Time::from_ms(1500.0);
        assert_eq!(t, Time(1.5));
        assert_eq!(t.as_ms(), 1500.0);
        assert_eq!(t.after_ms(500.0), Time(2.0));
    }

    #[test]
    fn span_ends_after_duration() {
        let span = TimeSpan::starting_at(Time(1.0), 4000.0);
        assert_eq!(span.start, Time(1.0));
        assert_eq!(span.end, Time(5.0));
    }

    #[test]
    fn negative_duration_clamps_to_start() {
        let span = TimeSpan::starting_at(Time(2.0), -10.0);
        assert_eq!(span.end, span.start);
    }
}
