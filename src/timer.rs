use std::time::{Duration, Instant};

/// Cancellable repeating timer polled from the event loop.
///
/// There is one owner and at most one schedule: `start` replaces any running
/// schedule, so restarting can never make two tickers count the same second.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    period: Duration,
    next_fire: Option<Instant>,
    ticks: u64,
}

impl RepeatingTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_fire: None,
            ticks: 0,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Reset the counter to zero and schedule the first fire one period from `now`
    pub fn start(&mut self, now: Instant) {
        self.cancel();
        self.ticks = 0;
        self.next_fire = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_fire = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Total periods counted since the last `start`
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Count every period that has fully elapsed by `now`. Returns how many fired.
    pub fn poll(&mut self, now: Instant) -> u64 {
        let Some(mut next) = self.next_fire else {
            return 0;
        };

        let mut fired = 0;
        while next <= now {
            fired += 1;
            next += self.period;
        }
        self.ticks += fired;
        self.next_fire = Some(next);
        fired
    }
}

impl Default for RepeatingTimer {
    fn default() -> Self {
        Self::every_second()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_timer_never_fires() {
        let mut timer = RepeatingTimer::every_second();
        assert!(!timer.is_running());
        assert_eq!(timer.poll(Instant::now() + Duration::from_secs(10)), 0);
        assert_eq!(timer.ticks(), 0);
    }

    #[test]
    fn test_counts_whole_periods() {
        let mut timer = RepeatingTimer::every_second();
        let t0 = Instant::now();
        timer.start(t0);

        assert_eq!(timer.poll(t0 + Duration::from_millis(999)), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(1000)), 1);
        assert_eq!(timer.poll(t0 + Duration::from_millis(1500)), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(3200)), 2);
        assert_eq!(timer.ticks(), 3);
    }

    #[test]
    fn test_cancel_stops_counting() {
        let mut timer = RepeatingTimer::every_second();
        let t0 = Instant::now();
        timer.start(t0);
        timer.poll(t0 + Duration::from_secs(2));
        timer.cancel();

        assert!(!timer.is_running());
        assert_eq!(timer.poll(t0 + Duration::from_secs(10)), 0);
        assert_eq!(timer.ticks(), 2);
    }

    #[test]
    fn test_restart_does_not_double_count() {
        let mut timer = RepeatingTimer::every_second();
        let t0 = Instant::now();
        timer.start(t0);
        timer.poll(t0 + Duration::from_secs(3));

        let t1 = t0 + Duration::from_millis(3500);
        timer.start(t1);
        assert_eq!(timer.ticks(), 0);
        assert_eq!(timer.poll(t1 + Duration::from_secs(1)), 1);
        assert_eq!(timer.ticks(), 1);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timer = RepeatingTimer::every_second();
        timer.cancel();
        timer.start(Instant::now());
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_running());
    }
}
