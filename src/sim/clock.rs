use super::types::HOURS_PER_DAY;

/// Minutes in one simulated hour.
const MINUTES_PER_HOUR: f64 = 60.0;

/// A wall-clock style simulation clock that compresses one simulated hour
/// into a fixed number of ticks.
///
/// The minute shown during a tick is derived from the tick's index within
/// the hour, and the hour wraps at midnight.
///
/// # Examples
///
/// ```
/// use ev_charge_sim::sim::clock::SimClock;
///
/// let mut clock = SimClock::new(4);
/// let mut minutes = Vec::new();
/// for _ in 0..4 {
///     clock.tick();
///     minutes.push(clock.minute());
/// }
/// // The last tick of the hour rolls the clock over.
/// assert_eq!(minutes, vec![0, 15, 30, 0]);
/// assert_eq!(clock.hour(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SimClock {
    /// Current simulated hour (0 to 23).
    hour: usize,
    /// Current simulated minute (0 to 59).
    minute: u32,
    /// Index of the next tick within the current hour.
    tick_index: usize,
    /// Ticks that make up one simulated hour.
    ticks_per_hour: usize,
}

impl SimClock {
    /// Creates a clock at 00:00.
    ///
    /// # Arguments
    ///
    /// * `ticks_per_hour` - Number of ticks per simulated hour (must be > 0)
    ///
    /// # Panics
    ///
    /// Panics if `ticks_per_hour` is zero.
    pub fn new(ticks_per_hour: usize) -> Self {
        assert!(ticks_per_hour > 0, "ticks_per_hour must be > 0");
        Self {
            hour: 0,
            minute: 0,
            tick_index: 0,
            ticks_per_hour,
        }
    }

    /// Advances the clock by one tick.
    ///
    /// Sets the minute from the index of this tick within the hour, then
    /// moves to the next hour (minute 0) once `ticks_per_hour` ticks have
    /// elapsed.
    ///
    /// # Returns
    ///
    /// * `Some(hour)` - The new hour when this tick completed an hour
    /// * `None` - The clock is still within the same hour
    pub fn tick(&mut self) -> Option<usize> {
        let minutes_per_tick = MINUTES_PER_HOUR / self.ticks_per_hour as f64;
        self.minute = ((minutes_per_tick * self.tick_index as f64).round() as u32) % 60;
        self.tick_index += 1;

        if self.tick_index >= self.ticks_per_hour {
            self.hour = (self.hour + 1) % HOURS_PER_DAY;
            self.minute = 0;
            self.tick_index = 0;
            Some(self.hour)
        } else {
            None
        }
    }

    /// Returns the clock to 00:00.
    pub fn reset(&mut self) {
        self.hour = 0;
        self.minute = 0;
        self.tick_index = 0;
    }

    pub fn hour(&self) -> usize {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn tick_index(&self) -> usize {
        self.tick_index
    }

    pub fn ticks_per_hour(&self) -> usize {
        self.ticks_per_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock() {
        let clock = SimClock::new(60);
        assert_eq!(clock.hour(), 0);
        assert_eq!(clock.minute(), 0);
        assert_eq!(clock.tick_index(), 0);
    }

    #[test]
    #[should_panic]
    fn test_zero_ticks_per_hour_panics() {
        SimClock::new(0);
    }

    #[test]
    fn test_minutes_follow_tick_index() {
        let mut clock = SimClock::new(60);
        clock.tick();
        assert_eq!(clock.minute(), 0);
        clock.tick();
        assert_eq!(clock.minute(), 1);
        for _ in 0..57 {
            clock.tick();
        }
        assert_eq!(clock.minute(), 58);
        assert_eq!(clock.tick(), Some(1));
        assert_eq!(clock.minute(), 0);
    }

    #[test]
    fn test_hour_wraps_after_a_day() {
        let mut clock = SimClock::new(3);
        let mut rollovers = 0;
        for _ in 0..(24 * 3) {
            if clock.tick().is_some() {
                rollovers += 1;
            }
            assert!(clock.minute() < 60);
            assert!(clock.hour() < 24);
        }
        assert_eq!(rollovers, 24);
        assert_eq!(clock.hour(), 0);
    }

    #[test]
    fn test_single_tick_hours() {
        let mut clock = SimClock::new(1);
        assert_eq!(clock.tick(), Some(1));
        assert_eq!(clock.minute(), 0);
        assert_eq!(clock.tick(), Some(2));
    }

    #[test]
    fn test_reset() {
        let mut clock = SimClock::new(4);
        for _ in 0..9 {
            clock.tick();
        }
        assert_eq!(clock.hour(), 2);
        clock.reset();
        assert_eq!(clock.hour(), 0);
        assert_eq!(clock.minute(), 0);
        assert_eq!(clock.tick_index(), 0);
    }
}
