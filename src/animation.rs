use std::time::{Duration, Instant};

/// Steps a marker and a growing trail through a ground track at a fixed
/// wall-clock interval, looping indefinitely.
///
/// Each satellite owns one `Animation`; there is no shared state between
/// them. The interval is measured from the previous step, so a slow frame
/// delays the next step rather than being caught up — drift is acceptable.
/// [`stop`] flags the animation; the flag is checked at the top of every tick
/// so a stopped animation never advances again.
///
/// [`stop`]: Animation::stop
pub struct Animation {
    points: Vec<(f64, f64)>,
    cursor: usize,
    interval: Duration,
    last_step: Instant,
    stopped: bool,
}

impl Animation {
    /// `points` must be non-empty; the marker starts on the first point.
    pub fn new(points: Vec<(f64, f64)>, interval: Duration) -> Self {
        debug_assert!(!points.is_empty(), "animation over an empty track");
        Self {
            points,
            cursor: 0,
            interval,
            last_step: Instant::now(),
            stopped: false,
        }
    }

    /// Advances one frame if the interval has elapsed since the last step.
    pub fn tick(&mut self, now: Instant) {
        if self.stopped {
            return;
        }
        if now.duration_since(self.last_step) < self.interval {
            return;
        }
        self.step();
        self.last_step = now;
    }

    /// Advances one frame: wraps the cursor back to the start when it runs
    /// off the end of the track, which also collapses the trail to a single
    /// point.
    pub fn step(&mut self) {
        if self.stopped {
            return;
        }
        if self.cursor >= self.points.len() {
            self.cursor = 0;
        }
        self.cursor += 1;
    }

    /// Current marker position.
    pub fn marker(&self) -> (f64, f64) {
        self.points[self.trail_len() - 1]
    }

    /// The trail behind the marker, from the start of the track to the
    /// marker inclusive.
    pub fn trail(&self) -> &[(f64, f64)] {
        &self.points[..self.trail_len()]
    }

    /// Permanently stops the animation; the marker and trail keep their last
    /// values.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn trail_len(&self) -> usize {
        self.cursor.clamp(1, self.points.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(n: usize) -> Vec<(f64, f64)> {
        (0..n).map(|i| (i as f64, i as f64)).collect()
    }

    #[test]
    fn trail_grows_one_point_per_step() {
        let mut animation = Animation::new(track(4), Duration::ZERO);
        for expected in 1..=4 {
            animation.step();
            assert_eq!(animation.trail().len(), expected);
            assert_eq!(animation.marker(), ((expected - 1) as f64, (expected - 1) as f64));
        }
    }

    #[test]
    fn loops_back_to_a_single_point_trail() {
        let n = 3;
        let mut animation = Animation::new(track(n), Duration::ZERO);
        for _ in 0..n {
            animation.step();
        }
        assert_eq!(animation.trail().len(), n);

        // The step after the last track point wraps the cursor.
        animation.step();
        assert_eq!(animation.trail(), [(0.0, 0.0)]);
        assert_eq!(animation.marker(), (0.0, 0.0));
    }

    #[test]
    fn stop_prevents_further_advance() {
        let mut animation = Animation::new(track(5), Duration::ZERO);
        animation.step();
        animation.step();
        let marker = animation.marker();
        let trail_len = animation.trail().len();

        animation.stop();
        assert!(animation.is_stopped());
        animation.step();
        animation.tick(Instant::now() + Duration::from_secs(60));
        assert_eq!(animation.marker(), marker);
        assert_eq!(animation.trail().len(), trail_len);
    }

    #[test]
    fn tick_respects_the_interval() {
        let mut animation = Animation::new(track(5), Duration::from_secs(1));
        let start = animation.last_step;

        // First elapsed tick advances to the first point.
        animation.tick(start + Duration::from_secs(1));
        assert_eq!(animation.trail().len(), 1);
        assert_eq!(animation.marker(), (0.0, 0.0));

        // A tick inside the next interval does not step.
        animation.tick(start + Duration::from_millis(1500));
        assert_eq!(animation.trail().len(), 1);

        // Past the interval again: second step.
        animation.tick(start + Duration::from_secs(3));
        assert_eq!(animation.trail().len(), 2);
        assert_eq!(animation.marker(), (1.0, 1.0));
    }

    #[test]
    fn single_point_track_stays_put() {
        let mut animation = Animation::new(vec![(9.0, 9.0)], Duration::ZERO);
        for _ in 0..3 {
            animation.step();
            assert_eq!(animation.marker(), (9.0, 9.0));
            assert_eq!(animation.trail().len(), 1);
        }
    }
}
