/// Elapsed-time gate between two sample cycles.
///
/// Timestamps come from a free-running millisecond counter that wraps at
/// `u32::MAX`, so elapsed time is always taken with wrapping subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWindow {
    last_sample_ms: Option<u32>,
    interval_ms: u32,
}

impl SampleWindow {
    /// The first call to [`SampleWindow::should_sample`] always opens the gate.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            last_sample_ms: None,
            interval_ms,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn last_sample_ms(&self) -> Option<u32> {
        self.last_sample_ms
    }

    pub fn should_sample(&self, now_ms: u32) -> bool {
        match self.last_sample_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.interval_ms,
        }
    }

    pub fn mark(&mut self, now_ms: u32) {
        self.last_sample_ms = Some(now_ms);
    }

    /// Opens the gate and consumes the interval in one step.
    pub fn try_open(&mut self, now_ms: u32) -> bool {
        if !self.should_sample(now_ms) {
            return false;
        }

        self.mark(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_opens() {
        let mut window = SampleWindow::new(2000);

        assert!(window.try_open(0));
        assert_eq!(window.last_sample_ms(), Some(0));
    }

    #[test]
    fn test_gate_waits_full_interval() {
        let mut window = SampleWindow::new(2000);
        window.mark(500);

        assert!(!window.should_sample(500));
        assert!(!window.should_sample(2499));
        assert!(window.should_sample(2500));
        assert!(window.should_sample(9000));
    }

    #[test]
    fn test_gate_survives_counter_wrap() {
        let mut window = SampleWindow::new(2000);
        let before_wrap = u32::MAX - 499;
        window.mark(before_wrap);

        // 1000 ms elapsed across the wrap
        assert!(!window.should_sample(499));
        // 2000 ms elapsed across the wrap
        assert!(window.should_sample(1500));
    }

    #[test]
    fn test_emitted_ticks_never_closer_than_interval() {
        let mut window = SampleWindow::new(2000);
        let mut opened = std::vec::Vec::new();

        let start = u32::MAX - 10_000;
        for step in 0..20_000u32 {
            let now = start.wrapping_add(step * 3);
            if window.try_open(now) {
                opened.push(now);
            }
        }

        assert!(opened.len() > 10);
        for pair in opened.windows(2) {
            assert!(pair[1].wrapping_sub(pair[0]) >= 2000);
        }
    }
}
