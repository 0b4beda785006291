/// Get the current time in seconds since the UNIX epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn current_time_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Get the current time in seconds since page load
#[cfg(target_arch = "wasm32")]
pub fn current_time_secs() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|perf| perf.now() / 1000.0)
        .unwrap_or(0.0)
}

/// Get a timestamp in seconds since the UNIX epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn timestamp_secs() -> u64 {
    current_time_secs() as u64
}

/// Get a timestamp in seconds since the UNIX epoch, from the browser's wall clock
#[cfg(target_arch = "wasm32")]
pub fn timestamp_secs() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

/// Lets an action through at most once per interval.
///
/// Takes the clock reading as an argument so callers (and tests) decide
/// where time comes from.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_secs: f64,
    last: Option<f64>,
}

impl Throttle {
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval_secs,
            last: None,
        }
    }

    /// True if the interval has elapsed since the last accepted call.
    /// Accepting a call restarts the interval.
    pub fn ready(&mut self, now: f64) -> bool {
        match self.last {
            Some(last) if now - last < self.interval_secs => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last accepted call so the next one goes through
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_interval() {
        let mut throttle = Throttle::new(2.0);
        assert!(throttle.ready(10.0));
        assert!(!throttle.ready(11.0));
        assert!(!throttle.ready(11.99));
        assert!(throttle.ready(12.0));
        assert!(!throttle.ready(12.5));
    }

    #[test]
    fn test_throttle_reset() {
        let mut throttle = Throttle::new(5.0);
        assert!(throttle.ready(0.0));
        throttle.reset();
        assert!(throttle.ready(0.1));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_timestamp_is_epoch_based() {
        // 2020-09-13, well before any build of this crate
        assert!(timestamp_secs() > 1_600_000_000);
    }
}
