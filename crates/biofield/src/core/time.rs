/// Converts host timestamps into the normalized frame factor `dt`.
///
/// `dt == 1.0` means one nominal frame elapsed. The factor is clamped so a
/// long pause (a backgrounded tab) cannot produce one giant step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Nominal frame duration in milliseconds.
    nominal_ms: f32,
    /// Upper bound on the returned factor.
    max_dt: f32,
    /// Timestamp of the previous tick, if any.
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(nominal_ms: f32, max_dt: f32) -> Self {
        Self {
            nominal_ms: nominal_ms.max(f32::EPSILON),
            max_dt: max_dt.max(0.0),
            last_ms: None,
        }
    }

    /// Record a tick at `now_ms` and return its dt factor.
    /// The first tick, and any tick with a timestamp going backwards, yields
    /// one nominal frame and zero respectively.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            None => 1.0,
            Some(last) => ((now_ms - last) as f32 / self.nominal_ms).clamp(0.0, self.max_dt),
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp; the next tick counts as the first.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    pub fn last_ms(&self) -> Option<f64> {
        self.last_ms
    }
}
