//! First-order exponential easing
//!
//! Every step moves the value by `(target - value) * factor`. For
//! `0 < factor < 1` the gap shrinks geometrically, so the value never
//! overshoots and reaches the settle epsilon in a finite number of steps.

/// Configuration for a lerp animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LerpConfig {
    /// Fraction of the remaining distance covered per frame (0.0-1.0]
    pub factor: f32,
    /// Gap below which the value snaps to the target
    pub epsilon: f32,
}

impl LerpConfig {
    pub fn new(factor: f32) -> Self {
        Self {
            factor,
            ..Default::default()
        }
    }

    /// Upper bound on steps needed to close `distance`
    pub fn frames_to_settle(&self, distance: f32) -> u32 {
        let distance = distance.abs();
        if distance < self.epsilon {
            return 0;
        }
        if self.factor >= 1.0 {
            return 1;
        }
        if self.factor <= 0.0 {
            return u32::MAX;
        }
        // (1 - f)^n * d < eps  =>  n > ln(eps / d) / ln(1 - f)
        let n = (f64::from(self.epsilon) / f64::from(distance)).ln()
            / (-f64::from(self.factor)).ln_1p();
        (n.ceil() as u32).saturating_add(1)
    }
}

impl Default for LerpConfig {
    fn default() -> Self {
        Self {
            factor: 0.12,
            // Sub-pixel: imperceptible once within half a pixel
            epsilon: 0.5,
        }
    }
}

/// A value easing toward a target
#[derive(Clone, Copy, Debug)]
pub struct Lerp {
    config: LerpConfig,
    value: f32,
    target: f32,
}

impl Lerp {
    pub fn new(config: LerpConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> LerpConfig {
        self.config
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Move the value without touching the target
    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    /// Jump value and target to `value` (no animation)
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
    }

    /// Remaining signed distance to the target
    pub fn gap(&self) -> f32 {
        self.target - self.value
    }

    pub fn is_settled(&self) -> bool {
        self.gap().abs() < self.config.epsilon
    }

    /// Advance one frame.
    ///
    /// Returns true while still moving; on the settling step the value snaps
    /// exactly to the target and false is returned.
    pub fn step(&mut self) -> bool {
        let diff = self.gap();
        if diff.abs() < self.config.epsilon {
            self.value = self.target;
            return false;
        }
        let next = self.value + diff * self.config.factor;
        // At large offsets the step can round away to nothing
        if next == self.value {
            self.value = self.target;
            return false;
        }
        self.value = next;
        true
    }
}
