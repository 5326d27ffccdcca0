pub const DEFAULT_MIN: u32 = 1;
pub const DEFAULT_MAX: u32 = 9;

/// Bounded quantity widget shared by every configurator. The value never
/// leaves `[min, max]`: direct input is clamped, steps saturate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    value: u32,
    min: u32,
    max: u32,
}

impl Amount {
    pub fn new() -> Self {
        Self::with_bounds(DEFAULT_MIN, DEFAULT_MAX)
    }

    /// Bounds are per widget instance. Invariant: `min <= max`.
    pub fn with_bounds(min: u32, max: u32) -> Self {
        debug_assert!(min <= max);
        Self {
            value: min,
            min,
            max,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Set the value, clamping silently into the bounds. Out-of-range
    /// input is a UI bounds issue, not a logic fault, so it never errors.
    pub fn set(&mut self, value: u32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn increment(&mut self) {
        if self.value < self.max {
            self.value += 1;
        }
    }

    pub fn decrement(&mut self) {
        if self.value > self.min {
            self.value -= 1;
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_min() {
        let amount = Amount::new();
        assert_eq!(amount.value(), DEFAULT_MIN);
    }

    #[test]
    fn set_clamps_into_bounds() {
        let mut amount = Amount::new();

        amount.set(99);
        assert_eq!(amount.value(), DEFAULT_MAX);

        amount.set(0);
        assert_eq!(amount.value(), DEFAULT_MIN);

        amount.set(4);
        assert_eq!(amount.value(), 4);
    }

    #[test]
    fn steps_saturate_at_bounds() {
        let mut amount = Amount::with_bounds(1, 3);

        amount.decrement();
        assert_eq!(amount.value(), 1);

        amount.increment();
        amount.increment();
        amount.increment();
        assert_eq!(amount.value(), 3);

        amount.increment();
        assert_eq!(amount.value(), 3);
    }
}
