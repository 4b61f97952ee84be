/// Number of raw arrivals per kept tuple: `round(native / target)`, never below 1.
///
/// Hardware slower than the target gets ratio 1 (keep everything) instead of 0.
pub fn decimation_ratio(native_rate_hz: f32, target_rate_hz: f32) -> u32 {
    let ratio = (native_rate_hz / target_rate_hz).round();
    if ratio.is_finite() && ratio >= 1.0 {
        ratio as u32
    } else {
        1
    }
}
/// Per-channel counter gating which raw arrivals are kept.
///
/// Starts at 1. A channel is due once the count reaches the ratio; acceptance resets it to 1
/// and every arrival ticks it afterwards, so after the first tuple a channel is due every
/// `ratio - 1` arrivals. The count saturates at the ratio, which keeps it in `[1, ratio]`
/// while a failing channel waits to be read again.
///
/// The effective output rate is therefore `native / (ratio - 1)` for ratios above 1, not
/// `native / ratio`: 119 Hz at ratio 7 yields about 19.8 Hz, so a 200-tuple window spans
/// roughly 10.1 s rather than 11.8 s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkipCounter {
    ratio: u32,
    count: u32,
}
impl SkipCounter {
    pub fn new(ratio: u32) -> Self {
        Self {
            ratio: ratio.max(1),
            count: 1,
        }
    }
    pub fn ratio(&self) -> u32 {
        self.ratio
    }
    pub fn count(&self) -> u32 {
        self.count
    }
    pub fn is_due(&self) -> bool {
        self.count >= self.ratio
    }
    pub fn reset(&mut self) {
        self.count = 1;
    }
    pub fn tick(&mut self) {
        self.count = (self.count + 1).min(self.ratio);
    }
}
