use foundation::time::Time;

/// Longest frame step the animation will integrate in one go.
pub const MAX_FRAME_DT_S: f64 = 0.1;

/// Frame metadata derived from display-refresh timestamps.
///
/// The browser hands every animation callback a monotonic timestamp; the
/// frame keeps the index, the clamped step since the previous callback and
/// the raw time, so replaying the same timestamps gives the same frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Seconds since the previous frame, clamped to `[0, MAX_FRAME_DT_S]`.
    pub dt_s: f64,
    /// Timestamp of this frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn first(time: Time) -> Self {
        Self {
            index: 0,
            dt_s: 0.0,
            time,
        }
    }

    /// Frame for timestamp `time`, following `self`.
    pub fn next(self, time: Time) -> Self {
        let raw = time.seconds() - self.time.seconds();
        let dt_s = if raw.is_finite() {
            raw.clamp(0.0, MAX_FRAME_DT_S)
        } else {
            0.0
        };
        Self {
            index: self.index + 1,
            dt_s,
            time,
        }
    }

    pub fn from_millis(prev: Option<Frame>, timestamp_ms: f64) -> Self {
        let time = Time(timestamp_ms / 1000.0);
        match prev {
            Some(prev) => prev.next(time),
            None => Self::first(time),
        }
    }
}
