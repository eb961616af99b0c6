use foundation::time::Time;

/// Per-frame metadata handed to the render loop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta time since the previous frame (seconds).
    pub dt_s: f64,
    /// Host time at the start of the frame.
    pub time: Time,
}

impl Frame {
    /// Frame for a host timestamp, following `prev` if there was one.
    pub fn from_timestamp(prev: Option<Frame>, timestamp_ms: f64) -> Self {
        let time = Time::from_ms(timestamp_ms);
        match prev {
            Some(p) => Self {
                index: p.index + 1,
                dt_s: (time.0 - p.time.0).max(0.0),
                time,
            },
            None => Self {
                index: 0,
                dt_s: 0.0,
                time,
            },
        }
    }
}
