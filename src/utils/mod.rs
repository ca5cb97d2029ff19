mod time_utils;

pub use time_utils::{MS_IN_S, epoch_ms_to_clock, format_countdown, now_timestamp_ms};
