use std::time::Duration;

/// Delay inserted after a failed attempt, with `attempt` counted from 1:
/// `2^attempt` seconds, so a five-attempt call sleeps 2, 4, 8 and 16
/// seconds between tries. Callers skip the delay after the final attempt.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt)
}
