//! RFC 6238 moving factor: `T = floor((now - T0) / X)`.

use time::{Duration, OffsetDateTime};

use crate::error::DeriveError;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Time elapsed since `epoch` and the step width, both in nanoseconds.
fn elapsed_and_step(
    timestamp: OffsetDateTime,
    time_step: Duration,
    epoch: OffsetDateTime,
) -> Result<(i128, i128), DeriveError> {
    if !time_step.is_positive() {
        return Err(DeriveError::InvalidTimeStep(time_step));
    }
    let elapsed = timestamp - epoch;
    if elapsed.is_negative() {
        return Err(DeriveError::TimeBeforeEpoch(epoch - timestamp));
    }
    Ok((elapsed.whole_nanoseconds(), time_step.whole_nanoseconds()))
}

/// Number of whole `time_step` windows between `epoch` and `timestamp`.
pub fn derive_counter(
    timestamp: OffsetDateTime,
    time_step: Duration,
    epoch: OffsetDateTime,
) -> Result<u64, DeriveError> {
    let (elapsed, step) = elapsed_and_step(timestamp, time_step, epoch)?;
    u64::try_from(elapsed / step).map_err(|_| DeriveError::CounterOverflow)
}

/// How long the window containing `timestamp` stays open.
pub fn time_remaining(
    timestamp: OffsetDateTime,
    time_step: Duration,
    epoch: OffsetDateTime,
) -> Result<Duration, DeriveError> {
    let (elapsed, step) = elapsed_and_step(timestamp, time_step, epoch)?;
    let remaining = step - elapsed % step;
    // Never longer than `time_step`, so both parts fit.
    Ok(Duration::new(
        (remaining / NANOS_PER_SECOND) as i64,
        (remaining % NANOS_PER_SECOND) as i32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn unix(secs: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(secs).unwrap()
    }

    #[test]
    fn counter_steps_every_window() {
        let step = Duration::seconds(30);
        let epoch = OffsetDateTime::UNIX_EPOCH;
        assert_eq!(derive_counter(unix(0), step, epoch), Ok(0));
        assert_eq!(derive_counter(unix(29), step, epoch), Ok(0));
        assert_eq!(derive_counter(unix(30), step, epoch), Ok(1));
        assert_eq!(derive_counter(unix(59), step, epoch), Ok(1));
        assert_eq!(derive_counter(unix(60), step, epoch), Ok(2));
        assert_eq!(derive_counter(unix(1_111_111_109), step, epoch), Ok(0x023523EC));
        assert_eq!(derive_counter(unix(20_000_000_000), step, epoch), Ok(0x27BC86AA));
    }

    #[test]
    fn counter_floors_sub_second_time() {
        let at = unix(59) + Duration::milliseconds(999);
        assert_eq!(derive_counter(at, Duration::seconds(30), OffsetDateTime::UNIX_EPOCH), Ok(1));
        let at = unix(60) - Duration::nanoseconds(1);
        assert_eq!(derive_counter(at, Duration::seconds(30), OffsetDateTime::UNIX_EPOCH), Ok(1));
    }

    #[test]
    fn custom_epoch_shifts_the_counter() {
        let epoch = datetime!(2020-01-01 0:00 UTC);
        let at = datetime!(2020-01-01 0:01:30 UTC);
        assert_eq!(derive_counter(at, Duration::seconds(30), epoch), Ok(3));
        assert_eq!(derive_counter(epoch, Duration::seconds(30), epoch), Ok(0));
    }

    #[test]
    fn time_before_epoch_is_rejected() {
        let step = Duration::seconds(30);
        for offset in [1, 29, 30, 31, 86_400, 1_000_000_000] {
            assert_eq!(
                derive_counter(unix(-offset), step, OffsetDateTime::UNIX_EPOCH),
                Err(DeriveError::TimeBeforeEpoch(Duration::seconds(offset)))
            );
        }
        let just_before = OffsetDateTime::UNIX_EPOCH - Duration::nanoseconds(1);
        assert!(matches!(
            derive_counter(just_before, step, OffsetDateTime::UNIX_EPOCH),
            Err(DeriveError::TimeBeforeEpoch(_))
        ));
    }

    #[test]
    fn non_positive_time_step_is_rejected() {
        for step in [Duration::ZERO, Duration::seconds(-30), Duration::nanoseconds(-1)] {
            assert_eq!(
                derive_counter(unix(59), step, OffsetDateTime::UNIX_EPOCH),
                Err(DeriveError::InvalidTimeStep(step))
            );
        }
    }

    #[test]
    fn time_step_is_checked_before_epoch() {
        assert_eq!(
            derive_counter(unix(-5), Duration::ZERO, OffsetDateTime::UNIX_EPOCH),
            Err(DeriveError::InvalidTimeStep(Duration::ZERO))
        );
    }

    #[test]
    fn counter_overflow_is_reported() {
        let far = datetime!(9999-12-31 23:59:59 UTC);
        assert_eq!(
            derive_counter(far, Duration::nanoseconds(1), OffsetDateTime::UNIX_EPOCH),
            Err(DeriveError::CounterOverflow)
        );
    }

    #[test]
    fn remaining_time_counts_down_to_next_window() {
        let step = Duration::seconds(30);
        let epoch = OffsetDateTime::UNIX_EPOCH;
        assert_eq!(time_remaining(unix(0), step, epoch), Ok(Duration::seconds(30)));
        assert_eq!(time_remaining(unix(1), step, epoch), Ok(Duration::seconds(29)));
        assert_eq!(time_remaining(unix(29), step, epoch), Ok(Duration::seconds(1)));
        assert_eq!(time_remaining(unix(30), step, epoch), Ok(Duration::seconds(30)));
        assert_eq!(
            time_remaining(unix(59) + Duration::milliseconds(500), step, epoch),
            Ok(Duration::milliseconds(500))
        );
    }
}
