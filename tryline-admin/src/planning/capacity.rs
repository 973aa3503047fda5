//! Capacity arithmetic for wave planning
//!
//! Pure calculations, isolated from I/O. Inputs are fetched fresh by the
//! caller on every planning operation; nothing here is persisted.

/// How many sessions one wave needs to hold every active athlete.
///
/// Ceiling division: a partially filled final session is expected. A
/// cohort with no capacity configured (`session_capacity <= 0`) cannot be
/// planned, yielding 0 rather than a division error.
///
/// # Examples
/// ```
/// use tryline_admin::planning::capacity::sessions_per_wave;
///
/// // 45 athletes at 20 per session need 3 sessions per wave
/// assert_eq!(sessions_per_wave(45, 20), 3);
///
/// // Unconfigured capacity yields 0, never a division error
/// assert_eq!(sessions_per_wave(45, 0), 0);
/// ```
pub fn sessions_per_wave(player_count: i64, session_capacity: i64) -> i64 {
    if session_capacity <= 0 || player_count <= 0 {
        return 0;
    }
    (player_count + session_capacity - 1) / session_capacity
}

/// Wave number (1-based) for the session at zero-based chronological
/// position `index`, with `sessions_per_wave` sessions per bucket.
///
/// Only meaningful for `sessions_per_wave > 0`; callers guard first.
pub fn proposed_wave_number(index: usize, sessions_per_wave: i64) -> i64 {
    (index as i64) / sessions_per_wave + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_per_wave_rounds_up() {
        assert_eq!(sessions_per_wave(45, 20), 3);
        assert_eq!(sessions_per_wave(40, 20), 2);
        assert_eq!(sessions_per_wave(41, 20), 3);
        assert_eq!(sessions_per_wave(1, 20), 1);
    }

    #[test]
    fn test_sessions_per_wave_zero_capacity() {
        assert_eq!(sessions_per_wave(45, 0), 0);
        assert_eq!(sessions_per_wave(0, 0), 0);
    }

    #[test]
    fn test_sessions_per_wave_zero_players() {
        assert_eq!(sessions_per_wave(0, 20), 0);
    }

    #[test]
    fn test_proposed_wave_numbers_bucket_chronologically() {
        // 5 sessions at 2 per wave: [1, 1, 2, 2, 3]
        let numbers: Vec<i64> = (0..5).map(|i| proposed_wave_number(i, 2)).collect();
        assert_eq!(numbers, vec![1, 1, 2, 2, 3]);
    }

    #[test]
    fn test_proposed_wave_numbers_exact_fill() {
        // 8 sessions at 4 per wave: [1, 1, 1, 1, 2, 2, 2, 2]
        let numbers: Vec<i64> = (0..8).map(|i| proposed_wave_number(i, 4)).collect();
        assert_eq!(numbers, vec![1, 1, 1, 1, 2, 2, 2, 2]);
    }
}
