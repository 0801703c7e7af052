//! Cooldown between unprivileged command executions

use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

/// Default cooldown between user commands (10 minutes)
pub const COMMAND_COOLDOWN: Duration = Duration::from_millis(600_000);

/// Tracks when the last user command ran.
///
/// This is a passive comparison against the wall clock; nothing is scheduled.
#[derive(Debug, Clone)]
pub struct CooldownClock {
    window: TimeDelta,
    last_user_command_at: Option<DateTime<Utc>>,
}

impl CooldownClock {
    pub fn new(window: Duration) -> Self {
        Self {
            window: TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX),
            last_user_command_at: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window.to_std().unwrap_or(Duration::MAX)
    }

    pub fn last_user_command_at(&self) -> Option<DateTime<Utc>> {
        self.last_user_command_at
    }

    /// Returns the remaining wait when `now` is still inside the window
    pub fn check(&self, now: DateTime<Utc>) -> Result<(), Duration> {
        let Some(last) = self.last_user_command_at else {
            return Ok(());
        };

        let elapsed = now.signed_duration_since(last);
        if elapsed >= self.window {
            Ok(())
        } else {
            let remaining = self
                .window
                .checked_sub(&elapsed)
                .map_or(Duration::MAX, |left| left.to_std().unwrap_or(Duration::ZERO));
            Err(remaining)
        }
    }

    /// Record a successful user command at `now`
    pub fn mark(&mut self, now: DateTime<Utc>) {
        self.last_user_command_at = Some(now);
    }
}

impl Default for CooldownClock {
    fn default() -> Self {
        Self::new(COMMAND_COOLDOWN)
    }
}
