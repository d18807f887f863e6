//! Application-wide constants

/// Email draft shown when a session starts or is reset.
pub const DEFAULT_EMAIL: &str = "Hi team,

I'd like to schedule a brainstorming session for next Tuesday at 11am. I think it's important we move quickly on this project, so please plan to attend. The session will be in the main conference room.

Best,
Alex";

/// Error message display duration in seconds before auto-dismiss.
pub const ERROR_TTL_SECS: u64 = 8;

/// Input poll timeout while an analysis is running (keeps the spinner moving).
pub const POLL_BUSY_MS: u64 = 50;

/// Input poll timeout when idle.
pub const POLL_IDLE_MS: u64 = 150;

/// Spinner animation frame duration in milliseconds.
pub const SPINNER_FRAME_MS: u128 = 80;

/// Width share of the email draft column (the rest is reflection support).
pub const DRAFT_COLUMN_PERCENT: u16 = 60;

/// Below this width the two columns are stacked vertically.
pub const MIN_SIDE_BY_SIDE_WIDTH: u16 = 100;

/// Height of the "Your Reflection" field, including borders.
pub const REFLECTION_FIELD_HEIGHT: u16 = 6;
