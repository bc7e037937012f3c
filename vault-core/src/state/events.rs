//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameEvent {
    // Round lifecycle
    /// Secret generated and display cleared
    RoundReady,
    /// Supervising loop asked for a new round
    Restart,
    /// Round forced to end from outside
    Abort,

    // Player input
    /// Any button was released
    ButtonReleased,
    /// Confirmed guess matched the secret in all positions
    Solved,

    // Timers
    /// Countdown reached zero
    Timeout,
    /// Win display period elapsed
    WinDisplayElapsed,
    /// End-of-round feedback shown
    FeedbackDone,
}
