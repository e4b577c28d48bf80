//! Command-based control for sequencers.
//!
//! Actions let a foreground task describe a change that the tick context
//! applies with [`Sequencer::handle_action`](crate::Sequencer::handle_action),
//! for example after receiving them through a channel or a critical-section
//! guarded mailbox.

use crate::ease::EasingKind;
use crate::waypoint::Waypoint;

/// Actions for controlling sequencers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequencerAction<'w, const C: usize> {
    /// Replace the playlist and start it from its first waypoint.
    ///
    /// Ignored unless the sequencer is playing.
    Load {
        waypoints: &'w [Waypoint<C>],
        looping: bool,
    },
    /// Play the current playlist again from its first waypoint.
    ///
    /// Ignored unless the sequencer is playing.
    Restart,
    /// Re-target one channel, starting from wherever it is now.
    Move {
        channel: usize,
        target: f32,
        duration_ms: u32,
        ease: EasingKind,
    },
}
