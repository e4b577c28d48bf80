//! Multi-channel waypoint sequencer.
//!
//! Provides [`Sequencer`], which owns a fixed set of [`ServoChannel`]s and plays
//! an ordered list of [`Waypoint`]s across all of them in lockstep: the next
//! waypoint only starts once every channel has landed on its current target.

use crate::channel::ServoChannel;
use crate::command::SequencerAction;
use crate::ease::EasingKind;
use crate::output::ServoOutput;
use crate::waypoint::Waypoint;

/// The current state of a sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerState {
    /// No waypoints. Channels hold their angles.
    Idle,
    /// Moving through the playlist.
    Playing,
    /// Non-looping playlist exhausted. Channels hold the last waypoint.
    /// Permanent: `load` and `restart` no longer apply.
    Finished,
}

/// Errors that can occur during sequencer commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerError {
    /// The addressed channel does not exist.
    InvalidChannel {
        /// Requested channel index
        index: usize,
        /// Number of channels in the sequencer
        count: usize,
    },
}

impl core::fmt::Display for SequencerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequencerError::InvalidChannel { index, count } => {
                write!(
                    f,
                    "channel {} does not exist, sequencer has {} channels",
                    index, count
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequencerError {}

/// Plays waypoints across a fixed set of servo channels.
///
/// Designed to be ticked from a periodic timer interrupt. [`tick`](Self::tick)
/// never blocks or allocates. Commands issued from another execution context
/// (such as [`handle_action`](Self::handle_action)) must not race a concurrent
/// `tick`: either issue them from the tick context or wrap both in the same
/// critical section.
///
/// # Type Parameters
/// * `'w` - Lifetime of the borrowed waypoint list
/// * `O` - Output implementation (same for all channels)
/// * `C` - Number of channels
pub struct Sequencer<'w, O: ServoOutput, const C: usize> {
    channels: [ServoChannel<O>; C],
    waypoints: &'w [Waypoint<C>],
    index: usize,
    looping: bool,
    active: bool,
}

impl<'w, O: ServoOutput, const C: usize> Sequencer<'w, O, C> {
    /// Binds channels to a playlist and starts its first waypoint.
    ///
    /// An empty playlist yields a permanently idle sequencer whose channels
    /// keep holding their current angles.
    pub fn new(channels: [ServoChannel<O>; C], waypoints: &'w [Waypoint<C>], looping: bool) -> Self {
        let mut sequencer = Self {
            channels,
            waypoints,
            index: 0,
            looping,
            active: false,
        };
        sequencer.begin();
        sequencer
    }

    /// Handles a sequencer action by dispatching to the appropriate method.
    ///
    /// # Returns
    /// * `Ok(SequencerState)` - State after the action
    /// * `Err` - The action addressed a channel that does not exist
    pub fn handle_action(
        &mut self,
        action: SequencerAction<'w, C>,
    ) -> Result<SequencerState, SequencerError> {
        match action {
            SequencerAction::Load { waypoints, looping } => Ok(self.load(waypoints, looping)),
            SequencerAction::Restart => Ok(self.restart()),
            SequencerAction::Move {
                channel,
                target,
                duration_ms,
                ease,
            } => {
                self.move_channel(channel, target, duration_ms, ease)?;
                Ok(self.state())
            }
        }
    }

    /// Replaces the playlist and starts its first waypoint.
    ///
    /// Only takes effect while playing. An idle or finished sequencer stays
    /// inactive for good. Channels begin the new segment from wherever they
    /// currently are.
    pub fn load(&mut self, waypoints: &'w [Waypoint<C>], looping: bool) -> SequencerState {
        if self.active {
            self.waypoints = waypoints;
            self.looping = looping;
            self.begin();
        }
        self.state()
    }

    /// Plays the current playlist again from its first waypoint.
    ///
    /// Only takes effect while playing, like [`load`](Self::load).
    pub fn restart(&mut self) -> SequencerState {
        if self.active {
            self.begin();
        }
        self.state()
    }

    /// Re-targets a single channel, starting from its current angle.
    ///
    /// While playing, the sequencer will not advance until this channel lands
    /// too. The next waypoint overrides the target as usual.
    ///
    /// # Errors
    /// * `InvalidChannel` - `channel` is not below `C`
    pub fn move_channel(
        &mut self,
        channel: usize,
        target: f32,
        duration_ms: u32,
        ease: EasingKind,
    ) -> Result<(), SequencerError> {
        let servo = self
            .channels
            .get_mut(channel)
            .ok_or(SequencerError::InvalidChannel {
                index: channel,
                count: C,
            })?;

        servo.start_move(target, duration_ms, ease);
        Ok(())
    }

    /// Advances every channel by one tick, then moves to the next waypoint
    /// once all channels are idle.
    ///
    /// Channels are ticked in every state so the outputs keep being refreshed
    /// after the playlist ends.
    pub fn tick(&mut self) -> SequencerState {
        for channel in self.channels.iter_mut() {
            channel.tick();
        }

        if self.active && self.channels.iter().all(ServoChannel::is_idle) {
            self.advance();
        }

        self.state()
    }

    fn begin(&mut self) {
        self.index = 0;
        self.active = !self.waypoints.is_empty();

        if self.active {
            self.start_waypoint();
        }
    }

    fn advance(&mut self) {
        self.index += 1;

        if self.index >= self.waypoints.len() {
            if !self.looping {
                #[cfg(feature = "defmt")]
                defmt::debug!("playlist finished after {} waypoints", self.waypoints.len());

                self.active = false;
                return;
            }

            #[cfg(feature = "defmt")]
            defmt::debug!("playlist wrapped");

            self.index = 0;
        }

        self.start_waypoint();
    }

    fn start_waypoint(&mut self) {
        let Some(waypoint) = self.waypoints.get(self.index).copied() else {
            self.active = false;
            return;
        };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "waypoint {}: {} ms, {}",
            self.index,
            waypoint.duration_ms,
            waypoint.ease
        );

        for (channel, target) in self.channels.iter_mut().zip(waypoint.targets) {
            channel.start_move(target, waypoint.duration_ms, waypoint.ease);
        }
    }

    /// Returns the current state of the sequencer.
    pub fn state(&self) -> SequencerState {
        if self.active {
            SequencerState::Playing
        } else if self.waypoints.is_empty() {
            SequencerState::Idle
        } else {
            SequencerState::Finished
        }
    }

    /// Returns true while the playlist is playing.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true if the playlist wraps around at its end.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Returns the index of the waypoint being played.
    ///
    /// Only meaningful while active; equals the waypoint count once finished.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the number of waypoints in the playlist.
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Returns the waypoint being played, if active.
    pub fn current_waypoint(&self) -> Option<&Waypoint<C>> {
        if self.active {
            self.waypoints.get(self.index)
        } else {
            None
        }
    }

    /// Returns the channel at `index`.
    pub fn channel(&self, index: usize) -> Option<&ServoChannel<O>> {
        self.channels.get(index)
    }

    /// Returns all channels.
    pub fn channels(&self) -> &[ServoChannel<O>; C] {
        &self.channels
    }

    /// Returns the current angle of every channel.
    pub fn angles(&self) -> [f32; C] {
        core::array::from_fn(|i| self.channels[i].angle())
    }

    /// Consumes the sequencer and returns its channels.
    pub fn into_channels(self) -> [ServoChannel<O>; C] {
        self.channels
    }
}
