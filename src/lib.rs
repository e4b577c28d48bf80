#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`EasingKind`**: The curve shaping a segment (`Linear`, `CosineS`, `CubicS`)
//! - **`ServoChannel`**: Moves one servo toward a target over a whole number of ticks
//! - **`ChannelConfig`**: Angle bounds, tick rate and default easing of a channel
//! - **`Waypoint`**: Per-channel target angles + duration + easing for one segment
//! - **`Playlist`**: Fixed-capacity owned list of waypoints
//! - **`Sequencer`**: Plays waypoints across all channels in lockstep
//! - **`ServoOutput`**: Trait to implement for your servo hardware
//! - **`PulseRange`**: Angle to pulse-width mapping for common hobby servos
//! - **`SequencerAction`**: Commands that can be sent to control sequencers
//!
//! Angles are `f32` degrees. Everything is driven by calling `tick` at a fixed
//! rate, typically from a timer interrupt; nothing in the tick path allocates,
//! blocks or fails.

pub mod time;
pub mod ease;
pub mod output;
pub mod channel;
pub mod waypoint;
pub mod sequencer;
pub mod command;

pub use channel::{ChannelConfig, ServoChannel};
pub use command::SequencerAction;
pub use ease::EasingKind;
#[cfg(feature = "embedded-hal")]
pub use output::PwmServo;
pub use output::{PulseRange, ServoOutput};
pub use sequencer::{Sequencer, SequencerError, SequencerState};
pub use time::TickRate;
pub use waypoint::{Playlist, PlaylistError, Waypoint};
