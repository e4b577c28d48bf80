//! Keyframes and fixed-capacity keyframe storage.

use crate::ease::EasingKind;
use heapless::Vec;

/// A single keyframe shared by all channels of a sequencer.
///
/// # Type Parameters
/// * `C` - Number of channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint<const C: usize> {
    /// Target angle for each channel, by channel index.
    pub targets: [f32; C],

    /// Segment duration in milliseconds.
    pub duration_ms: u32,

    /// Easing applied to every channel during this segment.
    pub ease: EasingKind,
}

impl<const C: usize> Waypoint<C> {
    /// Creates a new waypoint.
    #[inline]
    pub const fn new(targets: [f32; C], duration_ms: u32, ease: EasingKind) -> Self {
        Self {
            targets,
            duration_ms,
            ease,
        }
    }
}

/// Playlist construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaylistError {
    /// Playlist capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for PlaylistError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlaylistError::CapacityExceeded => write!(f, "playlist capacity exceeded"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlaylistError {}

/// An owned, fixed-capacity list of waypoints.
///
/// For playlists that are not kept in a `static` slice. The sequencer borrows
/// the waypoints through [`as_slice`](Self::as_slice), so a playlist must
/// outlive the sequencer playing it.
///
/// # Type Parameters
/// * `C` - Number of channels
/// * `N` - Maximum number of waypoints
#[derive(Debug, Clone)]
pub struct Playlist<const C: usize, const N: usize> {
    waypoints: Vec<Waypoint<C>, N>,
}

impl<const C: usize, const N: usize> Playlist<C, N> {
    /// Creates an empty playlist.
    pub fn new() -> Self {
        Self {
            waypoints: Vec::new(),
        }
    }

    /// Appends a waypoint, builder style.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The playlist already holds `N` waypoints
    pub fn waypoint(
        mut self,
        targets: [f32; C],
        duration_ms: u32,
        ease: EasingKind,
    ) -> Result<Self, PlaylistError> {
        self.push(Waypoint::new(targets, duration_ms, ease))?;
        Ok(self)
    }

    /// Appends a waypoint.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The playlist already holds `N` waypoints
    pub fn push(&mut self, waypoint: Waypoint<C>) -> Result<(), PlaylistError> {
        self.waypoints
            .push(waypoint)
            .map_err(|_| PlaylistError::CapacityExceeded)
    }

    /// Removes every waypoint.
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Returns the waypoints in playback order.
    pub fn as_slice(&self) -> &[Waypoint<C>] {
        &self.waypoints
    }

    /// Returns the number of waypoints.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Returns true if the playlist has no waypoints.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Returns the waypoint at `index`.
    pub fn get(&self, index: usize) -> Option<&Waypoint<C>> {
        self.waypoints.get(index)
    }

    /// Total duration of one pass through the playlist, in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.waypoints.iter().map(|w| w.duration_ms as u64).sum()
    }
}

impl<const C: usize, const N: usize> Default for Playlist<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const C: usize, const N: usize> core::ops::Deref for Playlist<C, N> {
    type Target = [Waypoint<C>];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}
