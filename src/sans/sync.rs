//! Start-of-frame marker detection.

/// First byte of the marker pair opening every frame.
pub const MARKER_A: u8 = 0xB5;
/// Second byte of the marker pair opening every frame.
pub const MARKER_B: u8 = 0x62;

/// Synchronizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Scanning for [`MARKER_A`].
    #[default]
    WaitingForMarkerA,
    /// [`MARKER_A`] was seen; scanning for [`MARKER_B`].
    WaitingForMarkerB,
}

/// Transition taken by the synchronizer on a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    /// A potential frame start. Any previous frame is complete.
    MarkerA,
    /// The marker pair is complete.
    MarkerB,
    /// No transition.
    None,
}

/// Two-state scanner for the start-of-frame marker pair.
///
/// Once [`MARKER_A`] is seen, every byte other than [`MARKER_B`] leaves the
/// scanner waiting for it. Conversely, a [`MARKER_A`] byte arriving while
/// waiting for [`MARKER_A`] is reported even if it falls inside a payload;
/// frame boundaries are only as reliable as the stream.
#[derive(Debug, Default)]
pub struct Synchronizer {
    state: SyncState,
}

impl Synchronizer {
    /// Create a synchronizer waiting for [`MARKER_A`].
    pub const fn new() -> Self {
        Self {
            state: SyncState::WaitingForMarkerA,
        }
    }

    /// Advance over a single byte.
    pub fn advance(&mut self, byte: u8) -> SyncEvent {
        match (self.state, byte) {
            (SyncState::WaitingForMarkerA, MARKER_A) => {
                self.state = SyncState::WaitingForMarkerB;
                SyncEvent::MarkerA
            }
            (SyncState::WaitingForMarkerB, MARKER_B) => {
                self.state = SyncState::WaitingForMarkerA;
                SyncEvent::MarkerB
            }
            _ => SyncEvent::None,
        }
    }

    /// Return to waiting for [`MARKER_A`].
    pub fn reset(&mut self) {
        self.state = SyncState::WaitingForMarkerA;
    }

    pub fn state(&self) -> SyncState {
        self.state
    }
}
