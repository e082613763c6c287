//! Shared constants for end-to-end tests
//!
//! When test data changes (user credentials, song titles, etc.),
//! update only this file.

// ============================================================================
// Test User Credentials
// ============================================================================

/// Regular test user
pub const TEST_USER: &str = "testuser";
pub const TEST_EMAIL: &str = "testuser@example.com";
pub const TEST_PASS: &str = "testpass123";

/// A second user, used for ownership checks
pub const OTHER_USER: &str = "otheruser";
pub const OTHER_EMAIL: &str = "otheruser@example.com";
pub const OTHER_PASS: &str = "otherpass123";

// ============================================================================
// Test Songs
// ============================================================================

/// Songs owned by the test user, created in this order.
pub const SONG_1_TITLE: &str = "Bohemian Rhapsody";
pub const SONG_1_ARTIST: &str = "Queen";
pub const SONG_1_ALBUM: &str = "A Night at the Opera";

pub const SONG_2_TITLE: &str = "Hotel California";
pub const SONG_2_ARTIST: &str = "Eagles";

pub const SONG_3_TITLE: &str = "Imagine";
pub const SONG_3_ARTIST: &str = "John Lennon";

/// Playlist owned by the test user, holding songs 1 and 2.
pub const PLAYLIST_NAME: &str = "Road Trip";

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for the server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between readiness polls
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

/// Timeout for individual HTTP requests
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
