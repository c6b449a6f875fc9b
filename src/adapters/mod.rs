//! Adapter implementations for port traits.
//!
//! - `live/`: Gemini API client and terminal key selection
//! - `recording/`: record generator interactions to cassettes
//! - `replaying/`: replay generator interactions from cassettes

pub mod live;
pub mod recording;
pub mod replaying;
