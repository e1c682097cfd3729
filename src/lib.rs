//! Trial-aligned extraction of calcium-imaging sessions.
//!
//! A [`Session`](extract::Session) exposes fluorescence, pupil, running and
//! derived rate signals on one time base, plus stimulus tables. The extraction
//! routines slice every signal at each trial window and group the slices by
//! stimulus condition.
//!
//! ```
//! use stimslice::extract::{extract_natural_scenes, Segments};
//! use stimslice::synthetic::SyntheticSession;
//! use stimslice::types::TraceKind;
//!
//! let session = SyntheticSession::default().build();
//! let out = extract_natural_scenes::<Segments, _>(&session, TraceKind::Dff).unwrap();
//! for (_, trials) in out.tables.fluorescence.iter() {
//!     assert!(trials.iter().all(|t| t.ncols() == 7));
//! }
//! ```
pub mod config;
pub mod extract;
pub mod synthetic;
pub mod types;
