//! Client for GUAP's timetable API that answers whether a room is free.
//!
//! ```no_run
//! use guap_rasp::{RaspClient, Search};
//!
//! # async fn run() -> Result<(), guap_rasp::RaspError> {
//! let room = Search::new(RaspClient::new()?)
//!     .select_building("Ленсовета 14")
//!     .await?
//!     .select_room("14-09")
//!     .await?;
//! let monday = room.select_day("Понедельник")?;
//!
//! for slot in 1..=6 {
//!     println!("{slot}: {}", monday.select_slot(slot).evaluate_occupancy());
//! }
//! # Ok(())
//! # }
//! ```

pub mod rasp;

pub use rasp::*;
