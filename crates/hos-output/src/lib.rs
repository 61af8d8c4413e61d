//! `hos-output`: persistence for the records a trip produces.
//!
//! Three backends implement [`TripStore`]:
//!
//! | Feature   | Backend       | Storage                                                         |
//! |-----------|---------------|-----------------------------------------------------------------|
//! | *(none)*  | [`MemoryStore`] | ordered maps, process lifetime                                |
//! | *(none)*  | [`CsvStore`]  | `waypoints_<route>.csv`, `log_entries_<trip>.csv`, `daily_logs_<trip>.csv` |
//! | `sqlite`  | `SqliteStore` | `trips.db`                                                      |
//!
//! Every backend flattens records into the row types of [`row`], so a trip
//! saved by one backend loads identically from another.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hos_output::{CsvStore, TripStore};
//!
//! let mut store = CsvStore::new(Path::new("./output"))?;
//! store.save_log_entries(trip_id, &timeline.entries)?;
//! store.save_daily_logs(trip_id, &timeline.daily_logs)?;
//! ```

pub mod csv;
pub mod error;
pub mod memory;
pub mod row;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvStore;
pub use error::{OutputError, OutputResult};
pub use memory::MemoryStore;
pub use row::{DailyLogRow, LogEntryRow, WaypointRow};
pub use store::TripStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
