//! # Weekplan Core Library
//!
//! Record model and table logic for a small team planner: weekly tasks, a
//! backlog of on-hold projects and a daily support rotation, each persisted as
//! a flat CSV file that is read whole, edited in memory and written back whole.
//!
//! ## Core Modules
//!
//! - [`store`]: CSV record store, id assignment and legacy-id backfill
//! - [`propagation`]: carrying unfinished tasks into a newly created week
//! - [`partition`]: week/member filtering and partition merge-back
//! - [`support`]: support rotation lookup, bulk assignment and statistics
//! - [`calendar`]: planning-week arithmetic and year progress
//! - [`repository`]: session-scoped state handle over all tables
//! - [`models`]: records and transfer objects
//! - [`error`]: error type shared by every operation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use weekplan_core::models::NewTaskData;
//! use weekplan_core::repository::{CsvRepository, DataPaths, Repository, TaskRepository, WeekRepository};
//!
//! fn main() -> Result<(), weekplan_core::error::CoreError> {
//!     let mut repo = CsvRepository::open(&DataPaths::in_dir("data"), 2026)?;
//!
//!     // Open week 2, carrying over week 1's unfinished tasks
//!     repo.create_week(2)?;
//!     repo.add_task(NewTaskData {
//!         week: 2,
//!         team_member: "Alice".to_string(),
//!         label: "Release".to_string(),
//!         description: "Cut the 2.0 release".to_string(),
//!         status: None,
//!     })?;
//!
//!     repo.commit()?;
//!     Ok(())
//! }
//! ```

pub mod calendar;
pub mod error;
pub mod models;
pub mod partition;
pub mod propagation;
pub mod repository;
pub mod store;
pub mod support;
