//! Response envelopes for `issue_tracker`.
//!
//! Issues themselves serialize as-is; these types wrap the outcome of
//! update and delete, and every store error:
//! - [`ActionResult`] - `{"result": .., "_id": ..}`
//! - [`ErrorBody`] - `{"error": .., "_id"?: ..}`

mod output;

pub use output::{ActionResult, ErrorBody};
