//! `tracker-lib` - In-memory, multi-tenant issue record store.
//!
//! Issues are partitioned by project and kept in creation order. The store
//! offers four operations (create, query, update, delete) whose failures are
//! ordinary values of [`TrackerError`], never panics.
//!
//! # Quick Start
//!
//! ```
//! use tracker_lib::{FieldBag, InMemoryStore, IssueUpdate, ListFilters, NewIssue};
//!
//! let mut store = InMemoryStore::new();
//!
//! // Create
//! let fields = FieldBag::from_pairs([
//!     ("issue_title", "Broken link"),
//!     ("issue_text", "The footer link 404s"),
//!     ("created_by", "sam"),
//! ]);
//! let issue = store.create_issue("website", &NewIssue::from_fields(&fields)).unwrap();
//!
//! // Update
//! let patch = FieldBag::from_pairs([("_id", issue.id.as_str()), ("open", "false")]);
//! store.update_issue("website", &IssueUpdate::from_fields(&patch)).unwrap();
//!
//! // Query
//! let closed = store.list_issues("website", &ListFilters::from_pairs([("open", "false")]));
//! assert_eq!(closed.len(), 1);
//!
//! // Delete
//! store.delete_issue("website", Some(issue.id.as_str())).unwrap();
//! assert!(store.resolve("website").is_empty());
//! ```

pub mod error;
pub mod fields;
pub mod fixture;
pub mod model;
pub mod query;
pub mod store;
pub mod util;

pub use error::{ErrorKind, Result, TrackerError};
pub use fields::{FieldBag, IssueUpdate, NewIssue};
pub use model::Issue;
pub use query::{FieldFilter, ListFilters};
pub use store::{InMemoryStore, find_issue};
