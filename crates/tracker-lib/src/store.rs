//! In-memory issue store partitioned by project.
//!
//! Each project owns an ordered `Vec<Issue>` in creation order. A store-wide
//! id index keeps ids unique across projects; lookups inside a project are a
//! linear scan.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::error::{Result, TrackerError};
use crate::fields::{IssueUpdate, NewIssue};
use crate::model::Issue;
use crate::query::ListFilters;
use crate::util;

/// Locate `id` in `issues`, returning its position.
///
/// Ids are unique, so the first match by scan order is the match.
#[must_use]
pub fn find_issue(id: &str, issues: &[Issue]) -> Option<usize> {
    issues.iter().position(|issue| issue.id == id)
}

/// In-memory issue store.
///
/// All data lives in memory and is gone when the store is dropped. Callers
/// that share a store across threads must serialize access to it (one lock
/// around the whole store is enough).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    projects: HashMap<String, Vec<Issue>>,
    /// Issue id -> owning project.
    id_index: HashMap<String, String>,
}

impl InMemoryStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append pre-built records to `project`, keeping their ids and
    /// timestamps.
    ///
    /// Nothing is inserted unless every record is acceptable.
    ///
    /// # Errors
    ///
    /// Returns `IdCollision` if an id is already in the store or repeats
    /// within `issues`, `RequiredFieldsMissing` if a record lacks a required
    /// field, or `TimestampOrder` if `updated_on` precedes `created_on`.
    pub fn seed(&mut self, project: &str, issues: Vec<Issue>) -> Result<usize> {
        let mut seen = HashSet::new();
        for issue in &issues {
            if !issue.has_required_fields() {
                return Err(TrackerError::RequiredFieldsMissing);
            }
            if issue.updated_on < issue.created_on {
                return Err(TrackerError::TimestampOrder {
                    id: issue.id.clone(),
                });
            }
            if issue.id.is_empty()
                || self.id_exists(&issue.id)
                || !seen.insert(issue.id.as_str())
            {
                return Err(TrackerError::IdCollision {
                    id: issue.id.clone(),
                });
            }
        }

        let count = issues.len();
        for issue in &issues {
            self.id_index.insert(issue.id.clone(), project.to_string());
        }
        self.get_or_create(project).extend(issues);

        info!(project, count, "Seeded project");
        Ok(count)
    }

    // ========================================================================
    // Project Registry
    // ========================================================================

    /// Issues of `project` in creation order; empty if the project is unknown.
    ///
    /// Never creates the project.
    #[must_use]
    pub fn resolve(&self, project: &str) -> &[Issue] {
        self.projects.get(project).map_or(&[], Vec::as_slice)
    }

    /// Issues of `project`, creating an empty collection if needed.
    pub fn get_or_create(&mut self, project: &str) -> &mut Vec<Issue> {
        self.projects.entry(project.to_string()).or_default()
    }

    /// Names of projects holding at least one issue, sorted.
    #[must_use]
    pub fn project_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .projects
            .iter()
            .filter(|(_, issues)| !issues.is_empty())
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Create a new issue in `project`.
    ///
    /// # Errors
    ///
    /// Returns `RequiredFieldsMissing` if `issue_title`, `issue_text` or
    /// `created_by` is absent. The store is left untouched.
    pub fn create_issue(&mut self, project: &str, new: &NewIssue) -> Result<Issue> {
        let (Some(title), Some(text), Some(creator)) = (
            new.issue_title.as_deref(),
            new.issue_text.as_deref(),
            new.created_by.as_deref(),
        ) else {
            debug!(project, "Create rejected: required field(s) missing");
            return Err(TrackerError::RequiredFieldsMissing);
        };

        let now = util::now();
        let mut issue = Issue {
            assigned_to: new.assigned_to.clone().unwrap_or_default(),
            status_text: new.status_text.clone().unwrap_or_default(),
            open: true,
            id: String::new(),
            issue_title: title.to_string(),
            issue_text: text.to_string(),
            created_by: creator.to_string(),
            created_on: now,
            updated_on: now,
        };
        issue.id = util::generate_id(project, &issue, self.len(), |id| self.id_exists(id));

        self.id_index.insert(issue.id.clone(), project.to_string());
        self.get_or_create(project).push(issue.clone());

        info!(project, id = %issue.id, "Created issue");
        Ok(issue)
    }

    /// Apply a partial update to one issue of `project`.
    ///
    /// Supplied fields overwrite the stored ones, `updated_on` is refreshed,
    /// and the issue keeps its position. Returns the updated id.
    ///
    /// # Errors
    ///
    /// Checked in order: `MissingId` without an id, `NoUpdateFields` when no
    /// other key carries a value, `CouldNotUpdate` when the project or issue
    /// is unknown. Keys without a patchable slot pass validation but leave
    /// the record's fields as they were.
    pub fn update_issue(&mut self, project: &str, update: &IssueUpdate) -> Result<String> {
        let Some(id) = update.id.as_deref().filter(|id| !id.is_empty()) else {
            return Err(TrackerError::MissingId);
        };
        if update.is_empty() {
            return Err(TrackerError::NoUpdateFields { id: id.to_string() });
        }

        let not_found = || TrackerError::CouldNotUpdate { id: id.to_string() };
        let issues = self.projects.get_mut(project).ok_or_else(not_found)?;
        let idx = find_issue(id, issues).ok_or_else(not_found)?;
        let issue = &mut issues[idx];

        if let Some(ref title) = update.issue_title {
            issue.issue_title.clone_from(title);
        }
        if let Some(ref text) = update.issue_text {
            issue.issue_text.clone_from(text);
        }
        if let Some(ref creator) = update.created_by {
            issue.created_by.clone_from(creator);
        }
        if let Some(ref assignee) = update.assigned_to {
            issue.assigned_to.clone_from(assignee);
        }
        if let Some(ref status_text) = update.status_text {
            issue.status_text.clone_from(status_text);
        }
        if let Some(open) = update.open {
            issue.open = open;
        }

        // updated_on >= created_on
        issue.updated_on = util::now().max(issue.created_on);

        if !update.other_fields.is_empty() {
            debug!(project, id, ignored = ?update.other_fields, "Unpatchable fields ignored");
        }
        debug!(project, id, "Updated issue");
        Ok(id.to_string())
    }

    /// Remove one issue from `project`, keeping the order of the rest.
    /// Returns the deleted id.
    ///
    /// # Errors
    ///
    /// Returns `MissingId` without an id, or `CouldNotDelete` when the
    /// project or issue is unknown.
    pub fn delete_issue(&mut self, project: &str, id: Option<&str>) -> Result<String> {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            return Err(TrackerError::MissingId);
        };

        let not_found = || TrackerError::CouldNotDelete { id: id.to_string() };
        let issues = self.projects.get_mut(project).ok_or_else(not_found)?;
        let idx = find_issue(id, issues).ok_or_else(not_found)?;

        issues.remove(idx);
        self.id_index.remove(id);

        info!(project, id, "Deleted issue");
        Ok(id.to_string())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// List issues of `project` matching every filter, in creation order.
    #[must_use]
    pub fn list_issues(&self, project: &str, filters: &ListFilters) -> Vec<&Issue> {
        let issues = self.resolve(project);
        if filters.is_empty() {
            return issues.iter().collect();
        }
        let results: Vec<&Issue> = issues
            .iter()
            .filter(|issue| filters.matches(issue))
            .collect();
        debug!(project, matched = results.len(), "Filtered issues");
        results
    }

    /// Get a single issue of `project` by id.
    #[must_use]
    pub fn get_issue(&self, project: &str, id: &str) -> Option<&Issue> {
        let issues = self.resolve(project);
        find_issue(id, issues).map(|idx| &issues[idx])
    }

    // ========================================================================
    // ID Resolution
    // ========================================================================

    /// Check if an issue id exists in any project.
    #[must_use]
    pub fn id_exists(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    /// Get the total number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_index.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_index.is_empty()
    }
}
