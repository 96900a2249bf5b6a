//! Route Table: static mapping from path to view.

use crate::model::RouteNotFound;
use std::collections::HashMap;
use thiserror::Error;

/// Path of the home route.
pub const ROOT_PATH: &str = "/";

/// Reference to a view the shell knows how to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Notification,
}

/// One navigable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    path: String,
    name: String,
    view: ViewId,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: ViewId) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> ViewId {
        self.view
    }
}

/// Errors building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("route path {0:?} must start with '/'")]
    RelativePath(String),

    #[error("duplicate route path {0:?}")]
    DuplicatePath(String),
}

/// Fixed set of routes, looked up by exact path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: HashMap<String, RouteEntry>,
}

impl RouteTable {
    /// Build a table from entries.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError`] for relative or duplicate paths.
    pub fn new(entries: impl IntoIterator<Item = RouteEntry>) -> Result<Self, RouteTableError> {
        let mut map = HashMap::new();
        for entry in entries {
            if !entry.path.starts_with('/') {
                return Err(RouteTableError::RelativePath(entry.path));
            }
            if map.contains_key(&entry.path) {
                return Err(RouteTableError::DuplicatePath(entry.path));
            }
            map.insert(entry.path.clone(), entry);
        }
        Ok(Self { entries: map })
    }

    /// Resolve a path to its entry. Exact match only.
    ///
    /// # Errors
    ///
    /// Returns [`RouteNotFound`] when no entry has this path.
    pub fn resolve(&self, path: &str) -> Result<&RouteEntry, RouteNotFound> {
        self.entries.get(path).ok_or_else(|| RouteNotFound {
            path: path.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.values()
    }
}

/// The application's routes: `/` shows the notification view.
impl Default for RouteTable {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            ROOT_PATH.to_string(),
            RouteEntry::new(ROOT_PATH, "Notification", ViewId::Notification),
        );
        Self { entries }
    }
}
