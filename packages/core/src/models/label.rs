use serde::{Deserialize, Serialize};

/// Account-wide tag attachable to many notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,

    /// Soft-delete marker; deleted labels stay in the graph
    #[serde(default)]
    pub deleted: bool,
}

impl Label {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            deleted: false,
        }
    }

    /// Mark as soft-deleted
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }
}
