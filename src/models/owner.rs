// Table owner record

use super::TableIdentity;
use serde::Serialize;

/// Owners of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableOwner {
    #[serde(flatten)]
    pub identity: TableIdentity,
    pub owners: Vec<String>,
}

impl TableOwner {
    pub fn new(identity: TableIdentity, owners: Vec<String>) -> Self {
        Self { identity, owners }
    }
}
