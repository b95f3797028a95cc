//! Record types returned by the bundled endpoints.
//!
//! Field names follow the server's camelCase JSON. Fields a server may omit
//! are `Option` so that partial records still decode.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A todo item as served by `/todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// One entry of the `/variables` listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariableListObject {
    pub id: Uuid,
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
