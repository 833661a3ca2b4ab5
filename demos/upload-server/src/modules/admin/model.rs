use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Invitation issued by an existing network member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub network_name: String,
    pub address: String,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinReceipt {
    pub id: String,
    pub network_name: String,
    pub address: String,
    pub settings_provided: bool,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactReceipt {
    pub id: String,
    pub name: String,
    pub version: String,
    pub file_name: Option<String>,
    pub size: usize,
    pub received_at: DateTime<Utc>,
}
