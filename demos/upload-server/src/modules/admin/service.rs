use super::model::{ArtifactReceipt, Invite, JoinReceipt};
use chrono::Utc;
use dashmap::DashMap;
use formroute::prelude::*;
use uuid::Uuid;

/// In-memory store for everything the admin endpoints accept.
#[derive(Default)]
pub struct ArtifactStore {
    joins: DashMap<String, (Invite, Option<serde_json::Value>)>,
    artifacts: DashMap<String, (ArtifactReceipt, Bytes)>,
}

impl ArtifactStore {
    pub fn record_join(&self, invite: Invite, settings: Option<serde_json::Value>) -> JoinReceipt {
        let receipt = JoinReceipt {
            id: Uuid::new_v4().to_string(),
            network_name: invite.network_name.clone(),
            address: invite.address.clone(),
            settings_provided: settings.is_some(),
            received_at: Utc::now(),
        };
        self.joins.insert(receipt.id.clone(), (invite, settings));
        receipt
    }

    pub fn store_artifact(&self, name: String, version: String, package: FormPart) -> ArtifactReceipt {
        let receipt = ArtifactReceipt {
            id: Uuid::new_v4().to_string(),
            name,
            version,
            file_name: package.file_name.clone(),
            size: package.len(),
            received_at: Utc::now(),
        };
        self.artifacts
            .insert(receipt.id.clone(), (receipt.clone(), package.data));
        receipt
    }

    pub fn join_count(&self) -> usize {
        self.joins.len()
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }
}
