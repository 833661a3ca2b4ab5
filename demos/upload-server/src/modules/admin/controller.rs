use super::model::{ArtifactReceipt, Invite, JoinReceipt};
use super::service::ArtifactStore;
use formroute::prelude::*;

pub struct AdminController {
    store: Arc<ArtifactStore>,
}

impl AdminController {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }
}

#[multipart_routes]
impl AdminController {
    /// Join an existing network with an invite file and optional settings.
    #[post_multipart("/admin/request-join")]
    pub async fn request_join(
        &self,
        invite: FormPart,
        settings: Option<String>,
    ) -> ApiResponse<JoinReceipt> {
        let invite: Invite = match serde_json::from_slice(&invite.data) {
            Ok(invite) => invite,
            Err(e) => {
                return ApiResponse::error(
                    StatusCode::UnprocessableEntity,
                    format!("Invalid invite: {}", e),
                )
            }
        };

        let settings = match settings
            .as_deref()
            .map(serde_json::from_str::<serde_json::Value>)
            .transpose()
        {
            Ok(settings) => settings,
            Err(e) => {
                return ApiResponse::error(
                    StatusCode::UnprocessableEntity,
                    format!("Invalid join settings: {}", e),
                )
            }
        };

        let receipt = self.store.record_join(invite, settings);
        tracing::info!(id = %receipt.id, network = %receipt.network_name, "Join requested");
        ApiResponse::created(receipt)
    }

    #[post_multipart("/admin/upload-chaincode")]
    pub async fn upload_chaincode(
        &self,
        #[part("chaincode-file")] package: FormPart,
        name: String,
        version: String,
    ) -> ApiResponse<ArtifactReceipt> {
        if package.is_empty() {
            return ApiResponse::error(StatusCode::BadRequest, "Chaincode package is empty");
        }

        let receipt = self.store.store_artifact(name, version, package);
        tracing::info!(
            id = %receipt.id,
            name = %receipt.name,
            size = receipt.size,
            "Chaincode stored"
        );
        ApiResponse::created(receipt)
    }
}
