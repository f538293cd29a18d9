//! Contract generation and download URLs

use reachkit_domain::{Contract, ContractRequest};

use super::client::ApiClient;
use super::errors::ApiError;

impl ApiClient {
    /// Generate a contract document for a finalized deal.
    pub async fn generate_contract(&self, deal_id: &str) -> Result<Contract, ApiError> {
        self.post("/contracts/generate", &ContractRequest { deal_id: deal_id.to_string() }).await
    }

    /// Absolute URL of a deal's contract PDF.
    ///
    /// Pure string construction; no request is made and the URL is stable
    /// for a given base URL and deal id.
    pub fn contract_download_url(&self, deal_id: &str) -> String {
        format!("{}/contracts/download/{}.pdf", self.base_url(), deal_id)
    }
}
