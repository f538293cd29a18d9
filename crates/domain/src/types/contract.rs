//! Contract generation payloads

use serde::{Deserialize, Serialize};

/// Body for POST /contracts/generate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRequest {
    pub deal_id: String,
}

/// Response of POST /contracts/generate
///
/// `pdf_url` is a backend-relative path; clients derive the absolute
/// download URL from their configured base URL and the deal id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub deal_id: String,
    pub contract_text: String,
    pub pdf_url: String,
}
