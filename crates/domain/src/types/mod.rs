//! Wire-level record types for the campaign API
//!
//! Field sets mirror the backend's models exactly. Timestamps are carried as
//! opaque strings: the backend emits naive ISO-8601 and the client never
//! interprets them, only displays them.

mod campaign;
mod contract;
mod creator;
mod deal;
mod health;
mod negotiation;
mod outreach;

pub use campaign::{Campaign, CampaignList, EnhancedBrief, NewCampaign};
pub use contract::{Contract, ContractRequest};
pub use creator::{
    Creator, CreatorCount, CreatorFilter, CreatorSearchRequest, CreatorSearchResponse,
    ScoredCreator,
};
pub use deal::{Deal, DealList, NewDeal};
pub use health::{DeleteAck, HealthStatus, Transcription};
pub use negotiation::{NegotiationHistory, NegotiationMessage, NegotiationReply, NegotiationTurn};
pub use outreach::{
    BatchOutreachEntry, BatchOutreachResult, Outreach, OutreachList, OutreachRequest,
    StoredOutreach,
};
