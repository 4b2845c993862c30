pub mod posting_gate;
pub mod promo_filter;
pub mod reply_composer;
pub mod resolver;
pub mod state_store;

pub use posting_gate::{GateDecision, PostingGate};
pub use promo_filter::{KeywordLinkFilter, PromoFilter};
pub use reply_composer::ReplyComposer;
pub use resolver::{parse_date, DateIndexResolver, Selection};
pub use state_store::StateStore;
