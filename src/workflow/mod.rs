pub mod agent_flow;
pub mod run_ctx;

pub use agent_flow::{AgentFlow, PostOutcome, RunReport, SkipReason};
pub use run_ctx::RunCtx;
