pub mod candidate;
pub mod loaders;
pub mod moltbook;
pub mod payload;
pub mod question;
pub mod state;

pub use candidate::{Candidate, CandidateKind};
pub use loaders::load_question_queue;
pub use moltbook::{AgentProfile, AgentStatus, Author, Comment, CreatedPost, Post};
pub use payload::{build_comment_payload, build_post_payload, CommentPayload, PostPayload};
pub use question::{Question, QuestionQueue, MAX_QUESTION_LENGTH};
pub use state::RunState;
