pub mod queue_loader;

pub use queue_loader::load_question_queue;
