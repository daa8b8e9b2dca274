pub mod answer;
pub mod error;
pub mod invoker;
pub mod prompt;
pub mod retry;

pub use answer::{Answer, AnswerService, Message};
pub use error::AnswerError;
pub use invoker::ModelInvoker;
pub use retry::RetryPolicy;
