// Automatic replies: scripted Q&A and fixed keyword triggers.

pub mod keywords;
pub mod qa_service;

pub use keywords::keyword_replies;
pub use qa_service::{QaTable, ReplyError, ReplyService};
