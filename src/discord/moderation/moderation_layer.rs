// Flood control on the Discord side: the admin commands and the message hook.

pub mod commands;
pub mod spam_handler;
