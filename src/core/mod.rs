pub mod config;
pub mod conversation;
pub mod dispatch;
pub mod line;
pub mod parser;
pub mod script;
pub mod variables;
pub mod wrap;
