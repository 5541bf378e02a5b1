pub mod action;
pub mod interaction;
pub mod speaker;
