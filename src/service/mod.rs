pub mod question;
pub mod webhook_flow;
