pub mod chat;
pub mod domain;
pub mod dto;
