pub mod dto;
pub mod journal_service;
