pub mod domain;
pub mod dto;
pub mod models;
pub mod services;
