pub mod app;
pub mod config;
pub mod dto;
pub mod feed;
pub mod present;
pub mod socket;
pub mod state;
