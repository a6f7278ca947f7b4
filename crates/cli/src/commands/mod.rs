//! Subcommand implementations

pub mod article;
pub mod category;
pub mod config;
pub mod doctor;
pub mod home;
pub mod popular;
pub mod search;

mod output;
