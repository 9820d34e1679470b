pub mod config;
pub mod error;
pub mod espn;
pub mod handler;
pub mod http;
pub mod localize;
pub mod message;
pub mod model;
pub mod pipeline;
pub mod schedule;
pub mod telegram;
