// Postguard: sentence-level foul language moderation for blog posts.
//
// This is the library root. Each module corresponds to a major subsystem
// of the moderation pipeline.

pub mod classifier;
pub mod config;
pub mod db;
pub mod moderation;
pub mod output;
pub mod pipeline;
pub mod status;
pub mod web;
