//! Desktop GUI for the faceup photo workflow.

pub mod app;
pub mod app_impl;
pub mod backend;
pub mod jobs;
pub mod settings;
pub mod theme;
pub mod types;
pub mod ui;

pub use types::*;
