pub mod commands;
pub mod controller;
pub mod fetch;
pub mod host;
pub mod store;
pub mod view;
