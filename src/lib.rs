// Library exports for Bay Leaf
// This allows integration tests and external code to use the site modules

pub mod config;
pub mod contact;
pub mod dashboard;
pub mod error;
pub mod i18n;
pub mod models;
pub mod panels;
pub mod remote;
pub mod routes;
pub mod state;
pub mod stores;
