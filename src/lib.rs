pub mod app;
pub mod client;
pub mod config;
pub mod dom;
pub mod errors;
pub mod fragments;
pub mod handlers;
pub mod http;
pub mod location;
pub mod models;
pub mod router;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod ui;
pub mod views;

pub use app::fragment_host;
pub use client::Client;
pub use config::{Config, Variant};
pub use errors::ClientError;
pub use router::{RenderOutcome, Router, RouterState};
pub use state::{AppContext, HostState};
