//! Where view fragments come from.

use crate::errors::ClientError;
use crate::ui;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

pub type FragmentFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ClientError>> + Send + 'a>>;

pub trait FragmentSource: Send + Sync {
    /// Loads the markup of the fragment called `name` (without extension).
    fn load<'a>(&'a self, name: &'a str) -> FragmentFuture<'a>;
}

/// Fetches `<base>/views/<name>.html`, the layout the fragment host serves.
#[derive(Clone)]
pub struct HttpFragments {
    client: Client,
    base_url: String,
}

impl HttpFragments {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, name: &str) -> String {
        format!("{}/views/{name}.html", self.base_url)
    }
}

impl FragmentSource for HttpFragments {
    fn load<'a>(&'a self, name: &'a str) -> FragmentFuture<'a> {
        Box::pin(async move {
            let url = self.url_for(name);
            debug!(%url, "fetching fragment");
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|err| ClientError::route_load(name, err))?;
            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::route_load(name, format!("HTTP {}", status.as_u16())));
            }
            response.text().await.map_err(|err| ClientError::route_load(name, err))
        })
    }
}

/// Serves the fragments compiled into the crate.
#[derive(Clone, Copy, Default)]
pub struct BundledFragments;

impl FragmentSource for BundledFragments {
    fn load<'a>(&'a self, name: &'a str) -> FragmentFuture<'a> {
        Box::pin(async move {
            ui::fragment(name)
                .map(str::to_string)
                .ok_or_else(|| ClientError::route_load(name, "no such fragment"))
        })
    }
}
