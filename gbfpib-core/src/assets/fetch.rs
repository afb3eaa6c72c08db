use std::{future::Future, pin::Pin, time::Duration};

use anyhow::Context;

use crate::foundation::error::PibResult;

/// Client identifier sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36 Rosetta/GBFPIB";

/// Total per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Boxed future returned by [`Fetcher`] methods.
pub type FetchFuture<'a, T> = Pin<Box<dyn Future<Output = PibResult<T>> + Send + 'a>>;

/// Value of the `connection` header sent with a GET.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connection {
    /// Asset downloads from the content host.
    KeepAlive,
    /// One-off lookups (wiki).
    Close,
}

impl Connection {
    fn header_value(self) -> &'static str {
        match self {
            Self::KeepAlive => "keep-alive",
            Self::Close => "close",
        }
    }
}

/// Raw response: status code plus body bytes.
#[derive(Clone, Debug, Default)]
pub struct Fetched {
    /// HTTP status code.
    pub status: u16,
    /// Response body; empty unless the status is 200.
    pub body: Vec<u8>,
}

impl Fetched {
    /// Whether the server answered 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Read-only network boundary used by the asset cache, the class probe and the wiki lookup.
///
/// Transport failures are errors; any answered request, whatever its status, is an `Ok`.
pub trait Fetcher: Send + Sync {
    /// Issue a GET.
    fn get<'a>(&'a self, url: &'a str, connection: Connection) -> FetchFuture<'a, Fetched>;

    /// Issue a HEAD and return the status code.
    fn head<'a>(&'a self, url: &'a str) -> FetchFuture<'a, u16>;
}

/// [`Fetcher`] backed by one shared `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build the client with the fixed user agent and timeout.
    pub fn new() -> PibResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn get<'a>(&'a self, url: &'a str, connection: Connection) -> FetchFuture<'a, Fetched> {
        Box::pin(async move {
            let resp = self
                .client
                .get(url)
                .header(reqwest::header::CONNECTION, connection.header_value())
                .send()
                .await
                .with_context(|| format!("GET {url}"))?;
            let status = resp.status().as_u16();
            if status != 200 {
                return Ok(Fetched {
                    status,
                    body: Vec::new(),
                });
            }
            let body = resp
                .bytes()
                .await
                .with_context(|| format!("read body of {url}"))?;
            Ok(Fetched {
                status,
                body: body.to_vec(),
            })
        })
    }

    fn head<'a>(&'a self, url: &'a str) -> FetchFuture<'a, u16> {
        Box::pin(async move {
            let resp = self
                .client
                .head(url)
                .send()
                .await
                .with_context(|| format!("HEAD {url}"))?;
            Ok(resp.status().as_u16())
        })
    }
}
