//! Networking (HTTP, filesystem, Data URIs) for Weld
//!
//! Provides an implementation of the [`weld_traits::net::FetchProvider`] trait.

use data_url::DataUrl;
use weld_traits::net::{Bytes, FetchError, FetchProvider, HeaderMap, Request, Response};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:60.0) Gecko/20100101 Firefox/81.0";

/// A [`FetchProvider`] backed by a shared [`reqwest::Client`].
///
/// `data:` URLs are decoded in place and `file:` URLs are read from disk;
/// anything else goes over HTTP. Non-success HTTP statuses are returned as
/// `Ok` responses: classifying them is the caller's concern.
pub struct ReqwestProvider {
    client: reqwest::Client,
}

impl Default for ReqwestProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl FetchProvider for ReqwestProvider {
    async fn fetch(&self, request: Request) -> Result<Response, FetchError> {
        tracing::debug!(url = %request.url, "fetching");
        match request.url.scheme() {
            "data" => {
                let data_url = DataUrl::process(request.url.as_str())
                    .map_err(|err| FetchError::Transport(format!("{err:?}").into()))?;
                let decoded = data_url
                    .decode_to_vec()
                    .map_err(|err| FetchError::Transport(format!("{err:?}").into()))?;
                Ok(Response {
                    status: 200,
                    headers: HeaderMap::new(),
                    body: Bytes::from(decoded.0),
                })
            }
            "file" => {
                let file_content = std::fs::read(request.url.path())?;
                Ok(Response {
                    status: 200,
                    headers: HeaderMap::new(),
                    body: Bytes::from(file_content),
                })
            }
            _ => {
                let response = self
                    .client
                    .request(request.method, request.url.clone())
                    .headers(request.headers)
                    .header("User-Agent", USER_AGENT)
                    .body(request.body)
                    .send()
                    .await
                    .map_err(|err| FetchError::Transport(Box::new(err)))?;

                let status = response.status().as_u16();
                let headers = response.headers().clone();
                let body = response
                    .bytes()
                    .await
                    .map_err(|err| FetchError::Transport(Box::new(err)))?;
                tracing::debug!(url = %request.url, status, "fetched");

                Ok(Response {
                    status,
                    headers,
                    body,
                })
            }
        }
    }
}
