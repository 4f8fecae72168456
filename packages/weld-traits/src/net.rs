pub use bytes::Bytes;
pub use http::{self, HeaderMap, Method};
use thiserror::Error;
pub use url::Url;

/// A type that fetches resources referenced by a manifest document.
///
/// This may be over the network via http(s), via the filesystem, or some other method.
pub trait FetchProvider {
    fn fetch(&self, request: Request) -> impl Future<Output = Result<Response, FetchError>>;
}

#[non_exhaustive]
#[derive(Debug)]
/// A request type loosely representing <https://fetch.spec.whatwg.org/#requests>
pub struct Request {
    pub url: Url,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Request {
    /// A get request to the specified Url and an empty body
    pub fn get(url: Url) -> Self {
        Self {
            url,
            method: Method::GET,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }
}

#[derive(Debug)]
/// An HTTP response
pub struct Response {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The response body decoded as UTF-8 (lossily)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// The fetch completed with a non-success HTTP status. Providers return
    /// such responses as `Ok`; this variant is raised by callers which treat
    /// a non-success status as failure.
    #[error("fetch of {url} returned status {status}")]
    Status { url: Url, status: u16 },
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

/// A fetch provider that fails every request. For documents that are known
/// not to reference remote scripts.
pub struct DummyFetchProvider;

impl FetchProvider for DummyFetchProvider {
    async fn fetch(&self, request: Request) -> Result<Response, FetchError> {
        Err(FetchError::Transport(
            format!("no fetch provider configured (requested {})", request.url).into(),
        ))
    }
}
