use std::time::Duration;

use async_trait::async_trait;
use blogkit_api_types::{Post, PostDraft};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::config::ApiSettings;

use super::error::ApiError;

const TARGET: &str = "blogkit::http";

/// Transport for the four posts endpoints. Implementations must be shareable
/// across tasks; the store only ever calls them through `&self`.
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// `GET posts`
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;
    /// `POST posts`
    async fn create_post(&self, draft: &PostDraft) -> Result<Post, ApiError>;
    /// `PUT posts/{id}`
    async fn update_post(&self, post_id: &str, post: &Post) -> Result<Post, ApiError>;
    /// `DELETE posts/{id}`; the response body is not interpreted.
    async fn delete_post(&self, post_id: &str) -> Result<(), ApiError>;
}

/// reqwest-backed [`PostsApi`] rooted at a base URL.
#[derive(Clone, Debug)]
pub struct HttpPostsApi {
    client: Client,
    base: Url,
}

impl HttpPostsApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        Self::new(settings.base_url.as_str(), settings.timeout)
    }

    pub fn user_agent() -> &'static str {
        concat!("blogkit/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(ApiError::Url)
    }

    /// URL of a single post. The id is pushed as one percent-encoded segment.
    pub fn post_url(&self, post_id: &str) -> Result<Url, ApiError> {
        let mut url = self.url("posts")?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(post_id);
        Ok(url)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<T, ApiError> {
        let mut req = self.client.request(method.clone(), url.clone());
        if let Some(b) = body {
            req = req.json(b);
        }
        let resp = Self::send(req, &method, &url).await?;
        Self::handle(resp).await
    }

    async fn request_no_body(&self, method: Method, url: Url) -> Result<(), ApiError> {
        let req = self.client.request(method.clone(), url.clone());
        let resp = Self::send(req, &method, &url).await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ApiError::status(status, text));
        }
        Ok(())
    }

    async fn send(req: RequestBuilder, method: &Method, url: &Url) -> Result<Response, ApiError> {
        debug!(target: TARGET, method = %method, url = %url, "sending request");
        let resp = req.send().await.inspect_err(|err| {
            debug!(target: TARGET, method = %method, url = %url, error = %err, "request failed");
        })?;
        debug!(
            target: TARGET,
            method = %method,
            url = %url,
            status = resp.status().as_u16(),
            "response received"
        );
        Ok(resp)
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            return Err(ApiError::status(status, text));
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let url = self.url("posts")?;
        self.request(Method::GET, url, None::<&()>).await
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        let url = self.url("posts")?;
        self.request(Method::POST, url, Some(draft)).await
    }

    async fn update_post(&self, post_id: &str, post: &Post) -> Result<Post, ApiError> {
        let url = self.post_url(post_id)?;
        self.request(Method::PUT, url, Some(post)).await
    }

    async fn delete_post(&self, post_id: &str) -> Result<(), ApiError> {
        let url = self.post_url(post_id)?;
        self.request_no_body(Method::DELETE, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpPostsApi {
        HttpPostsApi::new(base, Duration::from_secs(5)).expect("api")
    }

    #[test]
    fn base_without_trailing_slash_keeps_its_path() {
        let api = api("http://localhost:4000/api");
        assert_eq!(api.base_url().as_str(), "http://localhost:4000/api/");
        assert_eq!(
            api.url("posts").expect("url").as_str(),
            "http://localhost:4000/api/posts"
        );
    }

    #[test]
    fn post_url_encodes_the_id_as_one_segment() {
        let api = api("http://localhost:4000/");
        assert_eq!(
            api.post_url("a b/c").expect("url").as_str(),
            "http://localhost:4000/posts/a%20b%2Fc"
        );
    }

    #[test]
    fn rejects_relative_base() {
        let err = HttpPostsApi::new("not a url", Duration::from_secs(1)).expect_err("invalid");
        assert!(matches!(err, ApiError::Url(_)));
    }
}
