//! The reqwest-backed implementation of the [`Api`] collaborator.
//!
//! Sessions are cookie-based. The server hands a session cookie back from
//! login/register; we keep it in memory here and replay it as a `Cookie`
//! header on every request. Persisting it between runs is the caller's job
//! (see [`SessionStore`](crate::session::SessionStore)).

use crate::api::Api;
use crate::config::Config;
use crate::entry::{Entry, EntryPatch};
use crate::error::{Error, Result};
use crate::location::Point;
use crate::media::{MediaRef, MediaUpload};
use crate::user::{Credentials, NewUser, User};
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use tracing::debug;

pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    cookie: Option<String>,
}

impl HttpApi {
    pub fn new(config: &Config, cookie: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("building HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            cookie,
        })
    }

    /// The current session cookie, if any. Present after a successful
    /// login/register; cleared by logout.
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        let mut req = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(cookie) = &self.cookie {
            req = req.header(COOKIE, cookie.clone());
        }
        req
    }

    fn capture_cookie(&mut self, headers: &HeaderMap) {
        if let Some(cookie) = session_cookie(headers) {
            self.cookie = Some(cookie);
        }
    }

    fn multipart_media(media: &[MediaUpload]) -> Form {
        let mut form = Form::new();
        for m in media {
            form = form.part(
                "media",
                Part::bytes(m.bytes.clone()).file_name(m.file_name.clone()),
            );
        }
        form
    }
}

/// Extracts the `name=value` pairs from every `Set-Cookie` header, dropping
/// attributes like `Path` and `HttpOnly`, joined the way a `Cookie` request
/// header wants them.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

/// Maps a non-success response to the error taxonomy: 401 is an auth
/// failure, anything else is transient. The server's `msg` field is used as
/// the message when it sends one.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let msg = resp
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("msg").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| status.to_string());
    if status == StatusCode::UNAUTHORIZED {
        Err(Error::Auth(msg))
    } else {
        Err(Error::Transient(msg))
    }
}

impl Api for HttpApi {
    async fn me(&self) -> Result<User> {
        let resp = check(self.request(Method::GET, "/auth/me").send().await?).await?;
        Ok(resp.json().await?)
    }

    async fn login(&mut self, credentials: &Credentials) -> Result<User> {
        let resp = self
            .request(Method::POST, "/auth/login")
            .json(credentials)
            .send()
            .await?;
        let resp = check(resp).await?;
        self.capture_cookie(resp.headers());
        Ok(resp.json().await?)
    }

    async fn register(&mut self, new_user: &NewUser) -> Result<User> {
        let resp = self
            .request(Method::POST, "/auth/register")
            .json(new_user)
            .send()
            .await?;
        let resp = check(resp).await?;
        self.capture_cookie(resp.headers());
        Ok(resp.json().await?)
    }

    async fn logout(&mut self) -> Result<()> {
        check(self.request(Method::POST, "/auth/logout").send().await?).await?;
        self.cookie = None;
        Ok(())
    }

    async fn create_entry(
        &mut self,
        title: &str,
        description: &str,
        location: Point,
        media: &[MediaUpload],
    ) -> Result<Entry> {
        // The location always goes over the wire in the canonical form,
        // whichever shape the user picked it in.
        let form = Self::multipart_media(media)
            .text("title", title.to_string())
            .text("description", description.to_string())
            .text("location", serde_json::to_string(&location)?);
        let resp = self
            .request(Method::POST, "/entries")
            .multipart(form)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn list_active(&self) -> Result<Vec<Entry>> {
        let resp = check(self.request(Method::GET, "/entries/user").send().await?).await?;
        Ok(resp.json().await?)
    }

    async fn list_recent(&self) -> Result<Vec<Entry>> {
        let resp = check(self.request(Method::GET, "/entries/recent").send().await?).await?;
        Ok(resp.json().await?)
    }

    async fn list_archived(&self) -> Result<Vec<Entry>> {
        let resp = check(self.request(Method::GET, "/entries/archive").send().await?).await?;
        Ok(resp.json().await?)
    }

    async fn archive(&mut self, id: &str) -> Result<()> {
        let path = format!("/entries/{id}");
        check(self.request(Method::DELETE, &path).send().await?).await?;
        Ok(())
    }

    async fn restore(&mut self, id: &str) -> Result<()> {
        let path = format!("/entries/archive/{id}/restore");
        check(self.request(Method::PUT, &path).send().await?).await?;
        Ok(())
    }

    async fn delete_forever(&mut self, id: &str) -> Result<()> {
        let path = format!("/entries/archive/{id}");
        check(self.request(Method::DELETE, &path).send().await?).await?;
        Ok(())
    }

    async fn update_entry(&mut self, id: &str, patch: &EntryPatch) -> Result<Entry> {
        let path = format!("/entries/{id}");
        let resp = self
            .request(Method::PUT, &path)
            .json(patch)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn append_media(&mut self, id: &str, media: &[MediaUpload]) -> Result<Vec<MediaRef>> {
        let path = format!("/entries/{id}/media");
        let resp = self
            .request(Method::POST, &path)
            .multipart(Self::multipart_media(media))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn remove_media(&mut self, id: &str, media_id: &str) -> Result<()> {
        let path = format!("/entries/{id}/media/{media_id}");
        check(self.request(Method::DELETE, &path).send().await?).await?;
        Ok(())
    }

    async fn upload_avatar(&mut self, upload: &MediaUpload) -> Result<String> {
        let form = Form::new().part(
            "avatar",
            Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone()),
        );
        let resp = self
            .request(Method::POST, "/user/avatar")
            .multipart(form)
            .send()
            .await?;
        let body: serde_json::Value = check(resp).await?.json().await?;
        body.get("profilePic")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::Transient("avatar upload returned no profilePic".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn session_cookie_strips_attributes_and_joins_pairs() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("sid=abc123; Path=/; HttpOnly"),
        );
        headers.append(SET_COOKIE, HeaderValue::from_static("csrf=xyz; Secure"));
        assert_eq!(session_cookie(&headers), Some("sid=abc123; csrf=xyz".to_string()));
    }

    #[test]
    fn session_cookie_empty_headers() {
        assert_eq!(session_cookie(&HeaderMap::new()), None);
    }
}
