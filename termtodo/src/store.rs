//! Remote task store client.
//!
//! [`TaskStore`] is the seam between the task list controller and the REST
//! backend; [`HttpTaskStore`] is the real implementation speaking JSON over
//! HTTP. Calls carry no retry or timeout policy: a failure is surfaced
//! immediately to the caller as a [`StoreError`].

use std::future::Future;

use reqwest::StatusCode;
use termtodo_api::task::{Task, TaskPatch};
use url::Url;

/// A failed request against the remote task store.
///
/// Every non-success outcome reduces to this one kind; callers do not
/// distinguish 4xx from 5xx from transport failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a usable response (connection, DNS,
    /// body decode).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status} for {url}")]
    Status {
        /// HTTP status code of the response.
        status: StatusCode,
        /// Request URL, for diagnostics.
        url: String,
    },

    /// The configured base URL cannot be combined with a resource path.
    #[error("invalid API base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Client-side interface to the remote task collection.
///
/// The controller is generic over this trait; production uses
/// [`HttpTaskStore`], tests substitute an in-memory fake. Arguments are
/// owned so call futures can be moved onto background tasks.
pub trait TaskStore: Send + Sync + 'static {
    /// Fetches the full collection, in server order.
    fn list_tasks(&self) -> impl Future<Output = Result<Vec<Task>, StoreError>> + Send;

    /// Creates `draft` remotely; the draft's id is ignored and the stored
    /// task with its server-assigned id is returned.
    fn create_task(&self, draft: Task) -> impl Future<Output = Result<Task, StoreError>> + Send;

    /// Applies `patch` to the task with `id`; returns the merged task.
    fn update_task(
        &self,
        id: String,
        patch: TaskPatch,
    ) -> impl Future<Output = Result<Task, StoreError>> + Send;

    /// Deletes the task with `id`.
    fn delete_task(&self, id: String) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// HTTP implementation of [`TaskStore`] against a `/todos` collection.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTaskStore {
    /// Creates a client for the collection at `base_url`
    /// (e.g., `http://127.0.0.1:3001`).
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base_url)?;
        // A trailing slash makes join() append instead of replace.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base,
        })
    }

    fn collection_url(&self) -> Result<Url, StoreError> {
        Ok(self.base_url.join("todos")?)
    }

    fn item_url(&self, id: &str) -> Result<Url, StoreError> {
        Ok(self.base_url.join(&format!("todos/{id}"))?)
    }

    fn check(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(StoreError::Status {
                status,
                url: resp.url().to_string(),
            })
        }
    }
}

impl TaskStore for HttpTaskStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let url = self.collection_url()?;
        let resp = Self::check(self.http.get(url).send().await?)?;
        Ok(resp.json().await?)
    }

    async fn create_task(&self, draft: Task) -> Result<Task, StoreError> {
        let url = self.collection_url()?;
        let resp = Self::check(self.http.post(url).json(&draft).send().await?)?;
        Ok(resp.json().await?)
    }

    async fn update_task(&self, id: String, patch: TaskPatch) -> Result<Task, StoreError> {
        let url = self.item_url(&id)?;
        let resp = Self::check(self.http.put(url).json(&patch).send().await?)?;
        Ok(resp.json().await?)
    }

    async fn delete_task(&self, id: String) -> Result<(), StoreError> {
        let url = self.item_url(&id)?;
        Self::check(self.http.delete(url).send().await?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_without_trailing_slash() {
        let store = HttpTaskStore::new("http://localhost:3001").unwrap();
        assert_eq!(
            store.collection_url().unwrap().as_str(),
            "http://localhost:3001/todos"
        );
    }

    #[test]
    fn base_url_with_trailing_slash() {
        let store = HttpTaskStore::new("http://localhost:3001/").unwrap();
        assert_eq!(
            store.collection_url().unwrap().as_str(),
            "http://localhost:3001/todos"
        );
    }

    #[test]
    fn base_url_with_path_prefix_keeps_prefix() {
        let store = HttpTaskStore::new("http://example.com/api").unwrap();
        assert_eq!(
            store.collection_url().unwrap().as_str(),
            "http://example.com/api/todos"
        );
    }

    #[test]
    fn item_url_appends_the_id() {
        let store = HttpTaskStore::new("http://localhost:3001").unwrap();
        assert_eq!(
            store.item_url("a1b2").unwrap().as_str(),
            "http://localhost:3001/todos/a1b2"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(HttpTaskStore::new("not a url").is_err());
    }
}
