//! HTTP client for the hosted data API.
//!
//! The API follows PostgREST conventions: one resource per table under
//! `/rest/v1`, row filters as query parameters (`user_id=eq.42`), and
//! `Prefer` headers selecting what a write returns.

use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::StorageError;

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const REST_PATH: &str = "/rest/v1";
const PREFER: &str = "prefer";
const API_KEY: &str = "apikey";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// Row selection, filters and ordering of one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns to return, `*` for all.
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "eq", value.to_string())
    }

    pub fn lt(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "lt", value.to_string())
    }

    /// Matches any of `values`. Each value is quoted, so ids containing
    /// commas or parentheses stay intact.
    pub fn in_list(self, column: &str, values: &[String]) -> Self {
        let quoted: Vec<String> = values
            .iter()
            .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
            .collect();
        self.filter(column, "in", format!("({})", quoted.join(",")))
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        let direction = match order {
            Order::Asc => "asc",
            Order::Desc => "desc",
        };
        self.params
            .push(("order".to_string(), format!("{}.{}", column, direction)));
        self
    }

    /// Conflict target of an upsert.
    pub fn on_conflict(mut self, columns: &str) -> Self {
        self.params
            .push(("on_conflict".to_string(), columns.to_string()));
        self
    }

    fn filter(mut self, column: &str, op: &str, value: String) -> Self {
        self.params
            .push((column.to_string(), format!("{}.{}", op, value)));
        self
    }

    /// Renders the query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Shared client for every table of the data API.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    api_key: HeaderValue,
    auth_header: HeaderValue,
}

impl RestClient {
    /// Creates a client for the API at `base_url` (without the `/rest/v1` suffix).
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> StorageResult<Self> {
        let api_key_header = HeaderValue::from_str(api_key)
            .map_err(|e| StorageError::InvalidConfig(format!("Invalid API key format: {}", e)))?;
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| StorageError::InvalidConfig(format!("Invalid API key format: {}", e)))?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key_header,
            auth_header,
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(API_KEY), self.api_key.clone());
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }

    fn url(&self, table: &str, query: &Query) -> String {
        let query_string = query.to_query_string();
        if query_string.is_empty() {
            format!("{}{}/{}", self.base_url, REST_PATH, table)
        } else {
            format!("{}{}/{}?{}", self.base_url, REST_PATH, table, query_string)
        }
    }

    fn request(&self, method: Method, table: &str, query: &Query) -> RequestBuilder {
        let url = self.url(table, query);
        debug!("[DataApi] {} {}", method, url);
        self.client.request(method, url).headers(self.headers())
    }

    /// Rows of `table` matching `query`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> StorageResult<Vec<T>> {
        let response = self.request(Method::GET, table, query).send().await?;
        parse_response(response).await
    }

    /// The single row matching `query`, `None` when there is none.
    pub async fn select_single<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> StorageResult<Option<T>> {
        let response = self
            .request(Method::GET, table, query)
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;
        match parse_response(response).await {
            Ok(row) => Ok(Some(row)),
            Err(e) if e.is_no_rows() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Inserts `rows` and returns them as stored.
    pub async fn insert<B, T>(&self, table: &str, rows: &B) -> StorageResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, table, &Query::new())
            .header(PREFER, "return=representation")
            .json(rows)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Inserts `rows`, merging into existing rows that collide on `conflict_columns`.
    pub async fn upsert<B, T>(
        &self,
        table: &str,
        conflict_columns: &str,
        rows: &B,
    ) -> StorageResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let query = Query::new().on_conflict(conflict_columns);
        let response = self
            .request(Method::POST, table, &query)
            .header(PREFER, "resolution=merge-duplicates,return=representation")
            .json(rows)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Applies `patch` to the rows matching `query` and returns the updated rows.
    pub async fn update<B, T>(&self, table: &str, query: &Query, patch: &B) -> StorageResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::PATCH, table, query)
            .header(PREFER, "return=representation")
            .json(patch)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Deletes the rows matching `query` and returns how many were removed.
    pub async fn delete(&self, table: &str, query: &Query) -> StorageResult<usize> {
        let response = self
            .request(Method::DELETE, table, query)
            .header(PREFER, "return=representation")
            .send()
            .await?;
        let deleted: Vec<serde_json::Value> = parse_response(response).await?;
        Ok(deleted.len())
    }
}

/// Parses an HTTP response, turning non-success statuses into `StorageError::Api`.
async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> StorageResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            let message = err
                .message
                .or(err.details)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(StorageError::Api {
                status: status.as_u16(),
                code: err.code,
                message,
            });
        }
        return Err(StorageError::Api {
            status: status.as_u16(),
            code: None,
            message: body.chars().take(200).collect(),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        StorageError::Decode(format!(
            "{} - {}",
            e,
            body.chars().take(200).collect::<String>()
        ))
    })
}
