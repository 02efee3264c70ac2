//! # API Client
//!
//! HTTP client for the marketplace backend. One struct owns the connection
//! pool, the configured base URL and the session slot; everything else in the
//! crate funnels its network traffic through [`ApiClient::execute`].
//!
//! Three layers live here:
//!
//! 1. **Executor** ([`ApiClient::execute`]): builds the final URL, attaches
//!    headers/query/body, dispatches, and normalizes every failure into
//!    [`RequestError`]. HTTP-level failures never panic and never escape as
//!    anything but the `Err` branch.
//! 2. **Typed verb facade** ([`ApiClient::fetch`], [`ApiClient::create`],
//!    [`ApiClient::create_multipart`], [`ApiClient::replace`],
//!    [`ApiClient::remove`]): fixed method + body-encoding policy per verb,
//!    generic over the decoded response type.
//! 3. **Service trait impl** ([`MarketApi`]): delegates to the endpoint
//!    modules, giving callers a mockable seam.

use std::time::Instant;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    CreateProductRequest, CreateUserRequest, CreatedProduct, ErrorEnvelope, LoginResponse, Product,
    Transaction, UpdateProductRequest, UserProfile,
};

use crate::core::error::{ConfigError, RequestError, Result};
use crate::core::service::MarketApi;
use crate::services::api::request::{QueryValue, RequestBody, RequestOptions, RequestSpec};
use crate::services::api::{products, transactions, users};
use crate::services::api::transactions::TransactionQuery;
use crate::session::Session;

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "PEPMARKET_BACKEND_BASE_URL";

/// HTTP client for communicating with the marketplace backend.
///
/// Cloning is cheap: the connection pool and session slot are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a client for the given backend origin.
    ///
    /// Fails fast when the base URL is missing or malformed, so a broken
    /// deployment surfaces at construction instead of as a garbled URL
    /// reaching the network layer on the first request.
    pub fn new(base_url: impl Into<String>, session: Session) -> std::result::Result<Self, ConfigError> {
        let base_url = validate_base_url(&base_url.into())?;

        let http = Client::builder()
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Create a client configured from the [`BASE_URL_ENV`] environment
    /// variable.
    pub fn from_env(session: Session) -> std::result::Result<Self, ConfigError> {
        let base_url = std::env::var(BASE_URL_ENV).map_err(|_| ConfigError::MissingBaseUrl)?;
        Self::new(base_url, session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session slot this client reads tokens from.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Execute one request and return the parsed JSON body.
    ///
    /// Non-2xx responses are normalized from the backend error envelope into
    /// [`RequestError::Server`]; unreadable error bodies become
    /// [`RequestError::UnknownResponse`]; transport failures become
    /// [`RequestError::Network`]. Never retries.
    #[tracing::instrument(skip(self, spec), fields(method = %spec.method, path = %spec.path))]
    pub async fn execute(&self, spec: RequestSpec) -> Result<serde_json::Value> {
        let content_type = spec.content_type();
        let RequestSpec {
            method,
            path,
            query,
            body,
            requires_auth,
        } = spec;

        let url = format!("{}{}", self.base_url, path);
        let headers = self.session.build_headers(requires_auth, content_type);

        let mut request = self.http.request(method, &url).headers(headers);
        if !query.is_empty() {
            let pairs: Vec<(&str, String)> = query
                .iter()
                .map(|(key, value)| (key.as_str(), value.to_string()))
                .collect();
            request = request.query(&pairs);
        }
        match body {
            Some(RequestBody::Json(body)) => request = request.json(&body),
            Some(RequestBody::Multipart(form)) => request = request.multipart(form),
            None => {}
        }

        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "request never reached the backend");
            RequestError::Network(e.to_string())
        })?;

        let status = response.status();
        let duration = start.elapsed();

        if status.is_success() {
            tracing::debug!(
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                "request succeeded"
            );
            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| RequestError::Decode(e.to_string()))
        } else {
            tracing::warn!(
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                "request rejected by the backend"
            );
            match response.json::<ErrorEnvelope>().await {
                Ok(envelope) if !envelope.errors.is_empty() => {
                    Err(RequestError::Server(envelope.errors))
                }
                _ => Err(RequestError::UnknownResponse),
            }
        }
    }

    /// GET a resource. `None`-valued query keys are omitted.
    pub async fn fetch<R>(
        &self,
        path: &str,
        query: &[(&str, Option<QueryValue>)],
        opts: RequestOptions<'_>,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let mut spec = RequestSpec::get(path).auth(opts.requires_auth);
        for (key, value) in query {
            spec = spec.query_opt(*key, value.clone());
        }
        self.dispatch(spec, opts).await
    }

    /// POST a JSON body.
    pub async fn create<T, R>(&self, path: &str, body: &T, opts: RequestOptions<'_>) -> Result<R>
    where
        T: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode_body(body)?;
        let spec = RequestSpec::post(path).json(body).auth(opts.requires_auth);
        self.dispatch(spec, opts).await
    }

    /// POST a multipart form. No manual `Content-Type` is set: the transport
    /// writes the boundary itself.
    pub async fn create_multipart<R>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        opts: RequestOptions<'_>,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let spec = RequestSpec::post(path).multipart(form).auth(opts.requires_auth);
        self.dispatch(spec, opts).await
    }

    /// PUT a JSON body.
    pub async fn replace<T, R>(&self, path: &str, body: &T, opts: RequestOptions<'_>) -> Result<R>
    where
        T: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode_body(body)?;
        let spec = RequestSpec::put(path).json(body).auth(opts.requires_auth);
        self.dispatch(spec, opts).await
    }

    /// DELETE a resource.
    pub async fn remove<R>(&self, path: &str, opts: RequestOptions<'_>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let spec = RequestSpec::delete(path).auth(opts.requires_auth);
        self.dispatch(spec, opts).await
    }

    // Report-then-return: every failure is logged, pushed to the caller's
    // error handler when one was supplied, and returned as Err.
    async fn dispatch<R>(&self, spec: RequestSpec, opts: RequestOptions<'_>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let result = self.execute(spec).await.and_then(|value| {
            serde_json::from_value(value).map_err(|e| RequestError::Decode(e.to_string()))
        });

        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                let errors = err.errors();
                for error in &errors {
                    tracing::warn!(msg = %error.msg, field = ?error.field, "api call failed");
                }
                if let Some(on_error) = opts.on_error {
                    on_error(&errors);
                }
                Err(err)
            }
        }
    }
}

fn encode_body<T>(body: &T) -> Result<serde_json::Value>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(body).map_err(|e| {
        tracing::error!(error = %e, "failed to encode request body");
        RequestError::Network(format!("failed to encode request body: {e}"))
    })
}

fn validate_base_url(base_url: &str) -> std::result::Result<String, ConfigError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let url = reqwest::Url::parse(trimmed)
        .map_err(|_| ConfigError::InvalidBaseUrl(trimmed.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl(trimmed.to_string()));
    }

    Ok(trimmed.to_string())
}

// Implement MarketApi for the concrete client by delegating to the endpoint
// modules.
#[async_trait::async_trait]
impl MarketApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        users::login(self, email, password, RequestOptions::default()).await
    }

    async fn logout(&self) -> Result<()> {
        users::logout(self).await
    }

    async fn check_session(&self) -> Result<bool> {
        users::check_session(self).await
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<serde_json::Value> {
        users::create_user(self, request, RequestOptions::default()).await
    }

    async fn user(&self, user_id: i64) -> Result<UserProfile> {
        users::get_user(self, user_id).await
    }

    async fn products(&self, seller_id: Option<i64>) -> Result<Vec<Product>> {
        products::get_products(self, seller_id).await
    }

    async fn product(&self, product_id: i64) -> Result<Product> {
        products::get_product(self, product_id).await
    }

    async fn create_product(&self, request: &CreateProductRequest) -> Result<CreatedProduct> {
        products::create_product(self, request, RequestOptions::default()).await
    }

    async fn upload_product_image(
        &self,
        product_id: i64,
        image: Vec<u8>,
        file_name: String,
    ) -> Result<serde_json::Value> {
        products::upload_product_image(self, product_id, image, file_name, RequestOptions::default())
            .await
    }

    async fn update_product(
        &self,
        product_id: i64,
        request: &UpdateProductRequest,
    ) -> Result<serde_json::Value> {
        products::update_product(self, product_id, request, RequestOptions::default()).await
    }

    async fn delete_product(&self, product_id: i64) -> Result<serde_json::Value> {
        products::delete_product(self, product_id, RequestOptions::default()).await
    }

    async fn public_transactions(&self, query: TransactionQuery) -> Result<Vec<Transaction>> {
        transactions::public_transactions(self, query).await
    }

    async fn own_transactions(&self) -> Result<Vec<Transaction>> {
        transactions::own_transactions(self).await
    }

    async fn purchase(&self, product_id: i64) -> Result<serde_json::Value> {
        transactions::purchase(self, product_id, RequestOptions::default()).await
    }
}
