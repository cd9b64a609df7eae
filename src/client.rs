//! Transport client for the TapPay backend API.
//!
//! [`TapPayClient`] owns the partner key, the base URL and a `reqwest` client.
//! Every operation goes through [`TapPayClient::send`], which resolves the
//! service path, injects the `partner_key` body field and the `x-api-key`
//! header, and hands back the raw response body. HTTP status codes are not
//! interpreted here: TapPay reports outcomes through the `status` field of the
//! JSON body, which the operation modules decode.

use crate::errors::{Result, TapPayError};
use crate::marshal::MarshalMap;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::env::VarError;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Base URL of the TapPay sandbox, for testing integrations.
pub const SANDBOX_API_URL: &str = "https://sandbox.tappaysdk.com/";

/// Base URL of the TapPay production server.
pub const API_URL: &str = "https://prod.tappaysdk.com/";

/// Environment variable that overrides the default base URL.
pub const SERVER_ENV_VAR: &str = "TAPPAY_SERVER";

/// Timeout applied to every request made by the built-in HTTP client.
///
/// Chosen according to the TapPay backend documentation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_KEY_HEADER: &str = "x-api-key";
const PARTNER_KEY_FIELD: &str = "partner_key";

/// Operations offered by the TapPay backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Charge a card through a one-time prime token.
    PayByPrime,
    /// Query trade records.
    Record,
    /// Refund a completed transaction.
    Refund,
}

impl Service {
    /// Returns the URL path of this service, relative to the server root.
    pub fn path(self) -> &'static str {
        match self {
            Service::PayByPrime => "/tpc/payment/pay-by-prime",
            Service::Record => "/tpc/transaction/query",
            Service::Refund => "/tpc/transaction/refund",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::PayByPrime => "pay_by_prime",
            Service::Record => "record",
            Service::Refund => "refund",
        };
        f.write_str(name)
    }
}

/// Builder for [`TapPayClient`].
///
/// Options are applied once, when [`ClientBuilder::build`] runs.
pub struct ClientBuilder {
    partner_key: String,
    server: Option<String>,
    http_client: Option<Client>,
    timeout: Duration,
}

impl ClientBuilder {
    fn new(partner_key: String) -> Self {
        Self {
            partner_key,
            server: None,
            http_client: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the base URL. Takes precedence over `TAPPAY_SERVER`.
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Replaces the HTTP client entirely.
    ///
    /// The supplied client's own timeout applies; [`ClientBuilder::with_timeout`]
    /// is ignored.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the timeout of the built-in HTTP client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// The base URL is taken from [`ClientBuilder::with_server`], then from the
    /// `TAPPAY_SERVER` environment variable, then [`API_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`TapPayError::ConfigError`] if the resolved base URL is not an
    /// absolute `http`/`https` URL, if `TAPPAY_SERVER` is not valid unicode, or
    /// if the HTTP client cannot be created.
    pub fn build(self) -> Result<TapPayClient> {
        let env_server = server_from_env(std::env::var(SERVER_ENV_VAR))?;
        self.build_with_env(env_server)
    }

    fn build_with_env(self, env_server: Option<String>) -> Result<TapPayClient> {
        let server = resolve_server(self.server, env_server);
        let base_url = sanitize_url(&server)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| {
                    TapPayError::ConfigError(format!("cannot create HTTP client: {}", e))
                })?,
        };

        Ok(TapPayClient {
            partner_key: self.partner_key,
            base_url,
            http_client,
        })
    }
}

/// Reads the env override. Only an absent variable counts as unset.
fn server_from_env(value: std::result::Result<String, VarError>) -> Result<Option<String>> {
    match value {
        Ok(server) => Ok(Some(server)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(TapPayError::ConfigError(format!(
            "supplied server {:?} is not valid: not valid unicode",
            raw
        ))),
    }
}

/// Picks the base URL: explicit option, then non-empty env value, then default.
fn resolve_server(option: Option<String>, env_server: Option<String>) -> String {
    option
        .or_else(|| env_server.filter(|s| !s.is_empty()))
        .unwrap_or_else(|| API_URL.to_string())
}

fn sanitize_url(server: &str) -> Result<Url> {
    let invalid = |reason: String| {
        TapPayError::ConfigError(format!("supplied server {:?} is not valid: {}", server, reason))
    };

    let url = Url::parse(server).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    Ok(url)
}

/// Client for the TapPay backend API.
///
/// Immutable once built and cheap to clone; clones share the connection pool
/// of the underlying `reqwest::Client`, so one instance can serve concurrent
/// callers.
///
/// # Examples
///
/// ```
/// use tappay_rs::client::{TapPayClient, SANDBOX_API_URL};
///
/// let client = TapPayClient::builder("partner_key")
///     .with_server(SANDBOX_API_URL)
///     .build()
///     .unwrap();
/// assert_eq!(client.base_url().as_str(), SANDBOX_API_URL);
/// ```
#[derive(Clone)]
pub struct TapPayClient {
    partner_key: String,
    base_url: Url,
    http_client: Client,
}

impl fmt::Debug for TapPayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapPayClient")
            .field("partner_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl TapPayClient {
    /// Creates a client with default options.
    ///
    /// # Errors
    ///
    /// Fails with [`TapPayError::ConfigError`] when `TAPPAY_SERVER` holds an
    /// invalid URL.
    pub fn new(partner_key: impl Into<String>) -> Result<Self> {
        Self::builder(partner_key).build()
    }

    /// Starts building a client with non-default options.
    pub fn builder(partner_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(partner_key.into())
    }

    /// The validated base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The partner key sent with every request.
    pub fn partner_key(&self) -> &str {
        &self.partner_key
    }

    /// Resolves the full URL of `service`.
    ///
    /// Service paths are absolute, so any path on the base URL is replaced.
    pub fn endpoint(&self, service: Service) -> Result<Url> {
        Ok(self.base_url.join(service.path())?)
    }

    /// Serializes `params` into a request body carrying the partner key.
    ///
    /// `partner_key` is inserted after the parameters are marshaled and always
    /// overwrites a value of the same name supplied by the caller.
    pub fn request_body<P: MarshalMap>(&self, params: &P) -> Result<Vec<u8>> {
        let mut body = params.marshal_map()?;
        body.insert(
            PARTNER_KEY_FIELD.to_string(),
            Value::String(self.partner_key.clone()),
        );
        Ok(serde_json::to_vec(&body)?)
    }

    /// Issues a request to `service` and returns the full response body.
    ///
    /// Non-2xx responses are returned like any other; only network failures,
    /// URL resolution failures and body read failures are errors.
    pub async fn send<P: MarshalMap>(
        &self,
        method: Method,
        service: Service,
        params: &P,
    ) -> Result<Vec<u8>> {
        let url = self.endpoint(service)?;
        let body = self.request_body(params)?;

        tracing::debug!(service = %service, url = %url, "sending TapPay request");

        let response = self
            .http_client
            .request(method, url)
            .header(API_KEY_HEADER, &self.partner_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.bytes().await?;

        tracing::debug!(
            service = %service,
            http_status = status.as_u16(),
            bytes = raw.len(),
            "received TapPay response"
        );

        Ok(raw.to_vec())
    }

    /// POSTs `params` to `service` and decodes the JSON body as `R`.
    pub(crate) async fn call<P, R>(&self, service: Service, params: &P) -> Result<R>
    where
        P: MarshalMap,
        R: DeserializeOwned,
    {
        let raw = self.send(Method::POST, service, params).await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

/// Bounds a call by `deadline`.
///
/// Dropping the call future aborts the in-flight request; this helper does so
/// when the deadline passes and reports [`TapPayError::TimeoutExceeded`]. The
/// client-level timeout still applies, whichever fires first.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use tappay_rs::client::{with_deadline, TapPayClient};
/// use tappay_rs::refund::RefundParams;
///
/// # async fn example() -> tappay_rs::Result<()> {
/// let client = TapPayClient::new("partner_key")?;
/// let params = RefundParams::new("D20240101abc123");
/// let refund = with_deadline(Duration::from_secs(5), client.refund(&params)).await?;
/// println!("refund status {}", refund.status);
/// # Ok(())
/// # }
/// ```
pub async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| TapPayError::TimeoutExceeded)?
}
