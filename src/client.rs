//! Transport clients for the user-facing and console API surfaces.

use crate::config::Config;
use crate::error::ApiError;
use crate::resource::{Mutation, Query};
use crate::routes::{Audience, Operation, PathParams};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

/// One configured HTTP client bound to a base URL.
#[derive(Clone)]
struct Transport {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl Transport {
    fn build(config: &Config, base_url: &str, bearer_token: Option<String>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token,
        })
    }
}

/// Both audience clients plus the site every request is scoped to.
#[derive(Debug, Clone)]
pub struct ApiClient {
    site_id: String,
    user: Transport,
    console: Transport,
}

/// Results of the three requests issued by [`ApiClient::load_site_shell`].
#[derive(Debug)]
pub struct SiteShell {
    pub site_info: Result<Value, ApiError>,
    pub popups: Result<Value, ApiError>,
    pub categories: Result<Value, ApiError>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let user = Transport::build(config, &config.api_url, None)?;
        let console = Transport::build(
            config,
            &config.console_api_url,
            config.console_api_token.clone(),
        )?;

        info!(
            "API clients ready (user: {}, console: {})",
            user.base_url, console.base_url
        );

        Ok(Self {
            site_id: config.site_id.clone(),
            user,
            console,
        })
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    fn transport(&self, audience: Audience) -> &Transport {
        match audience {
            Audience::User => &self.user,
            Audience::Console => &self.console,
        }
    }

    /// Full URL for `operation`, with `:site_id` filled from config unless supplied.
    pub fn url_for(&self, operation: Operation, params: &PathParams) -> String {
        let route = operation.route();
        let mut params = params.clone();
        params.insert_default("site_id", &self.site_id);

        format!(
            "{}{}",
            self.transport(route.audience).base_url,
            route.render(&params)
        )
    }

    /// Issue one request for `operation` and decode the response body.
    ///
    /// Non-2xx responses become [`ApiError::Status`] with the body captured
    /// as text. An empty success body decodes as JSON `null`.
    pub async fn send<T, B>(
        &self,
        operation: Operation,
        params: &PathParams,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let route = operation.route();
        let transport = self.transport(route.audience);
        let url = self.url_for(operation, params);

        debug!("{} {} {} ({})", operation, route.method, url, route.audience);

        let mut request = transport.http.request(route.method.as_reqwest(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &transport.bearer_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!("{} failed with {}", operation, status);
            return Err(ApiError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Read handle for `operation`; nothing is sent until [`Query::fetch`].
    ///
    /// Fails with [`ApiError::WrongHandle`] unless `operation` is a GET.
    pub fn query(&self, operation: Operation) -> Result<Query<'_>, ApiError> {
        if !operation.method().is_read() {
            return Err(ApiError::WrongHandle {
                operation,
                method: operation.method(),
                handle: "query",
            });
        }
        Ok(Query::new(self, operation))
    }

    /// Write handle for `operation`; sends on [`Mutation::execute`].
    ///
    /// Fails with [`ApiError::WrongHandle`] if `operation` is a GET.
    pub fn mutation(&self, operation: Operation) -> Result<Mutation<'_>, ApiError> {
        if operation.method().is_read() {
            return Err(ApiError::WrongHandle {
                operation,
                method: operation.method(),
                handle: "mutation",
            });
        }
        Ok(Mutation::new(self, operation))
    }

    /// Fetch site info, popups and categories for `c_lang` concurrently.
    pub async fn load_site_shell(&self, c_lang: &str) -> SiteShell {
        let params = PathParams::new().with("c_lang", c_lang);

        let (site_info, popups, categories) = futures::join!(
            self.send::<Value, Value>(Operation::SiteInfo, &params, &[], None),
            self.send::<Value, Value>(Operation::PopupList, &params, &[], None),
            self.send::<Value, Value>(Operation::CategoryList, &params, &[], None),
        );

        SiteShell {
            site_info,
            popups,
            categories,
        }
    }
}
