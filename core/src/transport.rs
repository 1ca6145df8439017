//! Blocking `Transport` backed by `ureq`.
//!
//! # Design
//! The agent is built with `http_status_as_error(false)` so 4xx/5xx responses
//! come back as data rather than `Err`, leaving status interpretation to the
//! client. Timeouts, proxies and TLS settings belong to the agent; pass a
//! preconfigured one through `from_agent` to change them.

use std::fmt;

use crate::http::{HttpMethod, HttpRequest, HttpResponse, ResponseBody, Transport, TransportError};

#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use an existing agent. It should have `http_status_as_error(false)`,
    /// otherwise non-200 answers surface as transport errors.
    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = match request.method {
            HttpMethod::Get => {
                with_headers(self.agent.get(request.uri.as_str()), &request.headers).call()?
            }
            HttpMethod::Post => {
                let body = request.body.unwrap_or_default();
                with_headers(self.agent.post(request.uri.as_str()), &request.headers)
                    .send(&body[..])?
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = ResponseBody::from_reader(response.into_body().into_reader());

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
