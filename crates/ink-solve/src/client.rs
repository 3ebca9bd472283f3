//! The recognition/solve service boundary.
//!
//! `SolveService` is a pure request → response seam: it never touches the
//! surface, variables, or overlays. `HttpSolveService` is the real
//! implementation; tests substitute scripted services.

use crate::config::SolverConfig;
use crate::error::{Result, SolveError};
use crate::payload::{HealthResponse, SolveRequest, parse_response};
use ink_core::SolveEntry;
use reqwest::{Client, Url};

/// One round trip to the solver.
#[allow(async_fn_in_trait)]
pub trait SolveService {
    async fn solve(&self, request: &SolveRequest) -> Result<Vec<SolveEntry>>;
}

/// reqwest-backed client for the HTTP solve service.
pub struct HttpSolveService {
    client: Client,
    solve_url: Url,
    root_url: Url,
}

impl HttpSolveService {
    pub fn new(config: &SolverConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            solve_url: config.solve_url()?,
            root_url: config.root_url()?,
        })
    }

    pub fn solve_url(&self) -> &Url {
        &self.solve_url
    }

    /// `GET /`, returning the service's status message.
    pub async fn health_check(&self) -> Result<String> {
        let resp = self.client.get(self.root_url.clone()).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(SolveError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        let health: HealthResponse = serde_json::from_slice(&body)
            .map_err(|e| SolveError::MalformedResponse(e.to_string()))?;
        Ok(health.message)
    }
}

impl SolveService for HttpSolveService {
    async fn solve(&self, request: &SolveRequest) -> Result<Vec<SolveEntry>> {
        log::debug!(
            "POST {} ({} image bytes, {} vars)",
            self.solve_url,
            request.image.len(),
            request.dict_of_vars.len()
        );
        let resp = self
            .client
            .post(self.solve_url.clone())
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            log::warn!("solve failed with HTTP {status}");
            return Err(SolveError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let entries = parse_response(&body)?;
        log::info!("solve returned {} entries", entries.len());
        Ok(entries)
    }
}
