//! `BoardStore` over the game REST API using reqwest.

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use wheel::board::BoardConfig;
use wheel::sync::{BoardStore, StoreError, TeamRef};

#[derive(Serialize)]
struct BoardUpdate<'a> {
    board_state: &'a BoardConfig,
}

#[derive(Serialize)]
struct EnergyChange {
    change: i64,
}

#[derive(Deserialize)]
struct EnergyReply {
    current_energy: i64,
}

impl EnergyReply {
    fn balance(&self) -> u32 {
        u32::try_from(self.current_energy.max(0)).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base: Url,
}

impl RestStore {
    /// `base` is the API root, e.g. `http://127.0.0.1:3001/api`.
    pub fn new(base: &str) -> Result<Self, StoreError> {
        let base = Url::parse(base).map_err(|e| StoreError::Transport(format!("invalid base URL {base:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::Transport(format!("invalid base URL {base}")));
        }
        Ok(Self { client: reqwest::Client::new(), base })
    }

    /// `{base}/rooms/{room}/teams/{team}/{leaf}` with each segment encoded.
    pub fn team_url(&self, team: &TeamRef, leaf: &str) -> Url {
        self.url_for(&["rooms", &team.room_code, "teams", &team.team_name, leaf])
    }

    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn check(response: reqwest::Response, team: &TeamRef) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(team.team_name.clone()));
        }
        if !status.is_success() {
            return Err(StoreError::Status { status: status.as_u16() });
        }
        Ok(response)
    }

    async fn energy(&self, request: reqwest::RequestBuilder, team: &TeamRef) -> Result<u32, StoreError> {
        let response = request.send().await.map_err(transport)?;
        let reply: EnergyReply = Self::check(response, team)?.json().await.map_err(decode)?;
        Ok(reply.balance())
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}

fn decode(e: reqwest::Error) -> StoreError {
    StoreError::Decode(e.to_string())
}

#[async_trait(?Send)]
impl BoardStore for RestStore {
    async fn fetch_board(&self, team: &TeamRef) -> Result<BoardConfig, StoreError> {
        let url = self.team_url(team, "board");
        tracing::debug!(%url, "fetching board");
        let response = self.client.get(url).send().await.map_err(transport)?;
        Self::check(response, team)?.json().await.map_err(decode)
    }

    async fn push_board(&self, team: &TeamRef, board: &BoardConfig) -> Result<(), StoreError> {
        let url = self.team_url(team, "board");
        tracing::debug!(%url, "pushing board");
        let response = self
            .client
            .put(url)
            .json(&BoardUpdate { board_state: board })
            .send()
            .await
            .map_err(transport)?;
        Self::check(response, team)?;
        Ok(())
    }

    async fn fetch_energy(&self, team: &TeamRef) -> Result<u32, StoreError> {
        self.energy(self.client.get(self.team_url(team, "energy")), team).await
    }

    async fn push_energy_delta(&self, team: &TeamRef, delta: i64) -> Result<u32, StoreError> {
        let request = self.client.put(self.team_url(team, "energy")).json(&EnergyChange { change: delta });
        self.energy(request, team).await
    }
}
