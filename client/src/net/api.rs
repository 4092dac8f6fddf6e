//! REST access to the game backend.
//!
//! Browser (csr): real HTTP calls via `gloo-net`, exposed to the engine as a
//! [`BoardStore`] so the shared [`SyncAdapter`](wheel::sync::SyncAdapter) can
//! drive it. Without the feature the endpoints still build (and are tested)
//! but nothing performs a request.
//!
//! ERROR HANDLING
//! ==============
//! Every call maps into `StoreError`; pages log and keep rendering whatever
//! state they already have.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(feature = "csr")]
use async_trait::async_trait;
#[cfg(feature = "csr")]
use wheel::board::BoardConfig;
#[cfg(feature = "csr")]
use wheel::sync::BoardStore;
use wheel::sync::StoreError;
#[cfg(any(test, feature = "csr"))]
use wheel::sync::TeamRef;

#[cfg(feature = "csr")]
use super::types::{BoardUpdate, EnergyChange, EnergyReply};
use super::types::RoomInfo;

/// Path prefix of the REST API.
pub const API_BASE: &str = "/api";

/// Percent-encode one path segment. Team names carry spaces and punctuation.
#[cfg(any(test, feature = "csr"))]
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(any(test, feature = "csr"))]
fn room_endpoint(base: &str, room_code: &str) -> String {
    format!("{base}/rooms/{}", encode_segment(room_code))
}

#[cfg(any(test, feature = "csr"))]
fn team_endpoint(base: &str, team: &TeamRef, leaf: &str) -> String {
    format!("{}/teams/{}/{leaf}", room_endpoint(base, &team.room_code), encode_segment(&team.team_name))
}

#[cfg(any(test, feature = "csr"))]
fn board_endpoint(base: &str, team: &TeamRef) -> String {
    team_endpoint(base, team, "board")
}

#[cfg(any(test, feature = "csr"))]
fn energy_endpoint(base: &str, team: &TeamRef) -> String {
    team_endpoint(base, team, "energy")
}

/// Map a non-success status to the store error the adapter logs.
#[cfg(any(test, feature = "csr"))]
fn status_error(status: u16, team: &TeamRef) -> StoreError {
    if status == 404 {
        StoreError::NotFound(team.team_name.clone())
    } else {
        StoreError::Status { status }
    }
}

/// HTTP-backed [`BoardStore`].
#[derive(Clone, Debug)]
pub struct HttpStore {
    base: String,
}

impl Default for HttpStore {
    fn default() -> Self {
        Self::new(API_BASE)
    }
}

impl HttpStore {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into().trim_end_matches('/').to_owned() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

#[cfg(feature = "csr")]
async fn read_json<T: serde::de::DeserializeOwned>(
    resp: gloo_net::http::Response,
    team: &TeamRef,
) -> Result<T, StoreError> {
    if !resp.ok() {
        return Err(status_error(resp.status(), team));
    }
    resp.json::<T>().await.map_err(|e| StoreError::Decode(e.to_string()))
}

#[cfg(feature = "csr")]
#[async_trait(?Send)]
impl BoardStore for HttpStore {
    async fn fetch_board(&self, team: &TeamRef) -> Result<BoardConfig, StoreError> {
        let resp = gloo_net::http::Request::get(&board_endpoint(&self.base, team))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        read_json(resp, team).await
    }

    async fn push_board(&self, team: &TeamRef, board: &BoardConfig) -> Result<(), StoreError> {
        let resp = gloo_net::http::Request::put(&board_endpoint(&self.base, team))
            .json(&BoardUpdate { board_state: board })
            .map_err(|e| StoreError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        if !resp.ok() {
            return Err(status_error(resp.status(), team));
        }
        Ok(())
    }

    async fn fetch_energy(&self, team: &TeamRef) -> Result<u32, StoreError> {
        let resp = gloo_net::http::Request::get(&energy_endpoint(&self.base, team))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let reply: EnergyReply = read_json(resp, team).await?;
        Ok(reply.balance())
    }

    async fn push_energy_delta(&self, team: &TeamRef, delta: i64) -> Result<u32, StoreError> {
        let resp = gloo_net::http::Request::put(&energy_endpoint(&self.base, team))
            .json(&EnergyChange { change: delta })
            .map_err(|e| StoreError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let reply: EnergyReply = read_json(resp, team).await?;
        Ok(reply.balance())
    }
}

/// Fetch room metadata (timer state and team list) for `room_code`.
///
/// # Errors
///
/// Returns a transport, status, or decode error.
pub async fn fetch_room(store: &HttpStore, room_code: &str) -> Result<RoomInfo, StoreError> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(&room_endpoint(store.base(), room_code))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        if !resp.ok() {
            return Err(status_error(resp.status(), &TeamRef::new(room_code, "")));
        }
        resp.json::<RoomInfo>().await.map_err(|e| StoreError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(StoreError::Transport(format!("no HTTP client for {}/rooms/{room_code}", store.base())))
    }
}
