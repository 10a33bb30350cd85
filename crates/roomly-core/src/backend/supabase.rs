//! PostgREST client for a Supabase project.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{BackendError, BackendResult, BookingBackend};
use crate::config::BackendConfig;
use crate::models::{format_timestamp, NewReservation, Reservation, Room, RoomId, TimeWindow};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const ROOMS_TABLE: &str = "rooms";
const RESERVATIONS_TABLE: &str = "reservations";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const MAX_ERROR_BODY_CHARS: usize = 180;

#[derive(Clone)]
pub struct SupabaseBackend {
    rest_url: String,
    anon_key: String,
    client: Client,
}

impl SupabaseBackend {
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            rest_url: config.rest_url().to_string(),
            anon_key: config.anon_key().to_string(),
            client,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }

    fn public_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> BackendResult<T> {
        let response = self.public_request(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::api(
                status.as_u16(),
                parse_api_error(status, &body),
            ));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl BookingBackend for SupabaseBackend {
    async fn list_rooms(&self) -> BackendResult<Vec<Room>> {
        tracing::debug!(table = ROOMS_TABLE, "Listing rooms");
        let request = self
            .client
            .get(self.table_url(ROOMS_TABLE))
            .query(&[("select", "*")]);
        self.send_json(request).await
    }

    async fn list_conflicting_room_ids(&self, window: TimeWindow) -> BackendResult<Vec<RoomId>> {
        tracing::debug!(
            start = %window.start_param(),
            end = %window.end_param(),
            "Listing conflicting reservations"
        );
        let request = self
            .client
            .get(self.table_url(RESERVATIONS_TABLE))
            .query(&[
                ("select", "room_id".to_string()),
                ("start_time", format!("lt.{}", window.end_param())),
                ("end_time", format!("gt.{}", window.start_param())),
            ]);
        let rows: Vec<RoomIdRow> = self.send_json(request).await?;
        Ok(rows.into_iter().map(|row| row.room_id).collect())
    }

    async fn insert_reservation(&self, reservation: &NewReservation) -> BackendResult<Reservation> {
        tracing::debug!(room_id = %reservation.room_id, "Inserting reservation");
        let request = self
            .client
            .post(self.table_url(RESERVATIONS_TABLE))
            .header("Prefer", "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(reservation);
        self.send_json(request).await
    }

    async fn list_reservations_from(
        &self,
        from: DateTime<Utc>,
        limit: usize,
    ) -> BackendResult<Vec<Reservation>> {
        tracing::debug!(limit, "Listing upcoming reservations");
        let request = self
            .client
            .get(self.table_url(RESERVATIONS_TABLE))
            .query(&[
                ("select", "*,rooms(name)".to_string()),
                ("start_time", format!("gte.{}", format_timestamp(from))),
                ("order", "start_time.asc".to_string()),
                ("limit", limit.to_string()),
            ]);
        self.send_json(request).await
    }
}

#[derive(Debug, Deserialize)]
struct RoomIdRow {
    room_id: RoomId,
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorResponse {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
    code: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<PostgrestErrorResponse>(body) {
        if let Some(message) = payload.message {
            let mut rendered = message.trim().to_string();
            if let Some(code) = payload.code {
                rendered = format!("{rendered} [{code}]");
            }
            if let Some(details) = payload.details.or(payload.hint) {
                rendered = format!("{rendered}: {}", details.trim());
            }
            return rendered;
        }
    }

    let trimmed: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        trimmed
    }
}
