use crate::clients::error::ClientError;
use crate::clients::http::ApiClient;
use crate::clients::types::RoomFilter;
use crate::models::{
    ApiResponse, FloorRooms, InitializeRoomsData, OccupancySummary, RoomDetail, RoomList,
};
use serde_json::json;
use tracing::info;

/// Client for the `{base}/rooms` endpoints
#[derive(Debug, Clone)]
pub struct RoomClient {
    api: ApiClient,
}

impl RoomClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Ask the server to create its room inventory if it has none yet
    pub async fn initialize_rooms(&self) -> Result<ApiResponse<InitializeRoomsData>, ClientError> {
        let response: ApiResponse<InitializeRoomsData> =
            self.api.post("rooms/initialize", json!({})).await?;
        info!(count = response.data.count, "{}", response.data.message);
        Ok(response)
    }

    pub async fn get_all_rooms(
        &self,
        filter: &RoomFilter,
    ) -> Result<ApiResponse<RoomList>, ClientError> {
        self.api.get("rooms", &filter.to_query()).await
    }

    pub async fn get_available_rooms(&self) -> Result<ApiResponse<RoomList>, ClientError> {
        self.api.get("rooms/available", &[]).await
    }

    pub async fn get_rooms_by_floor(
        &self,
        floor: u32,
    ) -> Result<ApiResponse<FloorRooms>, ClientError> {
        self.api.get(&format!("rooms/floor/{}", floor), &[]).await
    }

    pub async fn get_room_by_number(
        &self,
        room_number: u32,
    ) -> Result<ApiResponse<RoomDetail>, ClientError> {
        self.api.get(&format!("rooms/{}", room_number), &[]).await
    }

    pub async fn get_occupancy_summary(
        &self,
    ) -> Result<ApiResponse<OccupancySummary>, ClientError> {
        self.api.get("rooms/occupancy/summary", &[]).await
    }
}
