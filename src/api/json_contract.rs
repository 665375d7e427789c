use serde::{Deserialize, Serialize};

use crate::error::{NavigatorError, NavigatorResult};

use super::NavigatorSnapshot;

pub const NAVIGATOR_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigatorSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: NavigatorSnapshot,
}

impl NavigatorSnapshot {
    pub fn to_json_pretty(&self) -> NavigatorResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            NavigatorError::InvalidData(format!("failed to serialize navigator snapshot: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> NavigatorResult<String> {
        let payload = NavigatorSnapshotJsonContractV1 {
            schema_version: NAVIGATOR_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            NavigatorError::InvalidData(format!(
                "failed to serialize navigator snapshot contract v1: {e}"
            ))
        })
    }

    /// Accepts either a bare snapshot or a versioned v1 contract payload.
    pub fn from_json_compat_str(input: &str) -> NavigatorResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<NavigatorSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: NavigatorSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                NavigatorError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != NAVIGATOR_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(NavigatorError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
