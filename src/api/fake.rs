//! In-memory [`TrackerApi`] for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::types::{Device, Geofence, NewGeofence, Permission, Position, Server, StatisticsRecord, User};
use super::TrackerApi;
use crate::error::{ApiError, ApiResult};

#[derive(Default)]
pub(crate) struct FakeState {
    pub user: User,
    pub server: Server,
    pub devices: Vec<Device>,
    pub positions: Vec<Position>,
    pub geofences: Vec<Geofence>,
    pub permissions: Vec<Permission>,
    pub statistics: VecDeque<ApiResult<Vec<StatisticsRecord>>>,
    pub fail_geofence: Option<String>,
    pub fail_permission: Option<String>,
    pub fail_delete_geofence: Option<String>,
    pub fail_devices: Option<String>,
    pub calls: Vec<String>,
}

#[derive(Default)]
pub(crate) struct FakeApi {
    pub state: Mutex<FakeState>,
}

fn rejected(body: &str) -> ApiError {
    ApiError::Status {
        status: 400,
        body: body.to_string(),
    }
}

impl FakeApi {
    pub fn with<F: FnOnce(&mut FakeState)>(setup: F) -> Self {
        let api = FakeApi::default();
        setup(&mut api.state.lock().unwrap());
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: String) -> std::sync::MutexGuard<'_, FakeState> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state
    }
}

impl TrackerApi for FakeApi {
    async fn session(&self) -> ApiResult<User> {
        Ok(self.record("GET /api/session".into()).user.clone())
    }

    async fn server(&self) -> ApiResult<Server> {
        Ok(self.record("GET /api/server".into()).server.clone())
    }

    async fn devices(&self) -> ApiResult<Vec<Device>> {
        let state = self.record("GET /api/devices".into());
        match &state.fail_devices {
            Some(body) => Err(rejected(body)),
            None => Ok(state.devices.clone()),
        }
    }

    async fn positions(&self) -> ApiResult<Vec<Position>> {
        Ok(self.record("GET /api/positions".into()).positions.clone())
    }

    async fn delete_device(&self, id: i64) -> ApiResult<()> {
        let mut state = self.record(format!("DELETE /api/devices/{}", id));
        state.devices.retain(|d| d.id != id);
        Ok(())
    }

    async fn create_geofence(&self, geofence: &NewGeofence) -> ApiResult<Geofence> {
        let mut state = self.record(format!("POST /api/geofences {}", geofence.area));
        if let Some(body) = &state.fail_geofence {
            return Err(rejected(body));
        }
        let created = Geofence {
            id: state.geofences.len() as i64 + 100,
            name: geofence.name.clone(),
            area: geofence.area.clone(),
            description: None,
            attributes: Default::default(),
        };
        state.geofences.push(created.clone());
        Ok(created)
    }

    async fn delete_geofence(&self, id: i64) -> ApiResult<()> {
        let mut state = self.record(format!("DELETE /api/geofences/{}", id));
        if let Some(body) = &state.fail_delete_geofence {
            return Err(rejected(body));
        }
        state.geofences.retain(|g| g.id != id);
        Ok(())
    }

    async fn create_permission(&self, permission: &Permission) -> ApiResult<()> {
        let mut state = self.record(format!(
            "POST /api/permissions {}->{}",
            permission.device_id, permission.geofence_id
        ));
        if let Some(body) = &state.fail_permission {
            return Err(rejected(body));
        }
        state.permissions.push(*permission);
        Ok(())
    }

    async fn statistics(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ApiResult<Vec<StatisticsRecord>> {
        let mut state = self.record(format!(
            "GET /api/statistics {} {}",
            from.to_rfc3339(),
            to.to_rfc3339()
        ));
        state.statistics.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn media(&self, unique_id: &str, name: &str) -> ApiResult<Vec<u8>> {
        self.record(format!("GET /api/media/{}/{}", unique_id, name));
        Err(rejected("no media"))
    }
}
