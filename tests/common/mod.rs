#![allow(dead_code)]

pub mod mocks;

use mocks::{FixedClock, RecordingNotifier, RecordingUi, ScriptedGateway};
use rollcall_offline::application::ports::{KeyValueStore, SyncGateway};
use rollcall_offline::infrastructure::{ManualConnectivity, MemoryKeyValueStore};
use rollcall_offline::{
    AttendanceInput, CachedMember, CachedService, OfflineAttendance, OfflineAttendanceDeps,
    OfflineAttendanceOptions,
};
use std::sync::Arc;

/// 2024-01-01T00:00:00Z
pub const BASE_MILLIS: i64 = 1_704_067_200_000;

pub struct TestContext {
    pub attendance: Arc<OfflineAttendance>,
    pub store: Arc<MemoryKeyValueStore>,
    pub connectivity: Arc<ManualConnectivity>,
    pub gateway: Arc<ScriptedGateway>,
    pub ui: Arc<RecordingUi>,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: Arc<FixedClock>,
}

pub fn setup() -> TestContext {
    setup_with(OfflineAttendanceOptions::default(), true)
}

pub fn setup_with(options: OfflineAttendanceOptions, online: bool) -> TestContext {
    let gateway = Arc::new(ScriptedGateway::new());
    let store = Arc::new(MemoryKeyValueStore::new());
    let (attendance, connectivity, ui, notifier, clock) = build_attendance(
        store.clone(),
        gateway.clone(),
        options,
        online,
    );

    TestContext {
        attendance,
        store,
        connectivity,
        gateway,
        ui,
        notifier,
        clock,
    }
}

/// 任意のストアとゲートウェイでファサードを組み立てる
pub fn build_attendance(
    store: Arc<dyn KeyValueStore>,
    gateway: Arc<dyn SyncGateway>,
    options: OfflineAttendanceOptions,
    online: bool,
) -> (
    Arc<OfflineAttendance>,
    Arc<ManualConnectivity>,
    Arc<RecordingUi>,
    Arc<RecordingNotifier>,
    Arc<FixedClock>,
) {
    let connectivity = Arc::new(ManualConnectivity::new(online));
    let ui = Arc::new(RecordingUi::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let clock = Arc::new(FixedClock::at(BASE_MILLIS));

    let attendance = OfflineAttendance::new(
        OfflineAttendanceDeps {
            store,
            connectivity: connectivity.clone(),
            gateway,
            ui: ui.clone(),
            notifier: notifier.clone(),
            clock: clock.clone(),
        },
        options,
    );

    (Arc::new(attendance), connectivity, ui, notifier, clock)
}

pub fn sample_input(member_id: i64, member_name: &str) -> AttendanceInput {
    AttendanceInput {
        member_id,
        member_name: member_name.to_string(),
        member_phone: format!("555-01{:02}", member_id),
        service_id: 10,
        service_name: "Sunday Service".to_string(),
    }
}

pub fn sample_members() -> Vec<CachedMember> {
    vec![
        CachedMember::new(Some(1), "John Smith", "555-0101"),
        CachedMember::new(Some(2), "Jane Doe", "555-0199"),
        CachedMember::new(Some(3), "Bob Johnson", "555-0142"),
    ]
}

pub fn sample_services() -> Vec<CachedService> {
    vec![
        CachedService::new(Some(10), "Sunday Service"),
        CachedService::new(Some(11), "Midweek Prayer"),
    ]
}
