use crate::common::mocks::{
    FixedClock, PollOnlyConnectivity, RecordingNotifier, RecordingUi, ScriptedGateway,
};
use crate::common::{BASE_MILLIS, sample_input, setup_with};
use rollcall_offline::application::services::sync_engine::RECONNECTED_MESSAGE;
use rollcall_offline::domain::value_objects::{ConnectionStatus, ConnectivityEvent};
use rollcall_offline::presentation::views::NotificationLevel;
use rollcall_offline::infrastructure::MemoryKeyValueStore;
use rollcall_offline::{OfflineAttendance, OfflineAttendanceDeps, OfflineAttendanceOptions};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

async fn wait_until<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition().await {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition was not met in time");
}

#[tokio::test]
async fn test_refresh_status_reflects_offline_state() {
    let ctx = setup_with(OfflineAttendanceOptions::default(), false);

    let status = ctx.attendance.refresh_status();

    assert_eq!(status, ConnectionStatus::Offline);
    assert_eq!(status.label(), "Offline Mode");
    assert_eq!(ctx.ui.last_connection(), Some(ConnectionStatus::Offline));
    assert_eq!(ctx.ui.last_control_enabled(), Some(false));
}

#[tokio::test]
async fn test_start_renders_initial_state() {
    let ctx = setup_with(OfflineAttendanceOptions::default(), true);
    ctx.attendance
        .mark_attendance(sample_input(1, "John Smith"))
        .await
        .unwrap();

    let handle = ctx.attendance.start().await.unwrap();

    assert_eq!(ctx.ui.last_connection(), Some(ConnectionStatus::Online));
    assert_eq!(ctx.ui.last_control_enabled(), Some(true));
    assert_eq!(ctx.ui.last_badge().map(|badge| badge.count), Some(1));
    // 起動時は自動同期しない
    assert_eq!(ctx.gateway.call_count(), 0);
    handle.shutdown();
}

#[tokio::test]
async fn test_reconnect_triggers_auto_sync() {
    let ctx = setup_with(OfflineAttendanceOptions::default(), false);
    ctx.attendance
        .mark_attendance(sample_input(1, "John Smith"))
        .await
        .unwrap();
    ctx.gateway.accept(1);
    let handle = ctx.attendance.start().await.unwrap();

    assert!(ctx.connectivity.set_online(true));

    let notifier = ctx.notifier.clone();
    wait_until(|| {
        let notifier = notifier.clone();
        async move { notifier.count_level(NotificationLevel::Success) == 1 }
    })
    .await;

    assert_eq!(ctx.gateway.call_count(), 1);
    assert_eq!(ctx.attendance.pending_count().await.unwrap(), 0);
    let messages = ctx.notifier.messages();
    let reconnected = messages
        .iter()
        .position(|message| message == RECONNECTED_MESSAGE)
        .expect("reconnect notification");
    let success = messages
        .iter()
        .position(|message| message.starts_with("Successfully synced"))
        .expect("success notification");
    assert!(reconnected < success);
    assert_eq!(ctx.ui.last_connection(), Some(ConnectionStatus::Online));
    handle.shutdown();
}

#[tokio::test]
async fn test_reconnect_with_empty_queue_does_not_sync() {
    let ctx = setup_with(OfflineAttendanceOptions::default(), false);

    let result = ctx
        .attendance
        .monitor()
        .handle_event(ConnectivityEvent::Online)
        .await;

    assert!(result.is_none());
    assert_eq!(ctx.gateway.call_count(), 0);
    assert!(ctx.notifier.all().is_empty());
}

#[tokio::test]
async fn test_going_offline_updates_indicator_without_sync() {
    let ctx = setup_with(OfflineAttendanceOptions::default(), true);
    ctx.attendance
        .mark_attendance(sample_input(1, "John Smith"))
        .await
        .unwrap();
    let handle = ctx.attendance.start().await.unwrap();

    assert!(ctx.connectivity.set_online(false));

    let ui = ctx.ui.clone();
    wait_until(|| {
        let ui = ui.clone();
        async move {
            ui.last_connection() == Some(ConnectionStatus::Offline)
                && ui.last_control_enabled() == Some(false)
        }
    })
    .await;

    assert_eq!(ctx.gateway.call_count(), 0);
    handle.shutdown();
}

#[tokio::test]
async fn test_failed_auto_sync_keeps_records_for_next_attempt() {
    let ctx = setup_with(OfflineAttendanceOptions::default(), true);
    ctx.attendance
        .mark_attendance(sample_input(1, "John Smith"))
        .await
        .unwrap();
    ctx.gateway.reject("server busy");

    let result = ctx
        .attendance
        .monitor()
        .handle_event(ConnectivityEvent::Online)
        .await;

    assert!(matches!(result, Some(Err(_))));
    assert_eq!(ctx.attendance.pending_count().await.unwrap(), 1);
    assert_eq!(ctx.notifier.count_level(NotificationLevel::Danger), 1);
}

#[tokio::test]
async fn test_set_online_without_change_emits_nothing() {
    let ctx = setup_with(OfflineAttendanceOptions::default(), true);

    assert!(!ctx.connectivity.set_online(true));
}

#[tokio::test(start_paused = true)]
async fn test_periodic_refresh_picks_up_silent_state_change() {
    let connectivity = Arc::new(PollOnlyConnectivity::new(true));
    let ui = Arc::new(RecordingUi::new());
    let attendance = OfflineAttendance::new(
        OfflineAttendanceDeps {
            store: Arc::new(MemoryKeyValueStore::new()),
            connectivity: connectivity.clone(),
            gateway: Arc::new(ScriptedGateway::new()),
            ui: ui.clone(),
            notifier: Arc::new(RecordingNotifier::new()),
            clock: Arc::new(FixedClock::at(BASE_MILLIS)),
        },
        OfflineAttendanceOptions::default(),
    );
    let handle = attendance.start().await.unwrap();

    // 初回のティックを消化させる
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(ui.last_connection(), Some(ConnectionStatus::Online));

    connectivity.set_online_silently(false);
    tokio::time::sleep(Duration::from_secs(1)).await;
    // イベントが無いので次のティックまでは反映されない
    assert_eq!(ui.last_connection(), Some(ConnectionStatus::Online));
    assert_eq!(ui.last_control_enabled(), Some(true));

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(ui.last_connection(), Some(ConnectionStatus::Offline));
    assert_eq!(ui.last_control_enabled(), Some(false));

    connectivity.set_online_silently(true);
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(ui.last_connection(), Some(ConnectionStatus::Online));
    assert_eq!(ui.last_control_enabled(), Some(true));
    handle.shutdown();
}

#[tokio::test]
async fn test_lagged_events_still_trigger_auto_sync() {
    let ctx = setup_with(OfflineAttendanceOptions::default(), false);
    ctx.attendance
        .mark_attendance(sample_input(1, "John Smith"))
        .await
        .unwrap();
    ctx.gateway.accept(1);
    let handle = ctx.attendance.start().await.unwrap();

    // 監視タスクが動く前にバッファを溢れさせる
    for _ in 0..20 {
        ctx.connectivity.set_online(true);
        ctx.connectivity.set_online(false);
    }
    ctx.connectivity.set_online(true);

    let notifier = ctx.notifier.clone();
    wait_until(|| {
        let notifier = notifier.clone();
        async move { notifier.count_level(NotificationLevel::Success) == 1 }
    })
    .await;

    assert_eq!(ctx.gateway.call_count(), 1);
    assert_eq!(ctx.attendance.pending_count().await.unwrap(), 0);
    assert_eq!(ctx.ui.last_connection(), Some(ConnectionStatus::Online));
    handle.shutdown();
}

#[tokio::test]
async fn test_offline_transition_shows_while_auto_sync_in_flight() {
    let ctx = setup_with(OfflineAttendanceOptions::default(), false);
    ctx.attendance
        .mark_attendance(sample_input(1, "John Smith"))
        .await
        .unwrap();
    ctx.gateway.hold_next();
    ctx.gateway.accept(1);
    let handle = ctx.attendance.start().await.unwrap();

    ctx.connectivity.set_online(true);
    ctx.gateway.wait_entered().await;

    ctx.connectivity.set_online(false);
    let ui = ctx.ui.clone();
    wait_until(|| {
        let ui = ui.clone();
        async move {
            ui.last_connection() == Some(ConnectionStatus::Offline)
                && ui.last_control_enabled() == Some(false)
        }
    })
    .await;
    // 送信中の同期はまだ完了していない
    assert_eq!(ctx.notifier.count_level(NotificationLevel::Success), 0);

    ctx.gateway.release();
    let notifier = ctx.notifier.clone();
    wait_until(|| {
        let notifier = notifier.clone();
        async move { notifier.count_level(NotificationLevel::Success) == 1 }
    })
    .await;
    assert_eq!(ctx.attendance.pending_count().await.unwrap(), 0);
    handle.shutdown();
}
