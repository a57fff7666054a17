use crate::application::ports::ConnectivityProvider;
use crate::domain::value_objects::ConnectivityEvent;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

/// ホスト側が明示的に切り替える接続状態
pub struct ManualConnectivity {
    online: AtomicBool,
    events: broadcast::Sender<ConnectivityEvent>,
}

impl ManualConnectivity {
    pub fn new(initially_online: bool) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            online: AtomicBool::new(initially_online),
            events,
        }
    }

    /// 状態を更新し、変化があった場合のみ遷移イベントを送る
    pub fn set_online(&self, online: bool) -> bool {
        let previous = self.online.swap(online, Ordering::SeqCst);
        if previous == online {
            return false;
        }

        let event = if online {
            ConnectivityEvent::Online
        } else {
            ConnectivityEvent::Offline
        };
        tracing::info!(
            target: "offline::connectivity",
            online,
            "connectivity changed"
        );
        // 購読者がいない場合の送信エラーは無視してよい
        let _ = self.events.send(event);
        true
    }
}

impl Default for ManualConnectivity {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConnectivityProvider for ManualConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> broadcast::Receiver<ConnectivityEvent> {
        self.events.subscribe()
    }
}
