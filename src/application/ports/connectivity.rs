use crate::domain::value_objects::ConnectivityEvent;
use tokio::sync::broadcast;

/// ネットワーク到達性の提供元
///
/// `subscribe` は状態が実際に変化したときだけイベントを流す。
pub trait ConnectivityProvider: Send + Sync {
    fn is_online(&self) -> bool;
    fn subscribe(&self) -> broadcast::Receiver<ConnectivityEvent>;
}
