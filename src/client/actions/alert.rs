use std::time::Duration;

use uuid::Uuid;

use crate::client::actions::{Action, Alert, AlertAction, AlertKind};
use crate::client::store::Store;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Shows a transient alert and schedules its removal.
pub fn set_alert(store: &Store, msg: impl Into<String>, kind: AlertKind, timeout: Duration) -> Uuid {
    let id = Uuid::new_v4();
    store.dispatch(Action::Alert(AlertAction::Set(Alert {
        id,
        msg: msg.into(),
        kind,
    })));

    let store = store.clone();
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        store.dispatch(Action::Alert(AlertAction::Remove(id)));
    });

    id
}
