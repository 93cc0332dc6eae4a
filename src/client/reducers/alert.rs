use crate::client::actions::{Alert, AlertAction};

pub fn reduce(alerts: &[Alert], action: &AlertAction) -> Vec<Alert> {
    match action {
        AlertAction::Set(alert) => {
            let mut next = alerts.to_vec();
            next.push(alert.clone());
            next
        }
        AlertAction::Remove(id) => alerts.iter().filter(|a| a.id != *id).cloned().collect(),
    }
}
