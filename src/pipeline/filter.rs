use crate::models::{Alert, DependencyScope};

/// An alert is reported when it is high or critical, ships at runtime, and has
/// been neither fixed nor dismissed.
pub fn is_reportable(alert: &Alert) -> bool {
    alert.security_advisory.severity.is_high_priority()
        && alert.dependency_scope == Some(DependencyScope::Runtime)
        && alert.fixed_at.is_none()
        && alert.dismissed_at.is_none()
}

/// Keep reportable alerts, preserving page order.
pub fn filter_alerts(alerts: &[Alert]) -> Vec<Alert> {
    alerts.iter().filter(|a| is_reportable(a)).cloned().collect()
}
