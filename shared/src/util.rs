/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a fresh string ID for a resource (UUID v4).
///
/// Used by both desk-server and the client for offline-created resources,
/// so both sides agree on the ID format.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
