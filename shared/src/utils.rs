/// Short form of a session id for display, e.g. `3f2a9c1e...`.
pub fn short_id(id: &str) -> String {
    let prefix: String = id.chars().take(8).collect();
    if prefix.len() < id.len() {
        format!("{}...", prefix)
    } else {
        prefix
    }
}
