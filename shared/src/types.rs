/// Result type used by the outer layers (config, front-end, binary).
pub type Result<T> = anyhow::Result<T>;
