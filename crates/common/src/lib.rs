pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serializes_as_status_object() -> anyhow::Result<()> {
        let body = serde_json::to_value(types::Health::ok())?;
        assert_eq!(body, serde_json::json!({ "status": "ok" }));
        Ok(())
    }
}
