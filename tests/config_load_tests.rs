use tempfile::tempdir;
use vitalstream::{DashboardConfig, ReconnectPolicy};

#[tokio::test]
async fn test_load_creates_default_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("nested").join("dashboard.json");

    let config = DashboardConfig::load(&config_path).await.unwrap();

    assert!(config_path.exists());
    assert_eq!(config, DashboardConfig::default());
}

#[tokio::test]
async fn test_load_custom_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("dashboard.json");
    tokio::fs::write(
        &config_path,
        r#"{
            "capacity": 120,
            "step_quantum": 0.2,
            "reconnect_policy": "clear-on-reconnect",
            "channels": [{"id": "Solar8000/HR", "name": "Heart Rate"}]
        }"#,
    )
    .await
    .unwrap();

    let config = DashboardConfig::load(&config_path).await.unwrap();

    assert_eq!(config.capacity, 120);
    assert_eq!(config.step_quantum, 0.2);
    assert_eq!(config.reconnect_policy, ReconnectPolicy::ClearOnReconnect);
    assert_eq!(config.catalog().channels().len(), 1);
    assert_eq!(config.prediction_channel, "stroke_volume");
    assert_eq!(config.event_queue_capacity, 100);
}

#[tokio::test]
async fn test_load_rejects_invalid_values() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("dashboard.json");
    tokio::fs::write(&config_path, r#"{"capacity": 0}"#).await.unwrap();

    assert!(DashboardConfig::load(&config_path).await.is_err());
}

#[tokio::test]
async fn test_load_rejects_malformed_json() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("dashboard.json");
    tokio::fs::write(&config_path, "{ capacity: ").await.unwrap();

    let err = DashboardConfig::load(&config_path).await.unwrap_err();
    assert!(err.to_string().contains("Failed to parse config JSON"));
}

#[tokio::test]
async fn test_load_rejects_quantum_that_would_drift() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("dashboard.json");

    for quantum in ["0.25", "0.04"] {
        tokio::fs::write(&config_path, format!(r#"{{"step_quantum": {}}}"#, quantum))
            .await
            .unwrap();
        assert!(DashboardConfig::load(&config_path).await.is_err());
    }
}
