use super::{load_settings, Settings};
use list_core::SortDirection;
use shared::domain::AssetSortKey;

use std::{
    env, fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(name: &str, contents: &str) -> (PathBuf, PathBuf) {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();

    let temp_root = env::temp_dir().join(format!("ops_dashboard_config_{name}_{suffix}"));
    fs::create_dir_all(&temp_root).expect("create temp dir");
    let path = temp_root.join("dashboard.toml");
    fs::write(&path, contents).expect("write settings");
    (temp_root, path)
}

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn defaults_match_the_assets_page() {
    let settings = Settings::default();
    assert_eq!(settings.asset_count, 200);
    assert_eq!(settings.page_size, 20);
    assert_eq!(settings.sort_key, Some(AssetSortKey::UpdatedAt));
    assert_eq!(settings.sort_dir, SortDirection::Desc);
    assert!(!settings.simulate_error);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn missing_file_keeps_defaults() {
    let path = env::temp_dir().join("ops_dashboard_config_absent").join("dashboard.toml");
    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.page_size, Settings::default().page_size);
}

#[test]
fn reads_settings_file() {
    let (temp_root, path) = temp_settings_file(
        "file",
        "asset_count = 50\npage_size = 10\nsort_key = \"score\"\nsort_dir = \"asc\"\nsimulate_error = true\n",
    );

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.asset_count, 50);
    assert_eq!(settings.page_size, 10);
    assert_eq!(settings.sort_key, Some(AssetSortKey::Score));
    assert_eq!(settings.sort_dir, SortDirection::Asc);
    assert!(settings.simulate_error);
    assert!(settings.mock_latency);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn rejects_unknown_file_keys() {
    let (temp_root, path) = temp_settings_file("unknown", "page_sise = 10\n");
    let err = load_settings(&path).expect_err("typo should fail");
    assert!(err.to_string().contains("failed to parse settings file"));
    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn env_overrides_apply_and_ignore_other_variables() {
    let mut settings = Settings::default();
    settings
        .apply_env(vars(&[
            ("APP__PAGE_SIZE", "25"),
            ("APP__SORT_KEY", "none"),
            ("APP__SIMULATE_ERROR", "yes"),
            ("PATH", "/usr/bin"),
        ]))
        .expect("apply env");

    assert_eq!(settings.page_size, 25);
    assert_eq!(settings.sort_key, None);
    assert!(settings.simulate_error);
}

#[test]
fn invalid_env_values_name_the_variable() {
    let mut settings = Settings::default();
    let err = settings
        .apply_env(vars(&[("APP__SORT_DIR", "sideways")]))
        .expect_err("bad direction");
    assert!(err.to_string().contains("APP__SORT_DIR"));

}

#[test]
fn unknown_env_settings_are_recorded_not_fatal() {
    let mut settings = Settings::default();
    settings
        .apply_env(vars(&[
            ("APP__BIND_ADDR", "0.0.0.0:8443"),
            ("APP__PAGE_SIZE", "30"),
        ]))
        .expect("unknown names are skipped");

    assert_eq!(settings.page_size, 30);
    assert_eq!(settings.unknown_env, vec!["APP__BIND_ADDR".to_string()]);
}

#[test]
fn list_options_carry_sort_and_page_size() {
    let settings = Settings {
        page_size: 0,
        sort_key: Some(AssetSortKey::Name),
        sort_dir: SortDirection::Asc,
        ..Settings::default()
    };
    let options = settings.list_options();
    assert_eq!(options.initial_sort_key, Some(AssetSortKey::Name));
    assert_eq!(options.initial_sort_dir, SortDirection::Asc);

    let controller = list_core::ListController::new(options);
    assert_eq!(controller.page_size(), 1);
}
