use adverts::config::{ConfigError, ConfigLoader};
use std::{
    env, fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
};
use tempfile::TempDir;

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn env_guard() -> MutexGuard<'static, ()> {
    env_lock()
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

fn clear_env() {
    unsafe {
        env::remove_var("ADVERTS_PROFILE");
        env::remove_var("ADVERTS_LOG_LEVEL");
        env::remove_var("ADVERTS_LOG_FORMAT");
        env::remove_var("ADVERTS_DATABASE_URL");
        env::remove_var("ADVERTS_DB_MAX_CONNECTIONS");
        env::remove_var("ADVERTS_DB_ACQUIRE_TIMEOUT_MS");
        env::remove_var("ADVERTS_MEDIA_URL");
    }
}

fn write_env_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    fs::write(path, contents).unwrap();
}

#[test]
fn loads_defaults_when_no_env_present() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with defaults");

    assert_eq!(cfg.profile, "local");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.log_format, "json");
    assert_eq!(cfg.database_url, "sqlite://adverts.db?mode=rwc");
    assert_eq!(cfg.db_max_connections, 10);
    assert_eq!(cfg.db_acquire_timeout_ms, 5000);
    assert_eq!(cfg.media_url, "/media/");
    clear_env();
}

#[test]
fn layered_env_files_apply_in_order() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "ADVERTS_LOG_LEVEL=warn\n");
    write_env_file(&temp_dir, ".env.test", "ADVERTS_LOG_LEVEL=debug\n");
    write_env_file(&temp_dir, ".env.test.local", "ADVERTS_LOG_LEVEL=trace\n");

    // Select profile via .env.local before profile-specific files load.
    write_env_file(
        &temp_dir,
        ".env.local",
        "ADVERTS_PROFILE=test\nADVERTS_LOG_LEVEL=error\nADVERTS_MEDIA_URL=/uploads/\n",
    );

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with layered env files");

    assert_eq!(cfg.profile, "test");
    assert_eq!(cfg.log_level, "trace");
    assert_eq!(cfg.media_url, "/uploads/");
    clear_env();
}

#[test]
fn os_environment_has_highest_precedence() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(
        &temp_dir,
        ".env",
        "ADVERTS_DATABASE_URL=sqlite://from-file.db?mode=rwc\nADVERTS_DB_MAX_CONNECTIONS=3\n",
    );

    unsafe {
        env::set_var("ADVERTS_DATABASE_URL", "sqlite::memory:");
    }

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with env override");
    assert_eq!(cfg.database_url, "sqlite::memory:");
    assert_eq!(cfg.db_max_connections, 3);

    clear_env();
}

#[test]
fn unprefixed_variables_are_ignored() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "LOG_LEVEL=trace\nDATABASE_URL=postgres://elsewhere\n");

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.database_url, "sqlite://adverts.db?mode=rwc");

    clear_env();
}

#[test]
fn invalid_numbers_return_error() {
    let _guard = env_guard();
    clear_env();

    unsafe {
        env::set_var("ADVERTS_DB_MAX_CONNECTIONS", "lots");
    }
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("non-numeric pool size should fail");
    assert!(matches!(err, ConfigError::InvalidNumber { ref key, .. } if key == "ADVERTS_DB_MAX_CONNECTIONS"));

    clear_env();
}

#[test]
fn invalid_log_format_returns_error() {
    let _guard = env_guard();
    clear_env();

    unsafe {
        env::set_var("ADVERTS_LOG_FORMAT", "xml");
    }
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("unknown log format should fail");
    assert!(format!("{}", err).contains("log format"));

    clear_env();
}
