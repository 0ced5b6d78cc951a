use shared::AppConfig;

/// Configuration baked in at build time.
///
/// `ATTENDANCE_API_BASE_URL` points at the attendance store and
/// `ATTENDANCE_LOG_LEVEL` sets the console log level (`info` by default).
pub fn app_config() -> AppConfig {
    AppConfig::from_values(
        option_env!("ATTENDANCE_API_BASE_URL"),
        option_env!("ATTENDANCE_LOG_LEVEL"),
    )
}
