//! Settings resolution against the real process environment

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use shared::Settings;
    use std::path::Path;

    const VARS: [&str; 5] = ["TICKERS", "START_DATE", "END_DATE", "DB_URL", "LOG_LEVEL"];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    /// Runs `f` with the working directory switched to `dir`.
    fn in_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        let result = f();
        std::env::set_current_dir(previous).unwrap();
        result
    }

    #[test]
    #[serial]
    fn test_from_process_env_defaults() {
        clear_env();

        let settings = Settings::from_process_env();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.ticker_list(), vec!["SPY", "AGG", "GLD"]);
    }

    #[test]
    #[serial]
    fn test_from_process_env_ignores_dotenv_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "TICKERS=QQQ,TLT\nLOG_LEVEL=DEBUG\n").unwrap();

        let settings = in_dir(dir.path(), Settings::from_process_env);
        clear_env();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    #[serial]
    fn test_from_env_loads_dotenv_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "TICKERS=QQQ,TLT\nLOG_LEVEL=DEBUG\n").unwrap();

        let settings = in_dir(dir.path(), Settings::from_env);
        clear_env();

        assert_eq!(settings.ticker_list(), vec!["QQQ", "TLT"]);
        assert_eq!(settings.log_level, "DEBUG");
        assert_eq!(settings.start_date, "2016-01-01");
    }

    #[test]
    #[serial]
    fn test_from_env_reads_variables() {
        clear_env();
        std::env::set_var("TICKERS", " spy , agg ,,gld ");
        std::env::set_var("START_DATE", "2020-01-01");
        std::env::set_var("END_DATE", "2023-06-30");
        std::env::set_var("DB_URL", "postgres://analyst@db:5432/cfa");
        std::env::set_var("LOG_LEVEL", "DEBUG");

        // Every variable is set, so a local .env cannot change the outcome
        let settings = Settings::from_env();
        clear_env();

        assert_eq!(settings.ticker_list(), vec!["SPY", "AGG", "GLD"]);
        assert_eq!(settings.start_date, "2020-01-01");
        assert_eq!(settings.end_date.as_deref(), Some("2023-06-30"));
        assert_eq!(settings.db_url, "postgres://analyst@db:5432/cfa");
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    #[serial]
    fn test_from_process_env_empty_end_date_is_none() {
        clear_env();
        std::env::set_var("END_DATE", "");

        let settings = Settings::from_process_env();
        clear_env();

        assert_eq!(settings.end_date, None);
    }
}
