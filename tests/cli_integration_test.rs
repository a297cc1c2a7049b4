//! Integration tests for the command handlers.
//!
//! Each handler is driven against a real INI config and a temp storage
//! directory, so the load, mutate, validate, save wiring is exercised
//! end to end instead of piece by piece.

use std::fs;
use std::path::PathBuf;

use stockfolio::adapters::file_config_adapter::FileConfigAdapter;
use stockfolio::adapters::file_storage_adapter::FileStorageAdapter;
use stockfolio::cli;
use stockfolio::domain::error::StockfolioError;
use stockfolio::domain::portfolio::Portfolio;
use tempfile::{NamedTempFile, TempDir};

/// Config whose storage path points at `dir`, with no market api key
/// configured so the mock quote adapter is used.
fn config_for(dir: &TempDir) -> FileConfigAdapter {
    let content = format!("[storage]\npath = {}\n", dir.path().display());
    FileConfigAdapter::from_string(&content).unwrap()
}

fn write_csv(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("upload.csv");
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn load_snapshot(dir: &TempDir) -> Portfolio {
    let storage = FileStorageAdapter::new(dir.path().to_path_buf());
    Portfolio::load(&storage)
}

const TWO_ROWS: &str = "ticker,quantity,price,date\n\
    AAPL,10,150,2024-01-01\n\
    MSFT,5,310,2023-11-20";

mod config_loading {
    use super::*;
    use std::io::Write;

    #[test]
    fn valid_ini_file_loads() {
        let storage_dir = TempDir::new().unwrap();
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\npath = {}", storage_dir.path().display()).unwrap();

        assert!(cli::load_config(&file.path().to_path_buf()).is_ok());
    }

    #[test]
    fn missing_storage_path_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[market]\napi_key = token").unwrap();

        let err = cli::load_config(&file.path().to_path_buf()).unwrap_err();
        assert!(matches!(
            err,
            StockfolioError::ConfigMissing { ref section, ref key }
                if section == "storage" && key == "path"
        ));
    }

    #[test]
    fn unreadable_file_is_a_parse_error() {
        let path = PathBuf::from("/no/such/stockfolio.ini");
        let err = cli::load_config(&path).unwrap_err();
        assert!(matches!(err, StockfolioError::ConfigParse { .. }));
    }
}

mod import {
    use super::*;

    #[test]
    fn import_persists_the_parsed_holdings() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);
        let (_csv_dir, csv_path) = write_csv(TWO_ROWS);

        cli::run_import(&config, &csv_path, false).unwrap();

        let snapshot = load_snapshot(&storage_dir);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.stocks[0].ticker, "AAPL");
        assert_eq!(snapshot.total_value, 1500.0 + 1550.0);
        assert!(snapshot.last_updated.is_some());
    }

    #[test]
    fn invalid_rows_leave_the_snapshot_untouched() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);
        cli::run_add(&config, "AAPL,10,150,2024-01-01").unwrap();

        let (_csv_dir, csv_path) = write_csv(
            "ticker,quantity,price,date\n\
             MSFT,5,310,2023-11-20\n\
             XYZ,-5,10,bad-date",
        );
        let err = cli::run_import(&config, &csv_path, false).unwrap_err();

        assert!(matches!(
            err,
            StockfolioError::Validation { ref errors }
                if errors == &["Row 2: Invalid quantity", "Row 2: Invalid purchase date"]
        ));

        // Nothing was written: the prior single-holding snapshot survives.
        let snapshot = load_snapshot(&storage_dir);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.stocks[0].ticker, "AAPL");
    }

    #[test]
    fn malformed_numbers_abort_before_the_store() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);
        let (_csv_dir, csv_path) = write_csv(
            "ticker,quantity,price,date\n\
             AAPL,ten,150,2024-01-01",
        );

        let err = cli::run_import(&config, &csv_path, false).unwrap_err();
        assert!(matches!(err, StockfolioError::Parse(_)));
        assert!(load_snapshot(&storage_dir).is_empty());
    }

    #[test]
    fn import_replaces_existing_holdings() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);
        cli::run_add(&config, "GOOGL,2,140,2024-03-01").unwrap();

        let (_csv_dir, csv_path) = write_csv(TWO_ROWS);
        cli::run_import(&config, &csv_path, false).unwrap();

        let snapshot = load_snapshot(&storage_dir);
        let tickers: Vec<&str> = snapshot.stocks.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn append_extends_existing_holdings() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);
        cli::run_add(&config, "GOOGL,2,140,2024-03-01").unwrap();

        let (_csv_dir, csv_path) = write_csv(TWO_ROWS);
        cli::run_import(&config, &csv_path, true).unwrap();

        let snapshot = load_snapshot(&storage_dir);
        let tickers: Vec<&str> = snapshot.stocks.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["GOOGL", "AAPL", "MSFT"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);

        let err = cli::run_import(&config, &PathBuf::from("/no/such/upload.csv"), false)
            .unwrap_err();
        assert!(matches!(err, StockfolioError::Io(_)));
    }
}

mod add_and_remove {
    use super::*;

    #[test]
    fn add_parses_and_persists_one_row() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);

        cli::run_add(&config, "aapl,10,150,2024-01-01").unwrap();

        let snapshot = load_snapshot(&storage_dir);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.stocks[0].ticker, "AAPL");
        assert_eq!(snapshot.total_value, 1500.0);
    }

    #[test]
    fn add_with_invalid_values_writes_nothing() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);

        let err = cli::run_add(&config, "XYZ,-5,10,bad-date").unwrap_err();
        assert!(matches!(err, StockfolioError::Validation { .. }));

        // No snapshot file was ever created.
        let storage = FileStorageAdapter::new(storage_dir.path().to_path_buf());
        assert!(Portfolio::load(&storage).is_empty());
        assert!(!storage_dir.path().join("portfolio.json").exists());
    }

    #[test]
    fn remove_deletes_by_id_and_persists() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);
        cli::run_add(&config, "AAPL,10,150,2024-01-01").unwrap();
        cli::run_add(&config, "MSFT,5,310,2023-11-20").unwrap();

        let id = load_snapshot(&storage_dir).stocks[0].id;
        cli::run_remove(&config, id).unwrap();

        let snapshot = load_snapshot(&storage_dir);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.stocks[0].ticker, "MSFT");
    }

    #[test]
    fn remove_unknown_id_keeps_the_snapshot() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);
        cli::run_add(&config, "AAPL,10,150,2024-01-01").unwrap();

        cli::run_remove(&config, uuid::Uuid::new_v4()).unwrap();
        assert_eq!(load_snapshot(&storage_dir).len(), 1);
    }

    #[test]
    fn clear_empties_the_snapshot() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);
        cli::run_add(&config, "AAPL,10,150,2024-01-01").unwrap();

        cli::run_clear(&config).unwrap();

        let snapshot = load_snapshot(&storage_dir);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total_value, 0.0);
    }
}

mod save_failures {
    use super::*;

    #[test]
    fn unwritable_storage_path_surfaces_as_persistence_error() {
        // Point the storage directory at a regular file so the write
        // cannot create it.
        let blocker = NamedTempFile::new().unwrap();
        let content = format!("[storage]\npath = {}\n", blocker.path().display());
        let config = FileConfigAdapter::from_string(&content).unwrap();

        let err = cli::run_add(&config, "AAPL,10,150,2024-01-01").unwrap_err();
        assert!(matches!(err, StockfolioError::Persistence { .. }));
    }
}

mod export {
    use super::*;

    #[test]
    fn export_round_trips_through_the_generated_csv() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);
        cli::run_add(&config, "AAPL,10,150,2024-01-01").unwrap();
        cli::run_add(&config, "MSFT,5,310,2023-11-20").unwrap();

        let out_dir = TempDir::new().unwrap();
        let out_path = out_dir.path().join("holdings.csv");
        cli::run_export(&config, Some(out_path.as_path())).unwrap();

        let exported = fs::read_to_string(&out_path).unwrap();
        let reparsed = stockfolio::domain::record_parser::parse_csv(&exported).unwrap();
        assert_eq!(reparsed.len(), 2);
        assert_eq!(reparsed[0].ticker, "AAPL");
        assert_eq!(reparsed[1].purchase_price, 310.0);
    }
}

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn dashboard_runs_against_mock_market_data() {
        // No api_key configured, so quotes and news come from the
        // offline mock adapter.
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);
        cli::run_add(&config, "AAPL,10,150,2024-01-01").unwrap();

        cli::run_dashboard(&config).await.unwrap();
    }

    #[tokio::test]
    async fn dashboard_on_empty_portfolio_is_ok() {
        let storage_dir = TempDir::new().unwrap();
        let config = config_for(&storage_dir);

        cli::run_dashboard(&config).await.unwrap();
    }
}
