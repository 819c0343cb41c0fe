//! Connection management.

use tracing::{debug, warn};

use super::{ConnectionConfig, Connector, DatabaseBackend, DbError};

/// Open a connection, run `body` against it, and close it on every exit path.
///
/// A failure to open is returned as-is. Once open, the connection is closed
/// after `body` returns, whether it succeeded or not, and the body's result is
/// returned unchanged. Close failures are logged and otherwise ignored.
pub fn with_connection<T, F>(
    connector: &dyn Connector,
    config: ConnectionConfig,
    body: F,
) -> Result<T, DbError>
where
    F: FnOnce(&mut dyn DatabaseBackend) -> Result<T, DbError>,
{
    let mut conn = connector.open(config)?;
    let backend = conn.backend_name();
    debug!(backend, "Connection opened");

    let result = body(conn.as_mut());

    match conn.close() {
        Ok(()) => debug!(backend, "Connection closed"),
        Err(e) => warn!(backend, error = %e, "Failed to close connection"),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Credential;
    use crate::test_utils::RecordingConnector;
    use rstest::rstest;

    fn config() -> ConnectionConfig {
        ConnectionConfig::from_credential(&Credential::default())
    }

    #[rstest]
    fn test_closes_after_success() {
        let connector = RecordingConnector::new();
        let value = with_connection(&connector, config(), |_| Ok(42)).unwrap();
        assert_eq!(value, 42);
        assert_eq!(connector.log().opens, 1);
        assert_eq!(connector.log().closes, 1);
    }

    #[rstest]
    fn test_closes_after_failure() {
        let connector = RecordingConnector::new();
        let result: Result<(), DbError> = with_connection(&connector, config(), |_| {
            Err(DbError::QueryFailed {
                message: "boom".to_string(),
            })
        });
        assert!(matches!(result, Err(DbError::QueryFailed { .. })));
        assert_eq!(connector.log().closes, 1);
    }

    #[rstest]
    fn test_close_failure_does_not_mask_result() {
        let connector = RecordingConnector::new().failing_close();
        let value = with_connection(&connector, config(), |_| Ok("rows")).unwrap();
        assert_eq!(value, "rows");
        assert_eq!(connector.log().closes, 1);
    }

    #[rstest]
    fn test_open_failure_skips_body() {
        let connector = RecordingConnector::new().failing_open();
        let mut ran = false;
        let result = with_connection(&connector, config(), |_| {
            ran = true;
            Ok(())
        });
        assert!(matches!(result, Err(DbError::ConnectFailed { .. })));
        assert!(!ran);
        assert_eq!(connector.log().closes, 0);
    }

    #[rstest]
    fn test_consumes_config_once() {
        let connector = RecordingConnector::new();
        let mut cfg = config();
        cfg.host = "tsdb.example".to_string();
        with_connection(&connector, cfg, |_| Ok(())).unwrap();
        assert_eq!(connector.log().configs.len(), 1);
        assert_eq!(connector.log().configs[0].host, "tsdb.example");
    }
}
