//! TDS session establishment over TCP.
//!
//! One session is opened per search run and reused for every catalog and
//! probe query. Credentials are consumed during the handshake and never
//! logged.

use tiberius::{AuthMethod, Client, Config};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use crate::config::ConnectionConfig;
use crate::error::{DbGrepError, Result};

/// A connected SQL Server client.
pub type MssqlClient = Client<Compat<TcpStream>>;

/// Opens a TDS session for the given connection settings.
///
/// The server certificate is trusted without validation, which keeps
/// self-signed internal instances reachable.
///
/// # Errors
/// Returns [`DbGrepError::Connection`] when the host is unreachable or the
/// TDS handshake fails. Error context names host, port, and database only.
pub async fn connect(config: &ConnectionConfig) -> Result<MssqlClient> {
    let mut tds_config = Config::new();
    tds_config.host(&config.host);
    tds_config.port(config.port);
    tds_config.database(&config.database);
    tds_config.authentication(AuthMethod::sql_server(&config.username, &config.password));
    tds_config.trust_cert();

    tracing::debug!("Connecting to {config}");

    let tcp = TcpStream::connect(tds_config.get_addr()).await.map_err(|e| {
        DbGrepError::connection_failed(format!("Cannot reach {}:{}", config.host, config.port), e)
    })?;

    tcp.set_nodelay(true)
        .map_err(|e| DbGrepError::connection_failed("Failed to configure TCP socket", e))?;

    let client = Client::connect(tds_config, tcp.compat_write())
        .await
        .map_err(|e| {
            DbGrepError::connection_failed(
                format!(
                    "Login to {}:{}/{} failed",
                    config.host, config.port, config.database
                ),
                e,
            )
        })?;

    tracing::debug!("Session established with {config}");
    Ok(client)
}
