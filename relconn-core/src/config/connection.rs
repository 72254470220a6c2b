//! Connection descriptor supplied by callers.

use crate::dialect::Dialect;
use crate::security::Credentials;

/// Logical description of one database to connect to.
///
/// The dialect is kept as the raw tag so that unknown tags surface as
/// `UnsupportedDialect` from the operation that needs them, not at
/// construction time.
///
/// # Security
/// `Debug` and `Display` never include the password, and `Display` omits the
/// username as well.
///
/// # Example
/// ```rust
/// use relconn_core::ConnectionDescriptor;
///
/// let descriptor = ConnectionDescriptor::new("postgresql", "db.internal")
///     .with_port(5432)
///     .with_database("analytics")
///     .with_credentials("reporter", Some("secret".to_string()));
///
/// assert!(descriptor.validate().is_ok());
/// assert_eq!(descriptor.to_string(), "postgresql://db.internal:5432/analytics");
/// ```
#[derive(Clone)]
pub struct ConnectionDescriptor {
    /// Dialect tag, e.g. `redshift-serverless-iam`
    pub db_type: String,
    /// Database host address
    pub host: String,
    /// Optional port number; the driver default applies when absent
    pub port: Option<u16>,
    /// Database name (also the `DbName` sent to IAM)
    pub database: String,
    credentials: Credentials,
}

impl ConnectionDescriptor {
    /// Creates a descriptor with no port, database or credentials.
    pub fn new(db_type: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            db_type: db_type.into(),
            host: host.into(),
            port: None,
            database: String::new(),
            credentials: Credentials::new(String::new(), None),
        }
    }

    /// Builder method to set port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Builder method to set database.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Builder method to set username and password.
    ///
    /// For IAM dialects these are ignored when the URL is built.
    pub fn with_credentials(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.credentials = Credentials::new(username.into(), password);
        self
    }

    /// Parses the dialect tag.
    ///
    /// # Errors
    /// Returns `UnsupportedDialect` for tags outside the static mapping
    pub fn dialect(&self) -> crate::Result<Dialect> {
        self.db_type.parse()
    }

    /// Caller-supplied credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Validates descriptor fields that do not depend on the dialect.
    ///
    /// # Errors
    /// Returns a configuration error for an empty host or a zero port
    pub fn validate(&self) -> crate::Result<()> {
        if self.host.is_empty() {
            return Err(crate::error::ConnectorError::configuration(
                "host cannot be empty",
            ));
        }

        if self.port == Some(0) {
            return Err(crate::error::ConnectorError::configuration(
                "port must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("db_type", &self.db_type)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl std::fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}://{}{}/{}",
            self.db_type,
            self.host,
            self.port.map_or_else(String::new, |p| format!(":{}", p)),
            self.database
        )
        // Intentionally omit username and never include credentials
    }
}
