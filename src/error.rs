use sqlx::error::ErrorKind;
use thiserror::Error;

/// Failures raised by the storage layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Site matching id {0} does not exist.")]
    SiteDoesNotExist(i64),

    #[error("get() returned more than one {table} -- it returned {count}!")]
    MultipleObjectsReturned { table: &'static str, count: i64 },

    #[error("Unknown request status in storage: {0}")]
    InvalidStatus(String),
}

impl StoreError {
    /// Stable type name of the failure, reported alongside its message.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Sqlx(e) => sqlx_kind(e),
            StoreError::SiteDoesNotExist(_) => "DoesNotExist",
            StoreError::MultipleObjectsReturned { .. } => "MultipleObjectsReturned",
            StoreError::InvalidStatus(_) => "DecodeError",
        }
    }
}

fn sqlx_kind(err: &sqlx::Error) -> &'static str {
    match err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => "IntegrityError",
            _ => "DatabaseError",
        },
        sqlx::Error::RowNotFound => "DoesNotExist",
        sqlx::Error::PoolTimedOut => "PoolTimedOut",
        sqlx::Error::PoolClosed => "PoolClosed",
        sqlx::Error::Io(_) => "IoError",
        sqlx::Error::Protocol(_) => "ProtocolError",
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => "DecodeError",
        _ => "OperationalError",
    }
}

/// The single user-facing failure of the provisioning command.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Unable to look up user {username}. Exception is {kind}: {message}")]
    UserLookup {
        username: String,
        kind: &'static str,
        message: String,
    },

    #[error("Unable to create ApiAccessConfig. Exception is {kind}: {message}")]
    ConfigCreation { kind: &'static str, message: String },

    #[error("Unable to create ApiAccessRequest for {username}. Exception is {kind}: {message}")]
    RequestCreation {
        username: String,
        kind: &'static str,
        message: String,
    },
}

impl CommandError {
    pub fn config_creation(err: StoreError) -> Self {
        CommandError::ConfigCreation {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub fn request_creation(username: &str, err: StoreError) -> Self {
        CommandError::RequestCreation {
            username: username.to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub fn user_lookup(username: &str, err: StoreError) -> Self {
        CommandError::UserLookup {
            username: username.to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
