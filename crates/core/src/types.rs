/// All database primary keys except page blocks are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Page blocks are keyed by UUID so clients can mint ids before saving.
pub type BlockId = uuid::Uuid;
