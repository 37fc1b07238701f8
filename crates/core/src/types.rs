/// Sleep logs and goals are keyed by random v4 UUIDs.
pub type EntityId = uuid::Uuid;

/// Users are identified by the opaque id their token resolves to.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
