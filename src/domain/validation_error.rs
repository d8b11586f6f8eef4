/// Caller-fixable input problems. The message is returned verbatim to the client.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("user_id must be UUID")]
    InvalidUserId,
    // Same check on the list/summary query string, reported the way those endpoints always have
    #[error("user_id must be uuid")]
    InvalidUserIdFilter,
    #[error("service_name is required")]
    InvalidServiceName,
    #[error("price must be >= 0")]
    InvalidPrice,
    #[error("start must be MM-YYYY")]
    InvalidStart,
    #[error(transparent)]
    InvalidEnd(#[from] InvalidEndReason),
    #[error("from must be MM-YYYY")]
    InvalidFrom,
    #[error("to must be MM-YYYY")]
    InvalidTo,
    #[error("limit must be 1..1000")]
    InvalidLimit,
    #[error("offset must be >= 0")]
    InvalidOffset,
    #[error("id must be uuid")]
    InvalidId,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidEndReason {
    #[error("end must be MM-YYYY")]
    Malformed,
    #[error("end must be >= start")]
    BeforeStart,
}
