use crate::common::error::RoomserviceError;

/// Result alias used across roomservice.
///
/// # Examples
///
/// ```
/// use roomservice::common::result::RoomserviceResult;
/// use roomservice::common::error::RoomserviceError;
///
/// fn example_function() -> RoomserviceResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> RoomserviceResult<()> {
///     Err(RoomserviceError::validation_error("device", "missing", None))
/// }
/// ```
pub type RoomserviceResult<T> = Result<T, RoomserviceError>;
