//! `add-measurements`: append measurement records to a member's data store.

// self
use crate::{
	_prelude::*,
	api::ApiRequest,
	auth::Secret,
	resource,
};

/// Scope the token request must carry for [`add_measurements`].
pub const ADD_MEASUREMENTS_SCOPE: &str = "mydex:pdx post:/api/pds/add-measurements";
/// Header carrying the member's connection key.
pub const CONNECTION_TOKEN_HEADER: &str = "Connection-Token";

/// One measurement record as accepted by the data store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
	/// Device class that produced the value (e.g. `Mobile`).
	pub source_device_type: String,
	/// Application or integration name (e.g. `Apple Health Kit`).
	pub source_name: String,
	/// Measured quantity (e.g. `Weight`).
	pub measurement_type: String,
	/// Start of the measurement window, Unix seconds.
	pub measurement_timestamp_start: i64,
	/// End of the measurement window, Unix seconds.
	pub measurement_timestamp_end: i64,
	/// Measured value.
	pub measurement_value: f64,
}

/// Member connection that scopes a data-store write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberConnection {
	/// Member identifier, sent as the `uid` query parameter.
	pub member_uid: String,
	/// Connection identifier, sent as the `con_id` query parameter.
	pub connection_id: String,
	/// Member key, sent in the `Connection-Token` header.
	pub member_key: Secret,
}
impl MemberConnection {
	/// Creates a connection descriptor.
	pub fn new(
		member_uid: impl Into<String>,
		connection_id: impl Into<String>,
		member_key: impl Into<Secret>,
	) -> Self {
		Self {
			member_uid: member_uid.into(),
			connection_id: connection_id.into(),
			member_key: member_key.into(),
		}
	}
}

/// Builds `POST {api_base}/api/pds/add-measurements?uid=..&con_id=..` with a JSON array body.
pub fn add_measurements(
	api_base: &Url,
	connection: &MemberConnection,
	measurements: &[Measurement],
) -> Result<ApiRequest> {
	let url = resource::endpoint(api_base, &["api", "pds", "add-measurements"])?;
	let request = ApiRequest::post(url)
		.query("uid", connection.member_uid.as_str())
		.query("con_id", connection.connection_id.as_str())
		.header(CONNECTION_TOKEN_HEADER, connection.member_key.expose())
		.json(measurements)?;

	Ok(request)
}
