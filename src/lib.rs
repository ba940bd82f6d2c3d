//! OAuth 2.0 client-credentials access to personal-data-store (PDX) APIs: fetch one token,
//! spend it on one authenticated call, render the answer.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod resource;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// std
	use std::{collections::VecDeque, sync::Mutex};
	// self
	use crate::http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture};

	/// Raised by [`RecordingTransport`] once every canned response has been served.
	#[derive(Debug, ThisError)]
	#[error("Recording transport has no canned response left.")]
	pub struct TransportExhausted;

	/// In-process transport that replays canned responses and records every request it sees.
	#[derive(Clone, Default)]
	pub struct RecordingTransport {
		responses: Arc<Mutex<VecDeque<HttpResponse>>>,
		requests: Arc<Mutex<Vec<HttpRequest>>>,
	}
	impl RecordingTransport {
		/// Builds a transport that answers with `responses`, in order.
		pub fn replying(responses: impl IntoIterator<Item = HttpResponse>) -> Self {
			Self {
				responses: Arc::new(Mutex::new(responses.into_iter().collect())),
				requests: Default::default(),
			}
		}

		/// Returns a snapshot of the requests dispatched so far.
		pub fn requests(&self) -> Vec<HttpRequest> {
			self.requests.lock().expect("Recorded request list should not be poisoned.").clone()
		}
	}
	impl HttpTransport for RecordingTransport {
		type TransportError = TransportExhausted;

		fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
			Box::pin(async move {
				self.requests
					.lock()
					.expect("Recorded request list should not be poisoned.")
					.push(request);

				self.responses
					.lock()
					.expect("Canned response queue should not be poisoned.")
					.pop_front()
					.ok_or(TransportExhausted)
			})
		}
	}

	/// Builds a canned response with a JSON content type.
	pub fn json_response(status: u16, body: &str) -> HttpResponse {
		HttpResponse {
			status,
			headers: BTreeMap::from([("content-type".into(), "application/json".into())]),
			body: body.as_bytes().to_vec(),
		}
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(feature = "cli")] use {clap as _, color_eyre as _, tracing_subscriber as _};
#[cfg(test)] use httpmock as _;
#[cfg(any(test, feature = "cli"))] use tokio as _;
