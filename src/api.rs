//! Authenticated calls against PDX resource endpoints.

pub mod invoker;
pub mod query;
pub mod request;
pub mod response;

pub use invoker::*;
pub use query::*;
pub use request::*;
pub use response::*;
