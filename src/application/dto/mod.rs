/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod output_format;
mod query_request;
mod query_response;
mod tree_request;
mod tree_response;

pub use output_format::OutputFormat;
pub use query_request::{AssetsQuery, AssetsQueryRequest};
pub use query_response::AssetsQueryResponse;
pub use tree_request::DependencyTreeRequest;
pub use tree_response::DependencyTreeResponse;
