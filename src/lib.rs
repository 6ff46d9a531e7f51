//! cps-dependencies - dependency snapshots for .NET project systems
//!
//! This library turns the output of a NuGet restore (`obj/project.assets.json`)
//! into per-target dependency snapshots, runs every change through an ordered
//! chain of filters, and renders the resulting tree. It follows hexagonal
//! architecture: the domain never touches the filesystem or the terminal.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependencies`): Dependency models, immutable
//!   snapshots, and the filter chain
//! - **Assets file** (`assets_file`): Read model over `project.assets.json`
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use cps_dependencies::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let assets_reader = FileSystemReader::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = BuildDependencyTreeUseCase::new(assets_reader, progress_reporter);
//!
//! // Execute
//! let request = DependencyTreeRequest::new(PathBuf::from("obj/project.assets.json"))
//!     .with_follow_project_references(true);
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let formatter = TextFormatter::new();
//! println!("{}", formatter.format_tree(&response.view)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod assets_file;
pub mod dependencies;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        resolve_assets_path, AtomicFileWriter, FileSystemReader, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::snapshots::{
        DependenciesSnapshotProvider, InMemoryAggregateSnapshotProvider,
    };
    pub use crate::application::dto::{
        AssetsQuery, AssetsQueryRequest, AssetsQueryResponse, DependencyTreeRequest,
        DependencyTreeResponse, OutputFormat,
    };
    pub use crate::application::use_cases::{BuildDependencyTreeUseCase, QueryAssetsFileUseCase};
    pub use crate::assets_file::AssetsFileDependenciesSnapshot;
    pub use crate::dependencies::domain::{
        DependenciesChanges, DependenciesChangesBuilder, DependenciesSnapshot, Dependency,
        DependencyModel, SnapshotUpdate, TargetFramework, TargetedDependenciesSnapshot,
    };
    pub use crate::dependencies::filters::{
        AddDecision, DependenciesSnapshotFilter, FilterChain, RemoveDecision,
    };
    pub use crate::ports::outbound::{
        AggregateSnapshotProvider, AssetsFileReader, OutputPresenter, ProgressReporter,
        TreeFormatter,
    };
    pub use crate::shared::Result;
}
