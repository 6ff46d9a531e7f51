//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of snapshot data for the formatters.

pub mod assets_views;
pub mod tree_view;
pub mod tree_view_builder;

pub use assets_views::{
    DiagnosticView, DiagnosticsView, LibraryListView, LibraryRelation, LibraryView,
    PackagePathView, TargetListView, TargetSummaryView,
};
pub use tree_view::{DependencyGroupView, DependencyNodeView, DependencyTreeView, TargetTreeView};
pub use tree_view_builder::{DependencyTreeViewBuilder, MAX_TREE_DEPTH};
