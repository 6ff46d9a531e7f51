/// Use cases module containing application business logic orchestration
mod assets_loader;
mod build_dependency_tree;
mod query_assets_file;

pub use build_dependency_tree::BuildDependencyTreeUseCase;
pub use query_assets_file::QueryAssetsFileUseCase;
