use crate::application::read_models::{
    DiagnosticsView, LibraryListView, PackagePathView, TargetListView,
};
use crate::ports::outbound::TreeFormatter;
use crate::shared::Result;

/// Response DTO from the assets file query use case
#[derive(Debug, Clone)]
pub enum AssetsQueryResponse {
    Targets(TargetListView),
    Libraries(LibraryListView),
    Diagnostics(DiagnosticsView),
    PackagePath(PackagePathView),
}

impl AssetsQueryResponse {
    /// Renders the contained view with the matching formatter method.
    pub fn render(&self, formatter: &dyn TreeFormatter) -> Result<String> {
        match self {
            AssetsQueryResponse::Targets(view) => formatter.format_targets(view),
            AssetsQueryResponse::Libraries(view) => formatter.format_libraries(view),
            AssetsQueryResponse::Diagnostics(view) => formatter.format_diagnostics(view),
            AssetsQueryResponse::PackagePath(view) => formatter.format_package_path(view),
        }
    }

    /// Whether the query found what it was asked for. A package path that
    /// could not be resolved is a miss.
    pub fn is_found(&self) -> bool {
        match self {
            AssetsQueryResponse::PackagePath(view) => view.path.is_some(),
            _ => true,
        }
    }
}
