//! Pure mapping from desk state to what gets drawn.

mod projector;
mod render_model;

pub use projector::{
    FAVORITES_TITLE, ProjectionInput, entry_opacity, project, project_catalog, project_entry,
    project_signal,
};
pub use render_model::{
    CatalogPanel, LiveEntryView, PairItem, RenderModel, ReportView, ScannerButton, SectionView,
    SignalPanel,
};
