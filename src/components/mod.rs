pub mod character_grid;
pub mod detail_overlay;
pub mod list_view;
pub mod page_header;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use character_grid::{CharacterGrid, CharacterGridProps};
pub use detail_overlay::{DetailOverlay, DetailOverlayProps, detail_rows};
pub use list_view::{ERROR_ICON, ListView, ListViewProps};
pub use page_header::{PageHeader, PageHeaderProps};
