// ABOUTME: Paginated display of tags
// ABOUTME: Page rendering, lazy page sources, and the interactive navigation session

pub mod navigation;
pub mod page;
pub mod session;
pub mod source;

pub use navigation::{NavigationAction, NavigationEvent, NavigationPolicy, NavigationState};
pub use page::{is_image_reference, render_tag_entry, split_trailing_image, Page, PageField};
pub use session::{
    DisplayError, EndReason, InputOutcome, MessageRef, NavigationInput, NavigationSession,
    PageDisplay, SessionSummary,
};
pub use source::{
    paginate_list, paginate_single, PageSource, Pages, Paginator, TagListPageSource, TagPageSource,
};
