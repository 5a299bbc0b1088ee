use crate::view::ViewId;

/// Rejected tree mutations. The tree is left untouched whenever one of these
/// is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("view {0:?} cannot be its own subview")]
    SelfParent(ViewId),

    #[error("adding {child:?} under {parent:?} would make it its own ancestor")]
    WouldCycle { parent: ViewId, child: ViewId },

    #[error("view {0:?} no longer exists")]
    StaleView(ViewId),

    #[error("the root view cannot be re-parented or destroyed")]
    RootView,
}

pub type Result<T> = std::result::Result<T, TreeError>;
