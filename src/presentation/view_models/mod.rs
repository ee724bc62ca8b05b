//! View models bridging use cases and the terminal UI.

mod photo_list;

pub use photo_list::{
    PageRequest, PaginationCursor, PhotoListModel, PhotoListState, PhotoListViewModel,
};
