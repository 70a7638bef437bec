pub mod arena;
pub mod recency_list;

pub use arena::{EntryArena, Handle};
pub use recency_list::RecencyList;
