//! Outbound ポート: ユースケースがストアに触れるための trait

pub mod index_store;
pub mod item_store;

pub use index_store::IndexStore;
pub use item_store::{ItemStore, MarkWornOutcome, PathUpdate, WornItem};
