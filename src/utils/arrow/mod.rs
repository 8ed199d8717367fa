//! Arrow helpers shared by the loader, recoding and statistics modules.

pub mod array_utils;

pub use array_utils::{downcast_array, get_column, get_column_index, replace_column};
