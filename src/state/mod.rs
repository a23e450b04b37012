/// State management module
///
/// This module handles the persistent side of the application:
/// - The SQLite catalog and its queries (library.rs)
/// - The row structures shared with the UI layer (data.rs)

pub mod data;
pub mod library;
