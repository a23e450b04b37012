/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the database layer and the UI layer.

/// A single generated QR code registered in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Unique database ID
    pub id: i64,
    /// Base name of the saved image (e.g. "mycode.png")
    pub filename: String,
    /// Full path the image was saved to
    pub filepath: String,
}
