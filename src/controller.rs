/// File catalog controller
///
/// Sits between the UI shell and the storage/generation layers so every
/// operation stays testable without a windowing toolkit. Session state
/// (the current selection) lives in the shell and is passed into each
/// intent handler explicitly. Each intent runs synchronously to
/// completion before the next one is accepted.
use image::RgbaImage;
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::qr::{self, GeneratedCode};
use crate::state::data::CatalogEntry;
use crate::state::library::Library;

pub struct Controller {
    library: Library,
}

impl Controller {
    pub fn new(library: Library) -> Self {
        Controller { library }
    }

    /// Validate the form fields, generate and save the image, then
    /// register it in the catalog.
    ///
    /// The file is written before the row is inserted; a failure between
    /// the two leaves an orphan file on disk with no catalog entry.
    pub fn generate_and_register(
        &self,
        url: &str,
        output_dir: &str,
        file_name: &str,
    ) -> Result<GeneratedCode> {
        if url.is_empty() || output_dir.is_empty() || file_name.is_empty() {
            return Err(Error::MissingInput);
        }

        let generated = qr::generate(url, Path::new(output_dir), file_name)?;

        let filename = format!("{file_name}.png");
        let filepath = generated.saved_path.to_string_lossy();
        self.library.insert(&filename, &filepath)?;

        info!(path = %generated.saved_path.display(), "QR code generated and registered");
        Ok(generated)
    }

    /// Full catalog snapshot in insertion order. The shell replaces its
    /// displayed list wholesale with the result.
    pub fn refresh(&self) -> Result<Vec<CatalogEntry>> {
        self.library.all_entries()
    }

    /// Open the selected entry's file with the platform default handler.
    ///
    /// Platform openers tend to report success before the handler actually
    /// runs, so a vanished file is detected here and reported as a notice.
    pub fn open_entry(&self, selection: Option<&CatalogEntry>) -> Result<()> {
        let entry = selection.ok_or(Error::NoSelection)?;

        let path = Path::new(&entry.filepath);
        if !path.exists() {
            return Err(Error::Open(format!("{} does not exist", entry.filepath)));
        }

        open::that(path).map_err(|e| Error::Open(e.to_string()))
    }

    /// Remove the selected entry from the catalog. The image file itself
    /// stays on disk.
    pub fn delete_entry(&self, selection: Option<i64>) -> Result<()> {
        let id = selection.ok_or(Error::NoSelection)?;
        self.library.delete(id)
    }

    /// Load the selected entry's image, resized for the preview pane
    pub fn preview_entry(&self, selection: Option<&CatalogEntry>) -> Result<RgbaImage> {
        let entry = selection.ok_or(Error::NoSelection)?;
        qr::load_preview(Path::new(&entry.filepath))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_controller() -> (tempfile::TempDir, Controller) {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::open(dir.path().join("catalog.db")).unwrap();
        (dir, Controller::new(library))
    }

    fn out_dir(dir: &tempfile::TempDir) -> String {
        dir.path().join("out").to_string_lossy().to_string()
    }

    fn make_out_dir(dir: &tempfile::TempDir) -> String {
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        out.to_string_lossy().to_string()
    }

    #[test]
    fn generate_writes_file_and_registers_entry() {
        let (dir, controller) = temp_controller();
        let out = make_out_dir(&dir);

        let generated = controller
            .generate_and_register("https://example.com", &out, "test1")
            .unwrap();

        // Exactly one new 1080x1080 file at directory/name.png
        let expected = Path::new(&out).join("test1.png");
        assert_eq!(generated.saved_path, expected);
        assert_eq!(
            image::image_dimensions(&expected).unwrap(),
            (1080, 1080)
        );

        // Exactly one matching catalog entry
        let entries = controller.refresh().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "test1.png");
        assert_eq!(entries[0].filepath, expected.to_string_lossy());
    }

    #[test]
    fn empty_input_has_zero_side_effects() {
        let (dir, controller) = temp_controller();
        let out = make_out_dir(&dir);

        for (url, directory, name) in [
            ("", out.as_str(), "test1"),
            ("https://example.com", "", "test1"),
            ("https://example.com", out.as_str(), ""),
        ] {
            let result = controller.generate_and_register(url, directory, name);
            assert!(matches!(result, Err(Error::MissingInput)));
        }

        assert!(!Path::new(&out).join("test1.png").exists());
        assert!(controller.refresh().unwrap().is_empty());
    }

    #[test]
    fn failed_generation_registers_nothing() {
        let (dir, controller) = temp_controller();
        // Output directory deliberately absent
        let out = out_dir(&dir);

        let result = controller.generate_and_register("https://example.com", &out, "test1");

        assert!(result.is_err());
        assert!(controller.refresh().unwrap().is_empty());
    }

    #[test]
    fn refresh_is_idempotent() {
        let (dir, controller) = temp_controller();
        let out = make_out_dir(&dir);
        controller
            .generate_and_register("https://example.com", &out, "one")
            .unwrap();
        controller
            .generate_and_register("https://example.org", &out, "two")
            .unwrap();

        let first = controller.refresh().unwrap();
        let second = controller.refresh().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn delete_removes_entry_but_keeps_file() {
        let (dir, controller) = temp_controller();
        let out = make_out_dir(&dir);
        let generated = controller
            .generate_and_register("https://example.com", &out, "keepme")
            .unwrap();
        let entries = controller.refresh().unwrap();

        controller.delete_entry(Some(entries[0].id)).unwrap();

        assert!(controller.refresh().unwrap().is_empty());
        assert!(generated.saved_path.exists());
    }

    #[test]
    fn delete_requires_selection() {
        let (_dir, controller) = temp_controller();

        let result = controller.delete_entry(None);

        assert!(matches!(result, Err(Error::NoSelection)));
    }

    #[test]
    fn open_requires_selection() {
        let (_dir, controller) = temp_controller();

        let result = controller.open_entry(None);

        assert!(matches!(result, Err(Error::NoSelection)));
    }

    #[test]
    fn open_of_missing_file_is_reported() {
        let (_dir, controller) = temp_controller();
        let entry = CatalogEntry {
            id: 1,
            filename: "gone.png".to_string(),
            filepath: "/nonexistent/gone.png".to_string(),
        };

        let result = controller.open_entry(Some(&entry));

        assert!(matches!(result, Err(Error::Open(_))));
    }

    #[test]
    fn preview_requires_selection() {
        let (_dir, controller) = temp_controller();

        let result = controller.preview_entry(None);

        assert!(matches!(result, Err(Error::NoSelection)));
    }

    #[test]
    fn preview_of_missing_file_is_reported() {
        let (_dir, controller) = temp_controller();
        let entry = CatalogEntry {
            id: 1,
            filename: "gone.png".to_string(),
            filepath: "/nonexistent/gone.png".to_string(),
        };

        let result = controller.preview_entry(Some(&entry));

        assert!(result.is_err());
    }

    #[test]
    fn preview_of_generated_entry_is_display_sized() {
        let (dir, controller) = temp_controller();
        let out = make_out_dir(&dir);
        controller
            .generate_and_register("https://example.com", &out, "test1")
            .unwrap();
        let entries = controller.refresh().unwrap();

        let preview = controller.preview_entry(Some(&entries[0])).unwrap();

        assert_eq!(preview.dimensions(), (200, 200));
    }
}
