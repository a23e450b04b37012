use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable, text, text_input, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use image::RgbaImage;
use rfd::FileDialog;

mod controller;
mod error;
mod logging;
mod qr;
mod state;

use controller::Controller;
use state::data::CatalogEntry;
use state::library::Library;

/// Main application state
struct QrStudio {
    /// Orchestrates the catalog store and the code generator
    controller: Controller,
    /// Bound form inputs
    url: String,
    output_dir: String,
    file_name: String,
    /// Current catalog snapshot, replaced wholesale on every refresh
    entries: Vec<CatalogEntry>,
    /// Currently selected entry in the list view
    selected: Option<i64>,
    /// Texture shown in the preview pane
    preview: Option<Handle>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    UrlChanged(String),
    OutputDirChanged(String),
    FileNameChanged(String),
    /// User clicked the "Browse" button next to the output directory
    BrowseOutputDir,
    /// User clicked the "Generate QR Code" button
    Generate,
    /// User clicked a row in the catalog list
    EntrySelected(i64),
    OpenSelected,
    DeleteSelected,
}

impl QrStudio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // If this fails, we panic because the app cannot function without its catalog
        let library = Library::open(Library::default_path())
            .expect("Failed to initialize catalog database. Check permissions and disk space.");

        let code_count = library.entry_count().unwrap_or(0);
        let controller = Controller::new(library);
        let entries = controller.refresh().unwrap_or_default();

        let status = format!("Ready. {code_count} QR codes in catalog.");

        (
            QrStudio {
                controller,
                url: String::new(),
                output_dir: String::new(),
                file_name: String::new(),
                entries,
                selected: None,
                preview: None,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UrlChanged(url) => self.url = url,
            Message::OutputDirChanged(dir) => self.output_dir = dir,
            Message::FileNameChanged(name) => self.file_name = name,

            Message::BrowseOutputDir => {
                // Show the native folder picker dialog
                let folder = FileDialog::new()
                    .set_title("Select Output Directory")
                    .pick_folder();

                if let Some(dir) = folder {
                    self.output_dir = dir.display().to_string();
                }
            }

            Message::Generate => {
                match self
                    .controller
                    .generate_and_register(&self.url, &self.output_dir, &self.file_name)
                {
                    Ok(generated) => {
                        self.status = format!(
                            "✅ QR code generated and saved to {}",
                            generated.saved_path.display()
                        );
                        self.preview = Some(preview_handle(generated.preview));
                        self.reload_entries();
                    }
                    Err(e) => self.status = format!("⚠️ {e}"),
                }
            }

            Message::EntrySelected(id) => {
                self.selected = Some(id);
                let entry = self.entries.iter().find(|e| e.id == id);
                match self.controller.preview_entry(entry) {
                    Ok(preview) => self.preview = Some(preview_handle(preview)),
                    // The previous preview stays up when the file is unreadable
                    Err(e) => self.status = format!("⚠️ {e}"),
                }
            }

            Message::OpenSelected => {
                let entry = self
                    .selected
                    .and_then(|id| self.entries.iter().find(|e| e.id == id));
                if let Err(e) = self.controller.open_entry(entry) {
                    self.status = format!("⚠️ {e}");
                }
            }

            Message::DeleteSelected => match self.controller.delete_entry(self.selected) {
                Ok(()) => {
                    self.selected = None;
                    self.reload_entries();
                }
                Err(e) => self.status = format!("⚠️ {e}"),
            },
        }

        Task::none()
    }

    /// Replace the displayed snapshot with the current store contents
    fn reload_entries(&mut self) {
        match self.controller.refresh() {
            Ok(entries) => self.entries = entries,
            Err(e) => self.status = format!("⚠️ {e}"),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let url_row = row![
            text("URL").size(14).width(Length::Fixed(120.0)),
            text_input("https://example.com", &self.url)
                .on_input(Message::UrlChanged)
                .padding(8),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let directory_row = row![
            text("Output Directory").size(14).width(Length::Fixed(120.0)),
            text_input("/path/to/folder", &self.output_dir)
                .on_input(Message::OutputDirChanged)
                .padding(8),
            button("Browse…").on_press(Message::BrowseOutputDir).padding(8),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let name_row = row![
            text("File Name").size(14).width(Length::Fixed(120.0)),
            text_input("mycode", &self.file_name)
                .on_input(Message::FileNameChanged)
                .padding(8),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let form = column![
            text("Generate a QR code from a URL").size(18),
            url_row,
            directory_row,
            name_row,
            button("Generate QR Code")
                .on_press(Message::Generate)
                .style(button::primary)
                .padding(10),
        ]
        .spacing(12)
        .width(Length::Fill);

        let preview: Element<Message> = match &self.preview {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fixed(200.0))
                .height(Length::Fixed(200.0))
                .into(),
            None => text("No preview yet").size(14).into(),
        };
        let preview_pane = container(preview)
            .width(Length::Fixed(220.0))
            .height(Length::Fixed(220.0))
            .center_x(Length::Fixed(220.0))
            .center_y(Length::Fixed(220.0));

        let actions = row![
            button("Open File")
                .on_press(Message::OpenSelected)
                .style(button::secondary)
                .padding(8),
            button("Delete File")
                .on_press(Message::DeleteSelected)
                .style(button::danger)
                .padding(8),
        ]
        .spacing(10);

        let content = column![
            text("QR Code Generator").size(32),
            row![form, preview_pane].spacing(30),
            text("Generated QR Codes").size(18),
            self.entry_table(),
            actions,
            text(&self.status).size(14),
        ]
        .spacing(16)
        .padding(24);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// The catalog list: one highlighted, clickable row per entry
    fn entry_table(&self) -> Element<Message> {
        let header = row![
            text("ID").size(14).width(Length::Fixed(60.0)),
            text("Filename").size(14).width(Length::FillPortion(2)),
            text("Filepath").size(14).width(Length::FillPortion(5)),
        ]
        .spacing(10)
        .padding(6);

        let mut table = Column::new().spacing(2).push(header);

        for entry in &self.entries {
            let is_selected = self.selected == Some(entry.id);
            let style: fn(&Theme, button::Status) -> button::Style = if is_selected {
                button::primary
            } else {
                button::text
            };

            let cells = row![
                text(entry.id.to_string()).size(14).width(Length::Fixed(60.0)),
                text(&entry.filename).size(14).width(Length::FillPortion(2)),
                text(&entry.filepath).size(14).width(Length::FillPortion(5)),
            ]
            .spacing(10);

            table = table.push(
                button(cells)
                    .style(style)
                    .on_press(Message::EntrySelected(entry.id))
                    .width(Length::Fill)
                    .padding(6),
            );
        }

        scrollable(table).height(Length::Fixed(240.0)).into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Convert a preview buffer into a texture handle for the image widget
fn preview_handle(preview: RgbaImage) -> Handle {
    let (width, height) = preview.dimensions();
    Handle::from_rgba(width, height, preview.into_raw())
}

fn main() -> iced::Result {
    logging::init();

    iced::application("QR Studio", QrStudio::update, QrStudio::view)
        .theme(QrStudio::theme)
        .centered()
        .run_with(QrStudio::new)
}
