//! Editor window: state, messages, update and view
//!
//! All business logic lives in `state`, `render` and `upload`; this module
//! only turns messages into calls on them and schedules the async steps
//! (export, upload, status timers, dialogs) as iced tasks.

use iced::widget::{button, canvas, column, container, row, scrollable, text, text_input, Row};
use iced::{Alignment, Element, Length, Task, Theme};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::color::{Color, PALETTE};
use crate::config::{self, AppConfig};
use crate::render::png::{export_png_async, ExportOptions};
use crate::render::thumbnail::ThumbnailCache;
use crate::state::data::{created_on_label, timestamp_now};
use crate::state::editor::{EditorState, PointerButtons};
use crate::state::gallery::Gallery;
use crate::state::grid::{parse_grid_size, Grid};
use crate::state::library::{GalleryRepository, MemoryRepository};
use crate::state::save::{SavePipeline, SaveState};
use crate::state::status::{StatusLine, StatusTicket, STATUS_CLEAR_DELAY};
use crate::ui::{gallery_view, GridCanvas};
use crate::upload::{UploadClient, UploadConfig};

/// On-screen size of the grid canvas
const CANVAS_SIZE: f32 = 480.0;

/// Main application state
pub struct LegoGrid {
    config: AppConfig,
    grid: Grid,
    editor: EditorState,
    /// Raw contents of the size input
    size_input: String,
    /// Raw contents of the color input
    color_input: String,
    gallery: Gallery,
    /// Cached thumbnail per gallery url
    thumbnails: HashMap<String, PathBuf>,
    thumbnail_cache: ThumbnailCache,
    uploader: UploadClient,
    save: SavePipeline,
    /// PNG of the save currently uploading, kept for the thumbnail cache
    pending_png: Option<Vec<u8>>,
    status: StatusLine,
    /// "Created on: ..." line under the grid
    created_on: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    SizeInputChanged(String),
    ColorInputChanged(String),
    SwatchPicked(Color),
    CreateGrid,
    ClearGrid,
    ToggleEraser,
    /// Primary button pressed on a cell
    CellClicked { row: usize, col: usize },
    /// Pointer moved into a cell with some buttons held
    CellEntered {
        row: usize,
        col: usize,
        buttons: PointerButtons,
    },
    Save,
    /// Rasterizing finished
    Exported(Result<Vec<u8>, String>),
    /// Upload finished
    Uploaded(Result<String, String>),
    StatusExpired(StatusTicket),
    DeleteRequested(String),
    /// Confirmation dialog answered (url, confirmed)
    DeleteConfirmed(String, bool),
    ThumbnailReady(String, Result<PathBuf, String>),
    ExportFile,
    ExportFileDone(Result<Option<PathBuf>, String>),
}

impl LegoGrid {
    /// Create the application from the user's config and data directories
    pub fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load();
        let data_dir = config::data_dir();

        let (repo, open_error): (Box<dyn GalleryRepository>, _) =
            match config.open_repository(&data_dir) {
                Ok(repo) => (repo, None),
                Err(e) => {
                    // Keep the editor usable; saves just won't outlive the session
                    log::error!("❌ Could not open gallery storage: {}", e);
                    (Box::new(MemoryRepository::new()), Some(e))
                }
            };

        let (mut app, task) = Self::with_parts(config, repo, ThumbnailCache::default_location());

        match open_error {
            Some(e) => {
                let notice = app.show_message(format!("Gallery storage unavailable: {}", e));
                (app, Task::batch([task, notice]))
            }
            None => (app, task),
        }
    }

    /// Create the application from explicit parts
    pub fn with_parts(
        config: AppConfig,
        repo: Box<dyn GalleryRepository>,
        thumbnail_cache: ThumbnailCache,
    ) -> (Self, Task<Message>) {
        let uploader = UploadClient::new(UploadConfig::from(&config));
        let color = config.initial_color();

        let grid = Grid::new(config.default_grid_size);

        let mut app = LegoGrid {
            size_input: grid.size().to_string(),
            grid,
            editor: EditorState::new(color),
            color_input: color.to_hex(),
            gallery: Gallery::new(repo),
            thumbnails: HashMap::new(),
            thumbnail_cache,
            uploader,
            save: SavePipeline::new(),
            pending_png: None,
            status: StatusLine::new(),
            created_on: created_on_label(None),
            config,
        };

        let task = app.load_gallery();
        log::info!("🎨 LEGO Grid initialized with {} saved images", app.gallery.len());
        (app, task)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn status_text(&self) -> &str {
        self.status.text()
    }

    pub fn save_state(&self) -> SaveState {
        self.save.state()
    }

    pub fn created_on(&self) -> &str {
        &self.created_on
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            cell_px: self.config.cell_px,
            empty_cell: self.config.empty_cell(),
        }
    }

    /// Show a status message and schedule its expiry
    fn show_message(&mut self, text: impl Into<String>) -> Task<Message> {
        let ticket = self.status.show(text);
        Task::perform(
            async move { tokio::time::sleep(STATUS_CLEAR_DELAY).await },
            move |_| Message::StatusExpired(ticket),
        )
    }

    /// Rebuild the gallery from storage and fetch any missing thumbnails
    fn load_gallery(&mut self) -> Task<Message> {
        if let Err(e) = self.gallery.load_all() {
            log::warn!("⚠️  Gallery load failed: {}", e);
            return self.show_message(format!("Gallery could not be loaded: {}", e));
        }

        self.thumbnails.clear();
        let mut fetches = Vec::new();
        for entry in self.gallery.entries() {
            if let Some(path) = self.thumbnail_cache.get(&entry.url) {
                self.thumbnails.insert(entry.url.clone(), path);
                continue;
            }

            let cache = self.thumbnail_cache.clone();
            let client = self.uploader.http().clone();
            let url = entry.url.clone();
            fetches.push(Task::perform(
                {
                    let url = url.clone();
                    async move { cache.fetch(&client, &url).await.map_err(|e| e.to_string()) }
                },
                move |result| Message::ThumbnailReady(url.clone(), result),
            ));
        }

        Task::batch(fetches)
    }

    /// Replace the grid with a fresh one sized from the size input
    fn create_grid(&mut self) {
        let size = parse_grid_size(&self.size_input);
        self.grid = Grid::new(size);
        self.editor.reset_mode();
        self.size_input = size.to_string();
        log::info!("🧱 Grid created: {}x{}", size, size);
    }

    /// Single exit of the save pipeline, for both outcomes
    fn finish_save(&mut self, outcome: Result<String, String>) -> Task<Message> {
        let png = self.pending_png.take();

        let url = match self.save.finish(outcome) {
            Ok(url) => url,
            Err(e) => return self.save_failed(e),
        };

        let date = timestamp_now();
        let recorded = self.gallery.add(url.clone(), date.clone()).map(|_| ());
        if let Err(e) = recorded {
            return self.save_failed(e.to_string());
        }

        self.created_on = created_on_label(Some(&date));
        let saved = self.show_message("Saved Successfully ✔️");

        let Some(png) = png else {
            return saved;
        };
        let cache = self.thumbnail_cache.clone();
        let thumbnail = Task::perform(
            {
                let url = url.clone();
                async move { cache.store_async(url, png).await.map_err(|e| e.to_string()) }
            },
            move |result| Message::ThumbnailReady(url.clone(), result),
        );
        Task::batch([saved, thumbnail])
    }

    fn save_failed(&mut self, reason: String) -> Task<Message> {
        log::error!("❌ Save failed: {}", reason);
        self.show_message(format!("Error saving: {}", reason))
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SizeInputChanged(value) => {
                self.size_input = value;
                Task::none()
            }

            Message::ColorInputChanged(value) => {
                if let Some(color) = Color::from_hex(&value) {
                    self.editor.set_color(color);
                }
                self.color_input = value;
                Task::none()
            }

            Message::SwatchPicked(color) => {
                self.editor.set_color(color);
                self.color_input = color.to_hex();
                Task::none()
            }

            Message::CreateGrid => {
                self.create_grid();
                self.show_message("Grid Created")
            }

            Message::ClearGrid => {
                self.grid.clear();
                self.show_message("Grid Cleared")
            }

            Message::ToggleEraser => {
                let erasing = self.editor.toggle_erase();
                log::debug!("Eraser {}", if erasing { "on" } else { "off" });
                Task::none()
            }

            Message::CellClicked { row, col } => {
                self.editor.click(&mut self.grid, row, col);
                Task::none()
            }

            Message::CellEntered { row, col, buttons } => {
                self.editor.hover(&mut self.grid, row, col, buttons);
                Task::none()
            }

            Message::Save => {
                if !self.save.begin() {
                    return Task::none();
                }
                log::info!("💾 Saving {}x{} grid", self.grid.size(), self.grid.size());

                let preparing = self.show_message("Preparing image...");
                let export = Task::perform(
                    export_png_async(self.grid.clone(), self.export_options()),
                    |result| Message::Exported(result.map_err(|e| e.to_string())),
                );
                Task::batch([preparing, export])
            }

            Message::Exported(Ok(png)) => {
                if !self.save.exported() {
                    return Task::none();
                }
                let uploading = self.show_message("Uploading...");

                self.pending_png = Some(png.clone());
                let uploader = self.uploader.clone();
                let upload = Task::perform(
                    async move { uploader.upload(png).await.map_err(|e| e.to_string()) },
                    Message::Uploaded,
                );
                Task::batch([uploading, upload])
            }

            Message::Exported(Err(e)) => self.finish_save(Err(e)),

            Message::Uploaded(result) => self.finish_save(result),

            Message::StatusExpired(ticket) => {
                self.status.expire(ticket);
                Task::none()
            }

            Message::DeleteRequested(url) => Task::perform(
                confirm_delete(),
                move |confirmed| Message::DeleteConfirmed(url.clone(), confirmed),
            ),

            Message::DeleteConfirmed(_, false) => Task::none(),

            Message::DeleteConfirmed(url, true) => match self.gallery.remove(&url) {
                Ok(_) => {
                    self.thumbnails.remove(&url);
                    self.thumbnail_cache.evict(&url);
                    Task::none()
                }
                Err(e) => {
                    log::error!("❌ Delete failed: {}", e);
                    self.show_message(format!("Error deleting: {}", e))
                }
            },

            Message::ThumbnailReady(url, Ok(path)) => {
                // The entry may have been deleted while the thumbnail was in flight
                if self.gallery.entries().iter().any(|e| e.url == url) {
                    self.thumbnails.insert(url, path);
                }
                Task::none()
            }

            Message::ThumbnailReady(url, Err(e)) => {
                log::warn!("⚠️  No thumbnail for {}: {}", url, e);
                Task::none()
            }

            Message::ExportFile => Task::perform(
                export_to_file(self.grid.clone(), self.export_options()),
                Message::ExportFileDone,
            ),

            Message::ExportFileDone(Ok(Some(path))) => {
                log::info!("📤 Exported grid to {}", path.display());
                self.show_message(format!("Exported to {}", path.display()))
            }

            Message::ExportFileDone(Ok(None)) => Task::none(),

            Message::ExportFileDone(Err(e)) => {
                log::error!("❌ Export failed: {}", e);
                self.show_message(format!("Error exporting: {}", e))
            }
        }
    }

    /// Build the user interface
    pub fn view(&self) -> Element<Message> {
        let size_controls = row![
            text("Grid size").size(14),
            text_input("16", &self.size_input)
                .on_input(Message::SizeInputChanged)
                .on_submit(Message::CreateGrid)
                .width(Length::Fixed(60.0)),
            button("Create").on_press(Message::CreateGrid),
            button("Clear")
                .style(button::secondary)
                .on_press(Message::ClearGrid),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let swatches = PALETTE.iter().fold(Row::new().spacing(4), |swatches, color| {
            swatches.push(
                button(text(""))
                    .width(Length::Fixed(20.0))
                    .height(Length::Fixed(20.0))
                    .style(swatch_style(*color))
                    .on_press(Message::SwatchPicked(*color)),
            )
        });

        let eraser = button("Eraser")
            .style(if self.editor.is_erasing() {
                button::primary
            } else {
                button::secondary
            })
            .on_press(Message::ToggleEraser);

        let color_controls = row![
            text("Color").size(14),
            text_input("#000000", &self.color_input)
                .on_input(Message::ColorInputChanged)
                .width(Length::Fixed(90.0)),
            swatches,
            eraser,
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let save_label = match self.save.state() {
            SaveState::Idle => "Save",
            SaveState::Preparing => "Preparing...",
            SaveState::Uploading => "Uploading...",
        };
        let actions = row![
            button(save_label)
                .style(button::success)
                .on_press_maybe(self.save.can_start().then_some(Message::Save)),
            button("Export PNG...")
                .style(button::secondary)
                .on_press(Message::ExportFile),
        ]
        .spacing(10);

        let grid_view = canvas(GridCanvas {
            grid: &self.grid,
            empty_cell: self.config.empty_cell().into(),
        })
        .width(Length::Fixed(CANVAS_SIZE))
        .height(Length::Fixed(CANVAS_SIZE));

        let editor = column![
            text("LEGO Grid Editor").size(32),
            size_controls,
            color_controls,
            grid_view,
            actions,
            text(self.status.text()).size(16),
            text(&self.created_on).size(14),
        ]
        .spacing(16)
        .align_x(Alignment::Center);

        let gallery = column![
            text("Gallery").size(24),
            scrollable(gallery_view(self.gallery.entries(), &self.thumbnails))
                .height(Length::Fill),
        ]
        .spacing(12)
        .width(Length::Fill);

        container(row![editor, gallery].spacing(32))
            .padding(24)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn swatch_style(color: Color) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme, status| {
        let base = button::secondary(theme, status);
        button::Style {
            background: Some(iced::Color::from(color).into()),
            border: iced::Border {
                color: iced::Color::from_rgba(1.0, 1.0, 1.0, 0.4),
                width: 1.0,
                radius: 3.0.into(),
            },
            ..base
        }
    }
}

/// Ask before deleting a gallery entry
async fn confirm_delete() -> bool {
    let answer = rfd::AsyncMessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title("Delete image")
        .set_description("Are you sure you want to delete this image?")
        .set_buttons(rfd::MessageButtons::YesNo)
        .show()
        .await;
    matches!(answer, rfd::MessageDialogResult::Yes)
}

/// Pick a destination and write the grid there as PNG.
/// `Ok(None)` means the dialog was cancelled.
async fn export_to_file(grid: Grid, opts: ExportOptions) -> Result<Option<PathBuf>, String> {
    let Some(handle) = rfd::AsyncFileDialog::new()
        .set_title("Export grid as PNG")
        .set_file_name("lego-grid.png")
        .add_filter("PNG image", &["png"])
        .save_file()
        .await
    else {
        return Ok(None);
    };

    let path = handle.path().to_path_buf();
    let png = export_png_async(grid, opts).await.map_err(|e| e.to_string())?;
    tokio::fs::write(&path, png)
        .await
        .map_err(|e| e.to_string())?;
    Ok(Some(path))
}
