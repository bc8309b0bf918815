use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};
use crate::widgets::OutputText;

/// Largest file accepted for encoding. Data URIs blow up by 4/3, so anything
/// beyond this stops being useful to paste anywhere.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImageReadError {
    #[error("image is {0} bytes, larger than the {MAX_IMAGE_BYTES} byte limit")]
    TooLarge(usize),
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Everything the panel shows about the adopted image.
#[derive(Debug, Clone)]
pub struct ImageReport {
    pub name: String,
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
    pub byte_len: usize,
    pub data_uri: String,
    pub html_snippet: String,
}

pub(crate) fn analyze(
    name: &str,
    bytes: &[u8],
) -> Result<(ImageReport, image::DynamicImage), ImageReadError> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageReadError::TooLarge(bytes.len()));
    }
    let format = image::guess_format(bytes)?;
    let img = image::load_from_memory_with_format(bytes, format)?;
    let mime = format.to_mime_type();
    let data_uri = format!("data:{mime};base64,{}", STANDARD.encode(bytes));
    let html_snippet = format!(
        "<img src=\"{data_uri}\" width=\"{}\" height=\"{}\" alt=\"{}\">",
        img.width(),
        img.height(),
        html_escape::encode_double_quoted_attribute(name),
    );
    let report = ImageReport {
        name: name.to_owned(),
        mime,
        width: img.width(),
        height: img.height(),
        byte_len: bytes.len(),
        data_uri,
        html_snippet,
    };
    Ok((report, img))
}

/// MIME sniff first, file extension as the fallback for drops that carry none.
pub(crate) fn is_image(mime: &str, name: &str) -> bool {
    if !mime.is_empty() {
        return mime.starts_with("image/");
    }
    let ext = name.rsplit('.').next().map(str::to_lowercase);
    name.contains('.')
        && matches!(
            ext.as_deref(),
            Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
        )
}

pub(crate) fn human_size(len: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;
    if len >= MIB {
        format!("{:.1} MiB", len as f64 / MIB as f64)
    } else if len >= KIB {
        format!("{:.1} KiB", len as f64 / KIB as f64)
    } else {
        format!("{len} B")
    }
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "dropped image".to_owned()
    }
}

fn file_bytes(file: &egui::DroppedFile) -> Option<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Some(bytes.to_vec());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(path) = &file.path {
            return match std::fs::read(path) {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    log::error!("failed to read {}: {err}", path.display());
                    None
                }
            };
        }
    }
    None
}

fn texture_for(ctx: &egui::Context, name: &str, img: &image::DynamicImage) -> egui::TextureHandle {
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    ctx.load_texture(name, color, egui::TextureOptions::LINEAR)
}

/// Dimmed whole-window overlay while a file hovers, so the drop target is
/// obvious wherever the cursor is.
fn drop_overlay(ctx: &egui::Context) {
    use egui::{Align2, Color32, Id, LayerId, Order};

    if ctx.input(|i| i.raw.hovered_files.is_empty()) {
        return;
    }
    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("image_drop_target")));
    let rect = ctx.screen_rect();
    painter.rect_filled(rect, 0.0, Color32::from_black_alpha(192));
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "Drop image to convert",
        egui::TextStyle::Heading.resolve(&ctx.style()),
        Color32::WHITE,
    );
}

#[derive(Clone, Default)]
pub struct ImageDataUriState {
    pub report: Option<ImageReport>,
    pub texture: Option<egui::TextureHandle>,
    pub error: Option<String>,
}

impl ImageDataUriState {
    pub fn adopt(&mut self, ctx: &egui::Context, name: &str, bytes: &[u8]) {
        match analyze(name, bytes) {
            Ok((report, img)) => {
                self.texture = Some(texture_for(ctx, name, &img));
                self.report = Some(report);
                self.error = None;
            }
            Err(err) => {
                log::warn!("rejected dropped image {name}: {err}");
                self.report = None;
                self.texture = None;
                self.error = Some(err.to_string());
            }
        }
    }
}

#[derive(Default)]
pub struct ImageDataUriTool;

impl Tool for ImageDataUriTool {
    fn id(&self) -> ToolId {
        ToolId::ImageDataUri
    }

    fn name(&self) -> &'static str {
        "Image Data URI"
    }

    fn description(&self) -> &'static str {
        "Turn a dropped image into a base64 data URI with a live preview"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Media
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["base64", "data uri", "png", "drop", "embed"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<ImageDataUriState>();
        let mut changed = false;

        let dropped = ui
            .ctx()
            .input_mut(|i| std::mem::take(&mut i.raw.dropped_files));
        for file in &dropped {
            let name = display_name(file);
            if !is_image(&file.mime, &name) {
                log::warn!("dropped file is not a supported image: {name}");
                ctx.error(format!("{name} is not a supported image"));
                continue;
            }
            match file_bytes(file) {
                Some(bytes) => {
                    state.adopt(ui.ctx(), &name, &bytes);
                    changed = true;
                }
                None => ctx.error(format!("could not read {name}")),
            }
        }
        drop_overlay(ui.ctx());

        if state.report.is_none() && state.error.is_none() {
            egui::Frame::none()
                .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
                .rounding(6.0)
                .inner_margin(egui::Margin::symmetric(16.0, 24.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new("🖼").size(28.0));
                        ui.label("Drop an image anywhere in this window");
                        ui.weak(format!(
                            "PNG, JPEG, GIF, WebP or BMP up to {}",
                            human_size(MAX_IMAGE_BYTES)
                        ));
                    });
                });
        }

        if let Some(err) = &state.error {
            ui.colored_label(ui.visuals().error_fg_color, err);
        }

        let mut clear_clicked = false;
        if let Some(report) = &state.report {
            let name = report.name.clone();
            let meta = format!(
                "{} · {}×{} px · {}",
                report.mime,
                report.width,
                report.height,
                human_size(report.byte_len)
            );
            ui.horizontal(|ui| {
                ui.strong(name);
                ui.weak(meta);
                clear_clicked = ui.button("Clear").clicked();
            });
        }
        if clear_clicked {
            state = ImageDataUriState::default();
            changed = true;
        }

        // The report may have been cleared just above.
        if let Some(report) = &state.report {
            if let Some(texture) = &state.texture {
                ui.add_space(4.0);
                ui.add(egui::Image::new(texture).max_size(egui::vec2(420.0, 260.0)));
            }

            ui.add_space(4.0);
            if OutputText::new(&report.data_uri)
                .label("Data URI")
                .rows(4)
                .show(ui)
                .copied
            {
                ctx.success("Copied to clipboard");
            }

            ui.add_space(4.0);
            if OutputText::new(&report.html_snippet)
                .label("HTML tag")
                .rows(3)
                .show(ui)
                .copied
            {
                ctx.success("Copied to clipboard");
            }
        }

        if changed {
            setter.set(state);
        }
    }
}
