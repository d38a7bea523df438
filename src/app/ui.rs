use eframe::egui::{self, Align, Align2, Color32, FontId, RichText, Stroke};

use super::{FramePreview, GifConverter};

const ACCENT: Color32 = Color32::from_rgb(99, 102, 241);
const ERROR_RED: Color32 = Color32::from_rgb(220, 50, 50);
const OK_GREEN: Color32 = Color32::from_rgb(0, 180, 0);
const THUMB_SIZE: egui::Vec2 = egui::Vec2 { x: 150.0, y: 140.0 };

impl GifConverter {
    pub fn render(&mut self, ctx: &egui::Context) {
        self.render_drag_overlay(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 40.0;
            let footer_margin = 15.0;
            let content_height = total_height - footer_height - footer_margin;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Conversor de GIF para PNG");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Extraia todos os frames do seu GIF como imagens PNG")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    self.render_drop_zone(ui);

                    if self.state.shows_file_info() {
                        ui.add_space(20.0);
                        self.render_file_info(ui);
                    }

                    if self.state.shows_progress() {
                        ui.add_space(20.0);
                        self.render_progress(ui);
                    }

                    if self.state.shows_results() {
                        ui.add_space(20.0);
                        self.render_results(ui);
                    }

                    if self.state.shows_error() {
                        ui.add_space(20.0);
                        self.render_error(ui);
                    }

                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(footer_margin);
                self.render_footer(ui);
            });
        });
    }

    /// Full-window affordance while a drag hovers the window; egui clears
    /// `hovered_files` on drag-leave and on drop, which reverts it.
    fn render_drag_overlay(&self, ctx: &egui::Context) {
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        if !hovering {
            return;
        }

        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("drop_overlay"),
        ));
        let rect = ctx.screen_rect();
        painter.rect_filled(rect, 0.0, Color32::from_black_alpha(140));
        painter.rect_stroke(rect.shrink(12.0), 6.0, Stroke::new(2.0, ACCENT));
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Solte o GIF aqui",
            FontId::proportional(28.0),
            Color32::WHITE,
        );
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        let group = ui.group(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(18.0);
                ui.label(RichText::new("🎬").size(40.0));
                ui.add_space(4.0);
                ui.label("Arraste e solte seu GIF aqui");
                ui.add_space(8.0);
                if ui.button("📁 Selecionar GIF").clicked() {
                    self.open_picker();
                }
                ui.add_space(18.0);
            });
        });

        if self.scroll_to_picker {
            group.response.scroll_to_me(Some(Align::Min));
            self.scroll_to_picker = false;
        }
    }

    fn render_file_info(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            if let Some(label) = self.state.file_label() {
                ui.label(label);
            }
            if let Some(label) = self.state.size_label() {
                ui.label(label);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Nome personalizado (opcional):");
                ui.add(
                    egui::TextEdit::singleline(&mut self.custom_name)
                        .hint_text("ex: minha_animacao"),
                );
            });

            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                ui.add_enabled_ui(self.state.can_submit(), |ui| {
                    let button =
                        egui::Button::new("📤 Extrair Frames").min_size(egui::vec2(200.0, 40.0));
                    if ui.add(button).clicked() {
                        self.start_upload();
                    }
                });
            });
        });
    }

    fn render_progress(&self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);
                ui.spinner();
                ui.add_space(6.0);
                ui.label("Processando seu GIF...");
                ui.add_space(10.0);
            });
        });
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        let frames = match &self.state.result {
            Some(result) => result.frames.clone(),
            None => return,
        };

        let group = ui.group(|ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Frames extraídos");
                if let Some(label) = self.state.frame_count_label() {
                    ui.colored_label(OK_GREEN, label);
                }
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("📦 Baixar todos (ZIP)").clicked() {
                    self.download_all();
                }
                if ui.button("🔄 Converter outro GIF").clicked() {
                    self.reset();
                }
            });

            ui.add_space(10.0);
            let mut clicked_download: Option<usize> = None;
            ui.horizontal_wrapped(|ui| {
                for (index, frame) in frames.iter().enumerate() {
                    ui.vertical(|ui| {
                        ui.set_width(THUMB_SIZE.x);
                        match self.frame_previews.get(index) {
                            Some(FramePreview::Ready(texture)) => {
                                ui.add(
                                    egui::Image::new(texture).fit_to_exact_size(THUMB_SIZE),
                                );
                            }
                            Some(FramePreview::Failed) => {
                                frame_placeholder(ui);
                            }
                            _ => {
                                let (rect, _) = ui
                                    .allocate_exact_size(THUMB_SIZE, egui::Sense::hover());
                                ui.painter().rect_filled(
                                    rect,
                                    4.0,
                                    ui.visuals().extreme_bg_color,
                                );
                                ui.put(rect, egui::Spinner::new());
                            }
                        }
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&frame.name).small());
                            if ui.small_button("⬇").on_hover_text("Download").clicked() {
                                clicked_download = Some(index);
                            }
                        });
                    });
                }
            });
            if let Some(index) = clicked_download {
                self.download_one(index);
            }
        });

        if self.scroll_to_results {
            group.response.scroll_to_me(Some(Align::Min));
            self.scroll_to_results = false;
        }
    }

    fn render_error(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.vertical_centered(|ui| {
                if let Some(message) = self.state.error_message.clone() {
                    ui.colored_label(ERROR_RED, format!("❌ {}", message));
                }
                ui.add_space(8.0);
                if ui.button("🔄 Tentar novamente").clicked() {
                    self.reset();
                }
            });
        });
    }

    fn render_footer(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let (color, text) = match self.server_online {
                Some(true) => (OK_GREEN, "Servidor: online"),
                Some(false) => (ERROR_RED, "Servidor: offline"),
                None => (ui.visuals().weak_text_color(), "Servidor: verificando..."),
            };
            ui.colored_label(color, text);
        });

        if let Some(status) = self.last_download.clone() {
            ui.add_space(4.0);
            ui.vertical_centered(|ui| match status.result {
                Ok(path) => {
                    ui.horizontal(|ui| {
                        ui.colored_label(OK_GREEN, format!("✅ {} salvo", status.label));
                        if ui.small_button("📂 Abrir pasta").clicked() {
                            if let Some(folder) = path.parent() {
                                if let Err(e) = open::that(folder) {
                                    log::error!("Failed to open folder: {}", e);
                                }
                            }
                        }
                    });
                }
                Err(message) => {
                    ui.colored_label(ERROR_RED, format!("❌ {}: {}", status.label, message));
                }
            });
        }
    }
}

/// Inline stand-in for a frame whose asset could not be loaded.
fn frame_placeholder(ui: &mut egui::Ui) {
    let (rect, _) = ui.allocate_exact_size(THUMB_SIZE, egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "Erro ao carregar",
        FontId::proportional(12.0),
        ui.visuals().weak_text_color(),
    );
}
