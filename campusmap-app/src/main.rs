mod surface;

use anyhow::Context as _;
use campusmap::{constants::CAMPUS_CORRESPONDENCES, prelude::*};
use std::path::Path;
use surface::EguiSurface;

/// Campus map viewer.
///
/// Usage: `campusmap-app [config.json]`
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => CampusMapConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => CampusMapConfig::default(),
    };

    let survey = match &config.transform {
        TransformSource::Correspondences { points } => points.clone(),
        TransformSource::Coefficients(_) => CAMPUS_CORRESPONDENCES.to_vec(),
    };

    let base_image = match &config.image.path {
        Some(path) => Some(load_color_image(path)?),
        None => None,
    };
    let map = CampusMap::from_config(&config, EguiSurface::new())
        .context("failed to set up the campus map")?;
    let provider: Box<dyn LocationProvider> = match config.simulated_fix {
        Some(fix) => Box::new(FixedLocationProvider::new(fix)),
        None => Box::new(UnavailableLocationProvider::default()),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Campus Map"),
        ..Default::default()
    };

    eframe::run_native(
        "campusmap-app",
        options,
        Box::new(move |cc| {
            Box::new(CampusMapApp::new(cc, map, base_image, provider, &survey))
        }),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with an error: {e}"))?;

    Ok(())
}

fn load_color_image(path: &Path) -> anyhow::Result<egui::ColorImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to open base image {}", path.display()))?
        .to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    log::info!("loaded base image {} ({}x{})", path.display(), size[0], size[1]);
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

/// The main application struct
struct CampusMapApp {
    map: CampusMap<EguiSurface>,
    provider: Box<dyn LocationProvider>,
    confirm_clear_all: bool,
    /// Pixel error of the transform at each surveyed point
    residuals: Vec<f64>,
}

impl CampusMapApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        mut map: CampusMap<EguiSurface>,
        base_image: Option<egui::ColorImage>,
        provider: Box<dyn LocationProvider>,
        survey: &[Correspondence],
    ) -> Self {
        if let Some(image) = base_image {
            let texture = cc
                .egui_ctx
                .load_texture("campus_base_image", image, egui::TextureOptions::LINEAR);
            map.surface_mut().set_texture(texture);
        }
        let residuals = map.transform().residuals(survey);
        log::info!("calibration residuals (px): {:?}", residuals);
        Self {
            map,
            provider,
            confirm_clear_all: false,
            residuals,
        }
    }

    fn locate(&mut self) {
        // The bundled providers answer synchronously, so blocking here is brief.
        pollster::block_on(self.map.locate(self.provider.as_ref()));
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            let armed = self.map.surface().is_placement_armed();
            if ui
                .selectable_label(armed, "Add annotation")
                .on_hover_text("Click the map to drop a marker")
                .clicked()
            {
                self.map.toggle_placing();
            }

            if ui.button("Clear all").clicked() {
                if self.map.confirms_clear_all() {
                    self.confirm_clear_all = true;
                } else {
                    self.map.clear_all(&mut FixedAnswer(true));
                }
            }

            if ui.button("Locate me").clicked() {
                self.locate();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{} annotations", self.map.store().len()));
            });
        });
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match self.map.surface().hover() {
                Some(pixel) => {
                    let geo = self.map.transform().to_geo(pixel);
                    ui.label(format!("Cursor {} -> {}", pixel, geo));
                }
                None => {
                    ui.label("Cursor outside the map");
                }
            }
            ui.separator();
            let residuals: Vec<String> =
                self.residuals.iter().map(|r| format!("{r:.2}")).collect();
            ui.label(format!("Calibration residuals (px): {}", residuals.join(" / ")));
        });
    }

    fn notice_banner(&mut self, ui: &mut egui::Ui) {
        let mut dismissed = None;
        for (index, notice) in self.map.surface().notices().enumerate() {
            let color = match notice.level {
                NoticeLevel::Info => egui::Color32::from_rgb(40, 90, 160),
                NoticeLevel::Warning => egui::Color32::from_rgb(170, 110, 0),
                NoticeLevel::Error => egui::Color32::from_rgb(170, 30, 30),
            };
            ui.horizontal(|ui| {
                ui.colored_label(color, &notice.message);
                if ui.small_button("✕").clicked() {
                    dismissed = Some(index);
                }
            });
        }
        if let Some(index) = dismissed {
            self.map.surface_mut().dismiss_notice(index);
        }
    }

    fn clear_all_dialog(&mut self, ctx: &egui::Context) {
        if !self.confirm_clear_all {
            return;
        }
        let mut answer = None;
        egui::Window::new("Clear all annotations")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(campusmap::constants::CLEAR_ALL_PROMPT);
                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Keep").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if let Some(answer) = answer {
            self.confirm_clear_all = false;
            self.map.clear_all(&mut FixedAnswer(answer));
        }
    }
}

impl eframe::App for CampusMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.top_bar(ui);
        });

        if self.map.surface().notices().next().is_some() {
            egui::TopBottomPanel::top("notice_panel").show(ctx, |ui| {
                self.notice_banner(ui);
            });
        }

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            self.status_bar(ui);
        });

        self.clear_all_dialog(ctx);

        let input = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.map.surface_mut().show(ui))
            .inner;

        for event in input.events {
            self.map.handle_event(event);
        }
        for control in input.controls {
            // Clear-all and locate come from the top bar, never from popups
            self.map.apply(control, &mut FixedAnswer(false));
        }
    }
}
