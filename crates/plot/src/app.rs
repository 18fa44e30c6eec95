use eframe::egui::{self, Color32};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoint, Points};
use lagrange_multipliers::{Extremum, scene::Scene};

use crate::{Projected, Projection};

/// Window settings for [`SceneApp::run`].
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowConfig {
    title: String,
    legend: bool,
    projection: Projection,
}

impl ShowConfig {
    /// Creates a config with a default title, a legend, and the default view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Lagrange multipliers".to_owned(),
            legend: true,
            projection: Projection::default(),
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Hides the legend.
    #[must_use]
    pub fn without_legend(mut self) -> Self {
        self.legend = false;
        self
    }

    /// Sets the camera angles.
    #[must_use]
    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

const SURFACE: Color32 = Color32::GREEN;
const CURVE: Color32 = Color32::RED;
const MARKER: Color32 = Color32::BLUE;

/// A runnable egui application showing a projected [`Scene`].
pub struct SceneApp {
    wireframe: Vec<Vec<PlotPoint>>,
    curve: Vec<PlotPoint>,
    markers: Vec<(Extremum, [PlotPoint; 1])>,
    history: Vec<Vec<PlotPoint>>,
    legend: bool,
}

impl SceneApp {
    /// Projects the scene for display.
    #[must_use]
    pub fn new(scene: &Scene, config: &ShowConfig) -> Self {
        let Projected {
            wireframe,
            feasible_curve,
            markers,
        } = config.projection.project_scene(scene);

        Self {
            wireframe: wireframe.into_iter().map(to_plot_points).collect(),
            curve: to_plot_points(feasible_curve),
            markers: markers
                .into_iter()
                .map(|(extremum, point)| (extremum, [point.into()]))
                .collect(),
            history: Vec::new(),
            legend: config.legend,
        }
    }

    /// Adds residual traces, one per solve, shown on a log₁₀ scale.
    ///
    /// Non-positive residuals are skipped.
    #[must_use]
    pub fn with_history(mut self, runs: &[Vec<[f64; 2]>]) -> Self {
        self.history = runs
            .iter()
            .map(|run| {
                run.iter()
                    .filter(|p| p[1] > 0.0)
                    .map(|p| PlotPoint::new(p[0], p[1].log10()))
                    .collect()
            })
            .collect();
        self
    }

    /// Opens a blocking window. Returns once the window is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn run(self, config: &ShowConfig) -> Result<(), eframe::Error> {
        eframe::run_native(
            &config.title,
            eframe::NativeOptions::default(),
            Box::new(|_cc| Ok(Box::new(self))),
        )
    }

    fn show_history(&self, ui: &mut egui::Ui) {
        ui.heading("‖∇L‖ per iteration");
        Plot::new("history")
            .legend(Legend::default())
            .x_axis_label("iteration")
            .y_axis_label("log₁₀")
            .show(ui, |plot_ui| {
                for (run, points) in self.history.iter().enumerate() {
                    plot_ui.line(Line::new(points.as_slice()).name(format!("solve {}", run + 1)));
                }
            });
    }

    fn show_scene(&self, ui: &mut egui::Ui) {
        let mut plot = Plot::new("scene")
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false);
        if self.legend {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            for line in &self.wireframe {
                plot_ui.line(Line::new(line.as_slice()).color(SURFACE).name("x + y"));
            }

            plot_ui.line(
                Line::new(self.curve.as_slice())
                    .color(CURVE)
                    .width(2.0)
                    .name("x² + y² = 1"),
            );

            for (extremum, point) in &self.markers {
                let shape = match extremum {
                    Extremum::Maximum => MarkerShape::Circle,
                    Extremum::Minimum => MarkerShape::Cross,
                };
                plot_ui.points(
                    Points::new(point.as_slice())
                        .shape(shape)
                        .radius(6.0)
                        .color(MARKER)
                        .name(extremum.to_string()),
                );
            }
        });
    }
}

impl eframe::App for SceneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.history.is_empty() {
            egui::SidePanel::right("history-panel")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| self.show_history(ui));
        }
        egui::CentralPanel::default().show(ctx, |ui| self.show_scene(ui));
    }
}

fn to_plot_points(points: Vec<[f64; 2]>) -> Vec<PlotPoint> {
    points.into_iter().map(Into::into).collect()
}
