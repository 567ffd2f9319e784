use chrono::NaiveDate;
use egui::RichText;
use tracing::{debug, info, warn};

use staff_timeline::config::PlannerSettings;
use staff_timeline::io::{export_utilization_csv, AssignmentMutator, JsonFileStore, TimelineSource};
use staff_timeline::model::{AssignmentId, TimelineData, TimelineQuery, TimelineViewState};
use staff_timeline::timeline::{Interactions, PatchIntent, RenderModel, TimelineCache};

use crate::ui;
use crate::ui::theme;
use crate::ui::timeline_chart::PointerRoute;

/// Main application state.
pub struct PlannerApp {
    pub settings: PlannerSettings,
    pub store: JsonFileStore,
    pub view: TimelineViewState,
    pub today: NaiveDate,

    cache: TimelineCache,
    interactions: Interactions<PointerRoute>,
    // Last query whose fetch failed; not retried until the view changes or the user reloads
    failed_query: Option<TimelineQuery>,
    selected: Option<AssignmentId>,

    status_message: String,
    status_is_error: bool,
}

impl PlannerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: PlannerSettings,
        store: JsonFileStore,
        today: NaiveDate,
    ) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let view = TimelineViewState::new(settings.default_zoom, today)
            .set_team_filter(settings.teams.iter().cloned());
        let status_message = format!("Loaded {}", store.path().display());

        Self {
            settings,
            store,
            view,
            today,
            cache: TimelineCache::new(),
            interactions: Interactions::new(PointerRoute::default()),
            failed_query: None,
            selected: None,
            status_message,
            status_is_error: false,
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = true;
    }

    /// Switch to a new view state and fetch its window. Zoom and team filter are remembered
    /// across runs.
    pub fn set_view(&mut self, next: TimelineViewState) {
        if next == self.view {
            return;
        }
        let remember = next.zoom() != self.view.zoom() || next.teams() != self.view.teams();
        self.interactions.cancel();
        self.view = next;

        if remember {
            self.settings.default_zoom = self.view.zoom();
            self.settings.teams = self.view.teams().iter().cloned().collect();
            if let Err(e) = self.settings.save() {
                warn!("could not save settings: {e}");
            }
        }
        self.refresh();
    }

    /// Data fetched for the current view, if it has arrived.
    fn current(&self) -> Option<&TimelineData> {
        self.cache.get(&self.view.query())
    }

    /// Fetch the current window unless the cache already holds it.
    fn refresh(&mut self) {
        let query = self.view.query();
        if !self.cache.is_stale(&query) || self.failed_query.as_ref() == Some(&query) {
            return;
        }

        let ticket = self.cache.issue(query.clone());
        match self.store.fetch_timeline(ticket.query()) {
            Ok(data) => {
                if self.cache.accept(ticket, data, &query) {
                    self.failed_query = None;
                }
            }
            Err(e) => {
                warn!(start = %query.window_start, end = %query.window_end, "fetch failed: {e}");
                self.set_error(format!("Could not load timeline: {e}"));
                self.failed_query = Some(query);
            }
        }
    }

    fn apply_intent(&mut self, intent: PatchIntent) {
        let id = intent.assignment_id();
        let result = self.store.patch_assignment(id, intent.patch());
        self.interactions.settle(id);

        match result {
            Ok(()) => {
                let message = self
                    .cache
                    .last()
                    .map(|data| intent.describe_success(data))
                    .unwrap_or_else(|| "Assignment updated".to_string());
                self.cache.invalidate();
                self.set_status(message);
            }
            Err(e) => {
                warn!(assignment = %id, "patch rejected: {e}");
                self.set_error(format!("Could not update assignment: {e}"));
            }
        }
    }

    pub fn reload(&mut self) {
        match JsonFileStore::open(self.store.path().to_path_buf(), self.today) {
            Ok(store) => {
                self.store = store;
                self.cache.invalidate();
                self.failed_query = None;
                self.set_status("Reloaded");
                self.refresh();
            }
            Err(e) => {
                warn!("reload failed: {e}");
                self.set_error(format!("Reload failed: {e}"));
            }
        }
    }

    pub fn open_data_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Planner data", &["json"])
            .pick_file()
        else {
            return;
        };

        match JsonFileStore::open(path.clone(), self.today) {
            Ok(store) => {
                info!(path = %path.display(), "switched data file");
                self.store = store;
                self.cache = TimelineCache::new();
                self.interactions.cancel();
                self.failed_query = None;
                self.selected = None;
                self.settings.data_file = Some(path.clone());
                if let Err(e) = self.settings.save() {
                    warn!("could not save settings: {e}");
                }
                self.set_status(format!("Loaded {}", path.display()));
                self.refresh();
            }
            Err(e) => self.set_error(format!("Error opening file: {e}")),
        }
    }

    pub fn open_data_folder(&mut self) {
        let Some(dir) = self.store.path().parent().map(|p| p.to_path_buf()) else {
            return;
        };
        if let Err(e) = open::that(&dir) {
            warn!(dir = %dir.display(), "could not open folder: {e}");
            self.set_error(format!("Could not open {}", dir.display()));
        }
    }

    pub fn export_utilization(&mut self) {
        let Some(data) = self.current() else {
            self.set_error("Nothing to export yet");
            return;
        };
        let model = RenderModel::build(data, &self.view);
        let default_name = format!("utilization_{}.csv", self.view.window_start().format("%Y-%m"));

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match export_utilization_csv(&model, &path) {
                Ok(rows) => self.set_status(format!("Exported {rows} utilization rows")),
                Err(e) => self.set_error(format!("Export failed: {e}")),
            }
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let color = if self.status_is_error {
                        theme::ERROR
                    } else {
                        theme::TEXT_SECONDARY
                    };
                    ui.label(
                        RichText::new(&self.status_message)
                            .font(theme::font_sub())
                            .color(color),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let employees = self.current().map_or(0, |d| d.employees.len());
                        ui.label(
                            RichText::new(format!("Employees: {employees}"))
                                .size(10.5)
                                .color(theme::TEXT_DIM),
                        );
                        ui.label(RichText::new(" · ").size(10.5).color(theme::TEXT_DIM));
                        ui.label(
                            RichText::new(format!("Scale: {}", self.view.zoom().label()))
                                .size(10.5)
                                .color(theme::TEXT_DIM),
                        );
                    });
                });
            });
    }

    fn show_details(&mut self, ctx: &egui::Context) {
        let Some(id) = self.selected else { return };
        let Some(data) = self.current() else { return };
        let Some(assignment) = data.assignment(id) else {
            self.selected = None;
            return;
        };
        let employee = data
            .employee(assignment.employee_id)
            .map(|e| e.name.as_str())
            .unwrap_or("—");

        let mut open = true;
        egui::Window::new("Assignment")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("assignment_details")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        let row = |ui: &mut egui::Ui, label: &str, value: String| {
                            ui.label(RichText::new(label).color(theme::TEXT_SECONDARY));
                            ui.label(value);
                            ui.end_row();
                        };
                        row(ui, "Project", assignment.project_name.clone());
                        row(ui, "Employee", employee.to_string());
                        row(ui, "Start", assignment.start.format("%d/%m/%Y").to_string());
                        row(ui, "End", assignment.end.format("%d/%m/%Y").to_string());
                        row(ui, "Allocation", assignment.allocation_label());
                        row(ui, "Hours / day", format!("{:.2}", assignment.daily_hours));
                        if assignment.is_tentative {
                            row(ui, "Status", "Tentative".to_string());
                        }
                        if let Some(note) = assignment.note.as_deref().filter(|_| assignment.has_note()) {
                            row(ui, "Note", note.to_string());
                        }
                    });
            });
        if !open {
            self.selected = None;
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        theme::apply_theme(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.reload();
        }
        self.refresh();

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        let filtered = egui::TopBottomPanel::top("filters")
            .show(ctx, |ui| ui::filter_bar::show_filter_bar(&self.view, ui))
            .inner;
        if let Some(next) = filtered {
            debug!(query = ?next.query(), "filter changed");
            self.set_view(next);
        }

        self.show_status_bar(ctx);
        self.show_details(ctx);

        // Only data fetched for this exact query is drawn; another window's rows would be laid out
        // against the wrong grid
        let query = self.view.query();
        let failed = self.failed_query.as_ref() == Some(&query);
        let output = egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(theme::BG_DARK))
            .show(ctx, |ui| {
                let Some(data) = self.cache.get(&query) else {
                    let (text, color) = if failed {
                        ("Could not load this period", theme::ERROR)
                    } else {
                        ("Loading timeline…", theme::TEXT_DIM)
                    };
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(text).color(color));
                    });
                    return None;
                };
                let model = RenderModel::build(data, &self.view);
                Some(ui::timeline_chart::show_timeline_chart(
                    &model,
                    data,
                    self.today,
                    &mut self.interactions,
                    ui,
                ))
            })
            .inner;

        if let Some(output) = output {
            if let Some(id) = output.clicked {
                self.selected = Some(id);
            }
            if let Some(intent) = output.intent {
                self.apply_intent(intent);
            }
        }
    }
}
