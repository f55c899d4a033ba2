/*!
 * Desktop front end for country-explorer
 *
 * A cross-platform window with four pages:
 * - Home: landing page
 * - Countries: search box, region filter, filtered list or API search results
 * - Country detail: overview, favorite toggle, Details / Neighbors tabs
 * - About
 *
 * Remote calls run on worker threads through `RequestSlot`s and are polled
 * once per frame, so the UI never blocks and superseded answers are dropped.
 */

use anyhow::Result;
use country_explorer::detail::{self, DetailState, Neighbors, Tab};
use country_explorer::favorites::{Favorites, JsonFileStore};
use country_explorer::query::{QueryState, View};
use country_explorer::route::Route;
use country_explorer::task::RequestSlot;
use country_explorer::{
    ABOUT, Client, Config, Country, CountrySource, FetchError, Region, format, storage,
};
use eframe::egui;

type Fetched<T> = Result<T, FetchError>;

/// Autocomplete entries shown under the search box.
const SUGGESTIONS_SHOWN: usize = 8;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("ignoring invalid environment configuration: {:#}", e);
            Config::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([640.0, 420.0])
            .with_title("Country Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "Country Explorer",
        options,
        Box::new(move |_cc| match ExplorerApp::new(cfg) {
            Ok(app) => Ok(Box::new(app) as Box<dyn eframe::App>),
            Err(e) => Err(e.into()),
        }),
    )
}

/// Main application state
struct ExplorerApp {
    cfg: Config,
    client: Client,
    favorites: Favorites<JsonFileStore>,
    route: Route,

    // Countries page
    home: QueryState,
    load_slot: RequestSlot<Fetched<Vec<Country>>>,
    search_slot: RequestSlot<Fetched<Vec<Country>>>,

    // Detail page
    detail: Option<DetailState>,
    detail_slot: RequestSlot<Fetched<Country>>,
    neighbor_slot: RequestSlot<Fetched<Vec<Country>>>,

    status_message: String,
    error_message: String,
}

impl ExplorerApp {
    fn new(cfg: Config) -> Result<Self> {
        let client = Client::from_config(&cfg)?;
        let favorites = Favorites::new(JsonFileStore::new(&cfg.favorites_path));
        Ok(Self {
            cfg,
            client,
            favorites,
            route: Route::Hero,
            home: QueryState::new(),
            load_slot: RequestSlot::new(),
            search_slot: RequestSlot::new(),
            detail: None,
            detail_slot: RequestSlot::new(),
            neighbor_slot: RequestSlot::new(),
            status_message: String::new(),
            error_message: String::new(),
        })
    }

    fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        log::debug!("navigate {} -> {}", self.route, route);
        self.status_message.clear();
        self.error_message.clear();

        // Leaving a detail page abandons its requests.
        if matches!(self.route, Route::Country(_)) {
            self.detail_slot.cancel();
            self.neighbor_slot.cancel();
            self.detail = None;
        }

        match &route {
            Route::Countries => self.ensure_loaded(),
            Route::Country(name) => self.open_detail(name),
            Route::Hero | Route::About => {}
        }
        self.route = route;
    }

    /// The full list is fetched once, on the first visit to the list page.
    fn ensure_loaded(&mut self) {
        if !self.home.all().is_empty() || self.load_slot.is_pending() {
            return;
        }
        let client = self.client.clone();
        self.load_slot.spawn(move || client.fetch_all_countries());
    }

    fn start_search(&mut self) {
        if let Some(term) = self.home.begin_search() {
            let client = self.client.clone();
            self.search_slot.spawn(move || client.fetch_country_by_name(&term));
        }
    }

    fn clear_filters(&mut self) {
        self.search_slot.cancel();
        self.home.cancel_search();
        self.home.clear();
    }

    fn open_detail(&mut self, name: &str) {
        self.neighbor_slot.cancel();
        self.detail = Some(DetailState::new(name));
        let client = self.client.clone();
        let name = name.to_string();
        self.detail_slot.spawn(move || detail::lookup(&client, &name));
    }

    fn poll_requests(&mut self) {
        if let Some(outcome) = self.load_slot.poll() {
            self.home.finish_load(outcome);
        }
        if let Some(outcome) = self.search_slot.poll() {
            self.home.finish_search(outcome);
        }
        if let Some(outcome) = self.detail_slot.poll()
            && let Some(state) = self.detail.as_mut()
            && let Some(codes) = state.finish_lookup(outcome, &self.favorites)
        {
            let client = self.client.clone();
            self.neighbor_slot.spawn(move || client.fetch_countries_by_codes(&codes));
        }
        if let Some(outcome) = self.neighbor_slot.poll()
            && let Some(state) = self.detail.as_mut()
        {
            state.finish_neighbors(outcome);
        }
    }

    fn any_pending(&self) -> bool {
        self.load_slot.is_pending()
            || self.search_slot.is_pending()
            || self.detail_slot.is_pending()
            || self.neighbor_slot.is_pending()
    }

    fn toggle_favorite(&mut self) {
        let Some(state) = self.detail.as_mut() else {
            return;
        };
        match state.toggle_favorite(&mut self.favorites) {
            Ok(true) => self.status_message = "Added to favorites".to_string(),
            Ok(false) => self.status_message = "Removed from favorites".to_string(),
            Err(e) => self.error_message = format!("Could not update favorites: {:#}", e),
        }
    }

    fn export_shown(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("JSON", &["json"])
            .set_file_name("countries.csv")
            .save_file()
        else {
            return;
        };
        let items = match self.home.view() {
            View::Countries { items, .. } => items,
            _ => Vec::new(),
        };
        match storage::save(&items, &path, None) {
            Ok(()) => {
                self.status_message =
                    format!("Saved {} countries to {}", items.len(), path.display());
                self.error_message.clear();
            }
            Err(e) => self.error_message = format!("Export failed: {:#}", e),
        }
    }

    fn show_nav(&self, ui: &mut egui::Ui) -> Option<Route> {
        let mut nav = None;
        ui.horizontal(|ui| {
            ui.strong("🌍 Country Explorer");
            ui.separator();
            for (label, target) in [
                ("Home", Route::Hero),
                ("Countries", Route::Countries),
                ("About", Route::About),
            ] {
                let selected = self.route == target
                    || (target == Route::Countries && matches!(self.route, Route::Country(_)));
                if ui.selectable_label(selected, label).clicked() {
                    nav = Some(target);
                }
            }
        });
        nav
    }

    fn show_hero(&self, ui: &mut egui::Ui) -> Option<Route> {
        let mut nav = None;
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.heading("Explore the World");
            ui.add_space(8.0);
            ui.label("Discover flags, capitals, populations, languages and neighbors of every country.");
            ui.add_space(16.0);
            if ui.button("Explore Countries").clicked() {
                nav = Some(Route::Countries);
            }
        });
        nav
    }

    fn show_about(&self, ui: &mut egui::Ui) {
        ui.heading("About Country Explorer");
        ui.add_space(10.0);
        ui.label(ABOUT);
        ui.add_space(10.0);
        ui.hyperlink_to("REST Countries API", "https://restcountries.com");
    }

    fn show_countries(&mut self, ui: &mut egui::Ui) -> Option<Route> {
        let mut nav = None;
        let mut search = false;
        let mut clear = false;
        let mut export = false;
        let busy = self.home.is_loading();

        ui.heading("🌍 Country Explorer");
        ui.label("Search for any country and get detailed information like population, region, languages, and more.");
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.home.search_text)
                    .hint_text("Search Country")
                    .desired_width(260.0),
            );
            if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                search = true;
            }

            let region_label = self
                .home
                .region
                .map(|r| r.as_str())
                .unwrap_or("All Regions");
            egui::ComboBox::from_id_salt("region_filter")
                .selected_text(region_label)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.home.region, None, "All Regions");
                    for r in Region::ALL {
                        ui.selectable_value(&mut self.home.region, Some(r), r.as_str());
                    }
                });

            if ui
                .add_enabled(!busy, egui::Button::new("Search"))
                .clicked()
            {
                search = true;
            }
            if ui.button("Clear Filters").clicked() {
                clear = true;
            }
        });

        if self.home.results().is_empty() {
            let names: Vec<String> = self
                .home
                .suggestions(SUGGESTIONS_SHOWN)
                .into_iter()
                .map(str::to_string)
                .collect();
            if !names.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    ui.weak("Suggestions:");
                    for name in names {
                        if ui.small_button(&name).clicked() {
                            self.home.search_text = name;
                        }
                    }
                });
            }
        }
        ui.add_space(10.0);

        match self.home.view() {
            View::Loading => {
                ui.spinner();
            }
            View::Error(msg) => {
                ui.colored_label(egui::Color32::RED, msg);
                ui.label("Try adjusting your search or region filter.");
            }
            View::Empty => {
                if self.load_slot.is_pending() {
                    ui.spinner();
                }
            }
            View::Countries { items, .. } => {
                ui.horizontal(|ui| {
                    ui.label(self.home.headline(items.len()));
                    if ui.small_button("Export…").clicked() {
                        export = true;
                    }
                });
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for c in &items {
                        if let Some(target) = country_card(ui, c, &self.cfg.locale) {
                            nav = Some(target);
                        }
                    }
                });
            }
        }

        if search {
            self.start_search();
        }
        if clear {
            self.clear_filters();
        }
        if export {
            self.export_shown();
        }
        nav
    }

    fn show_detail(&mut self, ui: &mut egui::Ui) -> Option<Route> {
        let mut nav = None;
        let mut toggle = false;
        let locale = self.cfg.locale.clone();

        let Some(state) = self.detail.as_mut() else {
            return None;
        };
        if state.is_loading() {
            ui.spinner();
            return None;
        }
        if let Some(err) = state.error() {
            ui.colored_label(egui::Color32::RED, err);
            if ui.button("⬅ Back to Countries").clicked() {
                nav = Some(Route::Countries);
            }
            return nav;
        }
        let Some(c) = state.country() else {
            return None;
        };

        ui.horizontal(|ui| {
            if let Some(flag) = c.flag.as_deref() {
                ui.heading(flag);
            }
            ui.heading(&c.name.common);
            let heart = if state.is_favorite() { "♥" } else { "♡" };
            let hint = if state.is_favorite() {
                "Remove from favorites"
            } else {
                "Add to favorites"
            };
            if ui.button(heart).on_hover_text(hint).clicked() {
                toggle = true;
            }
            if ui.button("⬅ Back").clicked() {
                nav = Some(Route::Countries);
            }
        });
        ui.label(&c.name.official);
        ui.add_space(8.0);

        egui::Grid::new("overview").num_columns(2).striped(true).show(ui, |ui| {
            let rows = [
                ("Region", format::text_or_missing(Some(c.region.as_str()))),
                ("Subregion", format::text_or_missing(c.subregion.as_deref())),
                ("Capital", format::capitals(c)),
                ("Population", format::population(c, &locale)),
                ("Area", format::area(c, &locale)),
                ("Currency", format::currencies(c)),
                ("Languages", format::languages(c)),
            ];
            for (k, v) in rows {
                ui.strong(k);
                ui.label(v);
                ui.end_row();
            }
        });
        if let Some(url) = c.flags.best() {
            ui.hyperlink_to("Flag image", url);
        }
        if let Some(arms) = c.coat_of_arms.as_ref().and_then(|a| a.svg.as_deref()) {
            ui.hyperlink_to("Coat of Arms", arms);
        }
        ui.add_space(10.0);

        let mut tab = state.tab;
        ui.horizontal(|ui| {
            ui.selectable_value(&mut tab, Tab::Details, "Details");
            ui.selectable_value(&mut tab, Tab::Neighbors, "Neighbors");
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| match tab {
            Tab::Details => show_details_tab(ui, c, &locale),
            Tab::Neighbors => {
                if let Some(target) = show_neighbors_tab(ui, &state.neighbors) {
                    nav = Some(target);
                }
            }
        });
        state.tab = tab;

        if toggle {
            self.toggle_favorite();
        }
        nav
    }
}

/// One list entry; returns the detail route when the name is clicked.
fn country_card(ui: &mut egui::Ui, c: &Country, locale: &str) -> Option<Route> {
    let mut nav = None;
    ui.group(|ui| {
        ui.horizontal(|ui| {
            if let Some(flag) = c.flag.as_deref() {
                ui.label(flag);
            }
            if ui.link(egui::RichText::new(&c.name.common).strong()).clicked() {
                nav = Some(Route::country(&c.name.common));
            }
        });
        ui.label(format!("Region: {}", c.region));
        ui.label(format!(
            "Subregion: {}",
            format::text_or_missing(c.subregion.as_deref())
        ));
        ui.label(format!("Population: {}", format::grouped(c.population, locale)));
        ui.hyperlink_to("More Info", format::wikipedia_url(c));
    });
    nav
}

fn section(ui: &mut egui::Ui, title: &str, rows: Vec<(&str, String)>) {
    ui.group(|ui| {
        ui.strong(title);
        ui.separator();
        egui::Grid::new(title).num_columns(2).show(ui, |ui| {
            for (k, v) in rows {
                ui.label(k);
                ui.label(v);
                ui.end_row();
            }
        });
    });
}

fn show_details_tab(ui: &mut egui::Ui, c: &Country, locale: &str) {
    section(
        ui,
        "Geography",
        vec![
            ("Continent", format::continents(c)),
            ("Area", format::area(c, locale)),
            ("Borders", format::borders_summary(c)),
            ("Landlocked", format::yes_no(c.landlocked).to_string()),
        ],
    );
    section(
        ui,
        "Society",
        vec![
            ("Population", format::grouped(c.population, locale)),
            ("Gini Index", format::gini(c)),
            ("Languages", format::language_count(c)),
            ("Driving Side", format::driving_side(c)),
        ],
    );
    section(
        ui,
        "Economy & Governance",
        vec![
            ("Currencies", format::currency_codes(c)),
            ("UN Member", format::yes_no(c.un_member).to_string()),
            ("Independent", format::independent(c).to_string()),
            ("Top-Level Domain", format::tlds(c)),
        ],
    );
    ui.group(|ui| {
        ui.strong("Maps & Time");
        ui.separator();
        ui.horizontal_wrapped(|ui| {
            for tz in format::timezones(c) {
                ui.label(tz);
            }
        });
        if !c.maps.google_maps.is_empty() {
            ui.hyperlink_to("Google Maps", &c.maps.google_maps);
        }
        if !c.maps.open_street_maps.is_empty() {
            ui.hyperlink_to("OpenStreetMap", &c.maps.open_street_maps);
        }
        ui.hyperlink_to("Wikipedia", format::wikipedia_url(c));
    });
}

fn show_neighbors_tab(ui: &mut egui::Ui, neighbors: &Neighbors) -> Option<Route> {
    let mut nav = None;
    ui.heading("Neighboring Countries");
    match neighbors {
        Neighbors::NoLandBorders => {
            ui.label("This country has no land borders.");
        }
        Neighbors::Loading => {
            ui.spinner();
        }
        // Already logged; the tab just stays empty.
        Neighbors::Unavailable => {}
        Neighbors::Loaded(list) => {
            for n in list {
                ui.group(|ui| {
                    if ui.link(egui::RichText::new(&n.name).strong()).clicked() {
                        nav = Some(Route::country(&n.name));
                    }
                    ui.label(n.capital.as_deref().unwrap_or(""));
                    if !n.flag_png.is_empty() {
                        ui.hyperlink_to("Flag", &n.flag_png);
                    }
                });
            }
        }
    }
    nav
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background requests
        self.poll_requests();

        // Keep polling while anything is in flight (and for spinner animation)
        if self.any_pending() {
            ctx.request_repaint();
        }

        let mut nav = None;
        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            nav = self.show_nav(ui);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            } else if !self.status_message.is_empty() {
                ui.label(&self.status_message);
            } else {
                ui.label(" ");
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let target = match self.route.clone() {
                Route::Hero => self.show_hero(ui),
                Route::Countries => self.show_countries(ui),
                Route::About => {
                    self.show_about(ui);
                    None
                }
                Route::Country(_) => self.show_detail(ui),
            };
            if target.is_some() {
                nav = target;
            }
        });

        if let Some(route) = nav {
            self.navigate(route);
        }
    }
}
