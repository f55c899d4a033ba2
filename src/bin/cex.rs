use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use country_explorer::detail::{self, DetailState, Neighbors};
use country_explorer::favorites::{Favorites, JsonFileStore};
use country_explorer::query::{self, QueryState, View};
use country_explorer::{ABOUT, Client, Config, Country, CountrySource, Region};
use country_explorer::{config, format, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cex",
    version,
    about = "Browse, search and filter countries via the REST Countries API"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// API base URL (default https://restcountries.com/v3.1, env CEX_BASE_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Request timeout in seconds (default: none, env CEX_TIMEOUT_SECS).
    #[arg(long, global = true)]
    timeout: Option<String>,
    /// Favorites file (env CEX_FAVORITES).
    #[arg(long, global = true)]
    favorites: Option<PathBuf>,
    /// Locale for number formatting: en, de, fr, es, it, pt, nl (env CEX_LOCALE).
    #[arg(long, global = true)]
    locale: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load all countries and show the filtered list (first 20 matches).
    List(ListArgs),
    /// Search the API by name, optionally restricted to a region.
    Search(SearchArgs),
    /// Show details for a country by its common name.
    Show(ShowArgs),
    /// Toggle a country (alpha-3 code) in the favorites.
    Favorite {
        /// Alpha-3 code, e.g. PER
        code: String,
    },
    /// List favorite country codes.
    Favorites,
    /// About this tool.
    About,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

impl OutFormat {
    fn as_str(&self) -> &'static str {
        match self {
            OutFormat::Csv => "csv",
            OutFormat::Json => "json",
        }
    }
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Save the shown countries to a file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive substring of the common name.
    #[arg(short, long)]
    search: Option<String>,
    /// Africa, Americas, Asia, Europe or Oceania.
    #[arg(short, long)]
    region: Option<Region>,
    #[command(flatten)]
    export: ExportArgs,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Name (or part of it) to look up.
    name: String,
    /// Africa, Americas, Asia, Europe or Oceania.
    #[arg(short, long)]
    region: Option<Region>,
    #[command(flatten)]
    export: ExportArgs,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Common name, matched exactly.
    name: String,
    /// Also list neighboring countries.
    #[arg(long, default_value_t = false)]
    neighbors: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let cfg = resolve_config(&cli.global)?;
    match cli.cmd {
        Command::List(args) => cmd_list(&cfg, args),
        Command::Search(args) => cmd_search(&cfg, args),
        Command::Show(args) => cmd_show(&cfg, args),
        Command::Favorite { code } => cmd_favorite(&cfg, &code),
        Command::Favorites => cmd_favorites(&cfg),
        Command::About => {
            println!("{}", ABOUT);
            Ok(())
        }
    }
}

fn resolve_config(args: &GlobalArgs) -> Result<Config> {
    let mut cfg = Config::from_env()?;
    if let Some(url) = &args.base_url {
        cfg.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(secs) = &args.timeout {
        cfg.timeout = Some(config::parse_timeout(secs)?);
    }
    if let Some(path) = &args.favorites {
        cfg.favorites_path = path.clone();
    }
    if let Some(locale) = &args.locale {
        cfg.locale = locale.clone();
    }
    Ok(cfg)
}

fn favorites(cfg: &Config) -> Favorites<JsonFileStore> {
    Favorites::new(JsonFileStore::new(&cfg.favorites_path))
}

/// Print the current view; errors end the command with a non-zero status.
fn print_view(state: &QueryState, cfg: &Config, export: &ExportArgs) -> Result<()> {
    match state.view() {
        View::Loading => Ok(()),
        // An empty result after the region filter is an answer, not a failure.
        View::Error(msg) if msg == query::NO_RESULTS => {
            println!("{}", state.headline(0));
            println!("{}", msg);
            Ok(())
        }
        View::Error(msg) => bail!("{}\nTry adjusting your search or region filter.", msg),
        View::Empty => {
            println!("{}", state.headline(0));
            Ok(())
        }
        View::Countries { items, .. } => {
            println!("{}", state.headline(items.len()));
            for c in &items {
                println!("  {}", format::summary_line(c, &cfg.locale));
            }
            export_items(&items, export)
        }
    }
}

fn export_items(items: &[&Country], export: &ExportArgs) -> Result<()> {
    if let Some(path) = export.out.as_ref() {
        storage::save(items, path, export.format.as_ref().map(OutFormat::as_str))?;
        eprintln!("Saved {} countries to {}", items.len(), path.display());
    }
    Ok(())
}

fn cmd_list(cfg: &Config, args: ListArgs) -> Result<()> {
    let client = Client::from_config(cfg)?;
    let mut state = QueryState::new();
    state.search_text = args.search.unwrap_or_default();
    state.region = args.region;
    state.load_all(&client);
    print_view(&state, cfg, &args.export)
}

fn cmd_search(cfg: &Config, args: SearchArgs) -> Result<()> {
    let client = Client::from_config(cfg)?;
    let mut state = QueryState::new();
    state.search_text = args.name;
    state.region = args.region;
    if !state.search(&client) {
        bail!("search text must not be blank");
    }
    print_view(&state, cfg, &args.export)
}

fn cmd_show(cfg: &Config, args: ShowArgs) -> Result<()> {
    let client = Client::from_config(cfg)?;
    let favs = favorites(cfg);
    let mut state = DetailState::new(&args.name);
    let codes = state.finish_lookup(detail::lookup(&client, &args.name), &favs);
    if let Some(msg) = state.error() {
        bail!("{}", msg);
    }
    if args.neighbors {
        match codes {
            Some(codes) => state.finish_neighbors(client.fetch_countries_by_codes(&codes)),
            None => state.neighbors = Neighbors::NoLandBorders,
        }
    }
    let Some(country) = state.country() else {
        return Ok(());
    };
    print_country(country, state.is_favorite(), &cfg.locale);
    if args.neighbors {
        print_neighbors(&state.neighbors);
    }
    Ok(())
}

fn print_country(c: &Country, favorite: bool, locale: &str) {
    let star = if favorite { " ★" } else { "" };
    println!("{}{}", c.name.common, star);
    println!("{}", c.name.official);
    println!();
    println!("Region:      {}", format::text_or_missing(Some(c.region.as_str())));
    println!("Subregion:   {}", format::text_or_missing(c.subregion.as_deref()));
    println!("Capital:     {}", format::capitals(c));
    println!("Population:  {}", format::population(c, locale));
    println!("Area:        {}", format::area(c, locale));
    println!("Currency:    {}", format::currencies(c));
    println!("Languages:   {}", format::languages(c));
    println!();
    println!("Geography");
    println!("  Continent:   {}", format::continents(c));
    println!("  Borders:     {}", format::borders_summary(c));
    println!("  Landlocked:  {}", format::yes_no(c.landlocked));
    println!("Society");
    println!("  Gini index:  {}", format::gini(c));
    println!("  Languages:   {}", format::language_count(c));
    println!("  Driving:     {}", format::driving_side(c));
    println!("Economy & Governance");
    println!("  Currencies:  {}", format::currency_codes(c));
    println!("  UN member:   {}", format::yes_no(c.un_member));
    println!("  Independent: {}", format::independent(c));
    println!("  TLD:         {}", format::tlds(c));
    println!("Maps & Time");
    println!("  Timezones:   {}", format::timezones(c).join(", "));
    if !c.maps.google_maps.is_empty() {
        println!("  Google Maps: {}", c.maps.google_maps);
    }
    if !c.maps.open_street_maps.is_empty() {
        println!("  OSM:         {}", c.maps.open_street_maps);
    }
    println!("  Wikipedia:   {}", format::wikipedia_url(c));
}

fn print_neighbors(neighbors: &Neighbors) {
    println!();
    println!("Neighboring Countries");
    match neighbors {
        Neighbors::NoLandBorders => println!("  This country has no land borders."),
        Neighbors::Loading => {}
        Neighbors::Unavailable => println!("  Neighboring countries are unavailable right now."),
        Neighbors::Loaded(list) => {
            for n in list {
                println!("  {} [{}]  {}", n.name, n.cca3, n.capital.as_deref().unwrap_or(""));
            }
        }
    }
}

fn cmd_favorite(cfg: &Config, code: &str) -> Result<()> {
    let code = code.trim().to_ascii_uppercase();
    let mut favs = favorites(cfg);
    let set = favs.toggle(&code)?;
    if set.contains(&code) {
        println!("{} added to favorites", code);
    } else {
        println!("{} removed from favorites", code);
    }
    Ok(())
}

fn cmd_favorites(cfg: &Config) -> Result<()> {
    let favs = favorites(cfg);
    let set = favs.get()?;
    if set.is_empty() {
        println!("No favorites yet.");
    }
    for code in set {
        println!("{}", code);
    }
    Ok(())
}
