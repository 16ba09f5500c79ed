//! Inventory Dashboard CLI
//!
//! Command-line front end for the inventory dashboard:
//! - Show the dashboard once or keep it refreshing
//! - Add items, adjust stock, record usage
//! - Dump chart drawing commands
//! - Generate a default config file

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory_dashboard::config::{generate_default_config, Config, LoggingConfig};
use inventory_dashboard::dashboard::{DashboardSnapshot, MemoryView, RefreshScheduler, Toast};
use inventory_dashboard::render::{
    render_activity, render_inventory, render_shopping_list, render_usage, Cell, FeedBuffer,
    FeedEntry, TableBuffer, TableRow, INVENTORY_COLUMNS, SHOPPING_COLUMNS,
};
use inventory_dashboard::{AddItemForm, Dashboard, HttpInventoryApi};

#[derive(Parser)]
#[command(name = "invdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inventory dashboard client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/invdash/config.toml or ./invdash.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Inventory API URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and print the dashboard once
    Dashboard,

    /// Keep the dashboard refreshing until Ctrl-C
    Watch,

    /// Add a new inventory item
    AddItem(AddItemArgs),

    /// Adjust stock by a signed quantity
    Adjust {
        barcode: String,
        /// Positive adds stock, negative deducts
        #[arg(allow_hyphen_values = true)]
        delta: String,
        #[arg(short, long)]
        reason: String,
    },

    /// Record a usage event
    RecordUsage {
        /// Client or project name
        #[arg(long)]
        client: String,
        /// Usage date (default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        before: String,
        #[arg(long)]
        after: String,
        /// Items used, in barcode=amount format
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Print chart drawing commands as JSON
    Charts,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct AddItemArgs {
    #[arg(long)]
    barcode: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    brand: String,
    /// Item type (e.g. liquid, powder, tool)
    #[arg(long = "type")]
    item_type: String,
    #[arg(long)]
    unit_size: String,
    /// Total purchase cost of the initial stock
    #[arg(long)]
    total_cost: String,
    /// Initial stock level
    #[arg(long)]
    stock: String,
    /// Low stock threshold
    #[arg(long)]
    min_stock: String,
    /// Overstock threshold, at least 1
    #[arg(long)]
    max_stock: String,
    /// Attributes in key:value format
    #[arg(short = 'A', long = "attr")]
    attributes: Vec<String>,
}

impl AddItemArgs {
    fn fill(self, form: &mut AddItemForm) {
        form.barcode = self.barcode;
        form.name = self.name;
        form.brand = self.brand;
        form.item_type = self.item_type;
        form.unit_size = self.unit_size;
        form.total_cost = self.total_cost;
        form.stock_level = self.stock;
        form.min_stock = self.min_stock;
        form.max_stock = self.max_stock;
        form.attributes = self.attributes.join("\n");
    }
}

/// What the watch loop has already printed
#[derive(Debug, Default)]
struct WatchState {
    last_fetch: Option<DateTime<Utc>>,
    last_toast: Option<Toast>,
}

impl WatchState {
    /// The snapshot, if it is from a refresh not printed yet
    fn new_snapshot(
        &mut self,
        snapshot: Option<Arc<DashboardSnapshot>>,
    ) -> Option<Arc<DashboardSnapshot>> {
        let snapshot = snapshot?;
        if self.last_fetch == Some(snapshot.fetched_at) {
            return None;
        }
        self.last_fetch = Some(snapshot.fetched_at);
        Some(snapshot)
    }

    /// The visible toast, if it differs from the last one seen
    fn new_toast(&mut self, toast: Option<&Toast>) -> Option<Toast> {
        if self.last_toast.as_ref() == toast {
            return None;
        }
        self.last_toast = toast.cloned();
        self.last_toast.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { output } => write_default_config(output.as_ref()),
        command => run(command, cli.config, cli.api_url, &cli.format).await,
    }
}

async fn run(
    command: Commands,
    config_path: Option<PathBuf>,
    api_url: Option<String>,
    format: &str,
) -> anyhow::Result<()> {
    let mut config = match &config_path {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = api_url {
        config.api.base_url = url;
    }

    init_tracing(&config.logging);
    tracing::debug!(api = %config.api.base_url, "Inventory dashboard v{}", env!("CARGO_PKG_VERSION"));

    let api = HttpInventoryApi::new(config.api.client_config())?;
    let view = MemoryView::new(config.dashboard.chart_width, config.dashboard.chart_height);
    let mut dashboard = Dashboard::new(api, view, config.dashboard.toast_duration());

    match command {
        Commands::Dashboard => {
            let snapshot = dashboard
                .refresh()
                .await
                .with_context(|| format!("Cannot load dashboard from {}", config.api.base_url))?;
            print_snapshot(&snapshot, format)?;
        }

        Commands::Watch => {
            let shared = Arc::new(Mutex::new(dashboard));
            let scheduler = RefreshScheduler::new(config.dashboard.refresh_interval());
            let handle = scheduler.start(Arc::clone(&shared));

            let mut state = WatchState::default();
            let mut ticker = tokio::time::interval(std::time::Duration::from_millis(500));

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    _ = ticker.tick() => {}
                }

                let dashboard = shared.lock().await;
                if let Some(snapshot) = state.new_snapshot(dashboard.snapshot()) {
                    print_snapshot(&snapshot, format)?;
                }
                if let Some(toast) = state.new_toast(dashboard.toast()) {
                    eprintln!("[{:?}] {}", toast.variant, toast.message);
                }
            }

            handle.stop().await;
        }

        Commands::AddItem(args) => {
            args.fill(dashboard.add_item_form_mut());

            dashboard.add_item().await?;
            print_toast(&dashboard);
        }

        Commands::Adjust {
            barcode,
            delta,
            reason,
        } => {
            let form = dashboard.adjust_form_mut();
            form.barcode = barcode;
            form.delta = delta;
            form.reason = reason;

            dashboard.adjust_stock().await?;
            print_toast(&dashboard);
        }

        Commands::RecordUsage {
            client,
            date,
            before,
            after,
            items,
        } => {
            // Load the catalog so rows can be priced before submitting
            if let Err(e) = dashboard.refresh().await {
                eprintln!("Could not load prices: {}", e);
            }

            {
                let details = dashboard.usage_details_mut();
                details.client_name = client;
                details.usage_date =
                    date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
                details.before_state = before;
                details.after_state = after;
            }

            let mut row = dashboard
                .usage_form()
                .rows()
                .first()
                .map(|r| r.id)
                .context("Usage form has no rows")?;
            for (i, item) in items.iter().enumerate() {
                let Some((barcode, amount)) = item.split_once('=') else {
                    bail!("Invalid item {:?}, expected barcode=amount", item);
                };
                if i > 0 {
                    row = dashboard.add_usage_row();
                }
                dashboard.set_usage_barcode(row, barcode);
                dashboard.set_usage_amount(row, amount);
            }

            println!("{:<20} {:<10} {}", "Barcode", "Amount", "Cost");
            println!("{}", "-".repeat(45));
            for row in dashboard.usage_form().rows() {
                let cost = match row.preview_display() {
                    cost if cost.is_empty() => "-".to_string(),
                    cost => cost,
                };
                println!("{:<20} {:<10} {}", row.barcode, row.amount, cost);
            }
            println!("Estimated total: {}", dashboard.usage_form().total_display());
            println!();

            dashboard.record_usage().await?;
            print_toast(&dashboard);
        }

        Commands::Charts => {
            dashboard.refresh().await?;
            let view = dashboard.view();
            let charts = serde_json::json!({
                "distribution": view.distribution.commands(),
                "health": view.health.commands(),
            });
            println!("{}", serde_json::to_string_pretty(&charts)?);
        }

        Commands::Config { output } => write_default_config(output.as_ref())?,
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "inventory_dashboard={level},invdash={level}",
            level = logging.level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if logging.format == "json" {
        registry.with(fmt.json()).init();
    } else {
        registry.with(fmt).init();
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn print_toast<A, V>(dashboard: &Dashboard<A, V>)
where
    A: inventory_dashboard::InventoryApi,
    V: inventory_dashboard::DashboardView,
{
    if let Some(toast) = dashboard.toast() {
        println!("{}", toast.message);
    }
}

fn print_snapshot(snapshot: &DashboardSnapshot, format: &str) -> anyhow::Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    for (title, value) in snapshot.summary().cards() {
        println!("{:<24} {}", title, value);
    }
    println!();

    let mut table = TableBuffer::default();
    let mut feed = FeedBuffer::default();

    println!("Inventory");
    render_inventory(&mut table, &snapshot.items);
    print_table(&INVENTORY_COLUMNS, &table.rows);

    println!("Recent Activity");
    render_activity(&mut feed, &snapshot.movements);
    print_feed(&feed.entries);

    println!("Recent Usage");
    render_usage(&mut feed, &snapshot.recent_usage);
    print_feed(&feed.entries);

    println!("Shopping List");
    render_shopping_list(&mut table, &snapshot.shopping);
    print_table(&SHOPPING_COLUMNS, &table.rows);

    Ok(())
}

fn print_feed(entries: &[FeedEntry]) {
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in entries {
        println!("  {} - {} ({})", entry.title, entry.detail, entry.meta);
    }
    println!();
}

fn print_table(headers: &[&str], rows: &[TableRow]) {
    if rows.is_empty() {
        println!("  (none)");
        println!();
        return;
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.cells.iter().map(Cell::display).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<&str>| {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", line(headers.to_vec()));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in &cells {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
    println!();
}
