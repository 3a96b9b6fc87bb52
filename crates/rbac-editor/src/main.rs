mod app;
mod event;
mod theme;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use app::App;
use clap::{Parser, Subcommand};
use ratatui::DefaultTerminal;
use tracing::info;

use rbac_client::HttpRoleRepository;
use rbac_core::services::{RoleService, SessionOptions};
use rbac_core::{default_template, MenuForestDto};
use rbac_shared::config::AppConfig;
use rbac_shared::telemetry::{init_file_telemetry, init_telemetry};
use rbac_shared::utils::truncate;
use rbac_shared::Pagination;

#[derive(Parser)]
#[command(name = "rbac-editor")]
#[command(about = "Terminal editor for role menus and permissions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Extra config file layered over config/default and config/{APP_ENV}
    #[arg(short, long, env = "RBAC_CONFIG")]
    config: Option<PathBuf>,

    /// Override api.base_url
    #[arg(long, env = "RBAC_API_URL")]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (Terminal User Interface) - Default
    Edit,
    /// Print roles as a table
    List {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Print the default menu template as JSON
    Template,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    color_eyre::install().ok();
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    match cli.command.unwrap_or(Commands::Edit) {
        Commands::Edit => {
            // The terminal belongs to the TUI, so logs go to a file
            let _guard = init_file_telemetry(&config.log)?;
            start_tui(config).await?
        }
        Commands::List { query, page } => {
            init_telemetry(&config.log)?;
            handle_list(&config, &query, page).await?
        }
        Commands::Template => handle_template()?,
    }

    Ok(())
}

fn build_service(config: &AppConfig) -> anyhow::Result<(Arc<HttpRoleRepository>, SessionOptions)> {
    let repo = Arc::new(HttpRoleRepository::new(&config.api)?);
    let options = SessionOptions::from_settings(&config.editor)?;
    Ok((repo, options))
}

async fn handle_list(config: &AppConfig, query: &str, page: u32) -> anyhow::Result<()> {
    let (repo, options) = build_service(config)?;
    let service = RoleService::new(repo, options);
    let roles = service
        .list_roles(query, Pagination::new(page, config.editor.page_size))
        .await?;

    println!("{:<26} {:<32} {:>6}", "ID", "NAME", "MENUS");
    for role in &roles.items {
        println!(
            "{:<26} {:<32} {:>6}",
            truncate(&role.id, 26),
            truncate(&role.name, 32),
            role.menu.items.len()
        );
    }
    println!(
        "Page {}/{} ({} roles)",
        roles.page, roles.total_pages, roles.total
    );
    Ok(())
}

fn handle_template() -> anyhow::Result<()> {
    let dto = MenuForestDto::from(&default_template());
    println!("{}", serde_json::to_string_pretty(&dto)?);
    Ok(())
}

async fn start_tui(config: AppConfig) -> anyhow::Result<()> {
    let (repo, options) = build_service(&config)?;
    info!(api = %config.api.base_url, "Starting rbac-editor");

    // Initialize terminal (ratatui::init handles raw mode + alternate screen)
    let terminal = ratatui::init();

    // Run app
    let result = run_app(terminal, App::new(repo, options, config.editor.page_size)).await;

    // Restore terminal (always, even on error)
    ratatui::restore();

    result
}

async fn run_app(mut terminal: DefaultTerminal, mut app: App<HttpRoleRepository>) -> anyhow::Result<()> {
    app.load_roles().await;

    loop {
        // Draw
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Check quit flag
        if app.should_quit {
            break;
        }

        // Poll events (non-blocking with 100ms timeout)
        if let Some(evt) = event::poll_event(100)? {
            event::handle_event(&mut app, evt).await?;
        }
    }

    info!("rbac-editor closed");
    Ok(())
}
