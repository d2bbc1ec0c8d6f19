//! ANS CLI - Command Line Interface
//!
//! Terminal front end for the ANS operator expense dashboard. Each command
//! drives a dashboard session against the HTTP API or a local JSON fixture.
//!
//! Key Features:
//! - Aggregate statistics and top-5 ranking
//! - Expense totals per federative unit
//! - Paginated operator search by CNPJ or name
//! - Operator profile with its expense records
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use ans_client::{ClientConfig, Gateway, HttpGateway, MemoryGateway, TopOperator};
use ans_dashboard::format::format_brl;
use ans_dashboard::{
    ApiStatus, Dashboard, DashboardConfig, HostDocument, Presented, SearchOutcome,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

// =============================================================================
// CLI Arguments
// =============================================================================

#[derive(Parser)]
#[command(name = "ans")]
#[command(author = "AutomataNexus Development Team")]
#[command(version = "0.1.0")]
#[command(about = "ANS operator expense dashboard CLI", long_about = None)]
struct Cli {
    /// API base URL [default: $ANS_API_URL, else http://localhost:8000/api]
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Serve data from a JSON fixture instead of the API
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show aggregate statistics and the top ranking
    Stats,
    /// Show expense totals per federative unit
    Regions {
        /// List every region instead of the chart projection
        #[arg(long)]
        all: bool,
    },
    /// Search operators by CNPJ or name substring
    Search {
        /// Search term (empty lists everything)
        #[arg(default_value = "")]
        term: String,
        #[arg(short, long, default_value = "1")]
        page: i64,
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },
    /// Show an operator profile and its expenses
    Operator {
        cnpj: String,
    },
}

// =============================================================================
// Terminal Host
// =============================================================================

/// Host that prints alerts to stderr; the terminal has no scroll state.
struct TerminalHost;

impl HostDocument for TerminalHost {
    fn set_scroll_lock(&self, locked: bool) {
        tracing::trace!(locked, "scroll lock");
    }

    fn scroll_to_top(&self) {}

    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let gateway: Arc<dyn Gateway> = match &cli.fixture {
        Some(path) => match MemoryGateway::from_json_file(path) {
            Ok(gateway) => Arc::new(gateway),
            Err(e) => return fail(&format!("cannot load fixture {}: {}", path.display(), e)),
        },
        None => {
            let config = match &cli.base_url {
                Some(url) => ClientConfig::new(url.as_str()),
                None => ClientConfig::from_env(),
            };
            match HttpGateway::new(config) {
                Ok(gateway) => Arc::new(gateway),
                Err(e) => return fail(&e.to_string()),
            }
        }
    };

    let page_size = match &cli.command {
        Commands::Search { limit, .. } => *limit,
        _ => DashboardConfig::default().page_size,
    };
    let config = DashboardConfig::default().with_page_size(page_size);
    let dashboard = match Dashboard::new(gateway, Arc::new(TerminalHost), config) {
        Ok(dashboard) => dashboard,
        Err(e) => return fail(&e.to_string()),
    };

    match cli.command {
        Commands::Stats => stats(&dashboard).await,
        Commands::Regions { all } => regions(&dashboard, all).await,
        Commands::Search { term, page, .. } => search(&dashboard, term, page).await,
        Commands::Operator { cnpj } => operator(&dashboard, cnpj).await,
    }
}

fn fail(message: &str) -> ExitCode {
    tracing::error!("{}", message);
    eprintln!("error: {}", message);
    ExitCode::FAILURE
}

// =============================================================================
// Commands
// =============================================================================

async fn stats(dashboard: &Dashboard) -> ExitCode {
    dashboard.load_stats().await;
    let status = dashboard.status();
    println!("API: {}", status);

    let overview = dashboard.overview();
    let Some(stats) = overview.stats else {
        return fail(overview.stats_error.as_deref().unwrap_or("statistics unavailable"));
    };

    println!("Total geral:          {}", format_brl(Some(stats.total_geral)));
    println!("Média por lançamento: {}", format_brl(Some(stats.media_por_lancamento)));
    println!();
    println!("Top {}:", overview.top_operators.len());
    for (rank, top) in overview.top_operators.iter().enumerate() {
        println!(
            "{:>2}. {:<50} {:>14} {:>20}",
            rank + 1,
            top.razao_social,
            top.cnpj,
            format_brl(Some(top.total))
        );
    }

    if status == ApiStatus::Online {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn regions(dashboard: &Dashboard, all: bool) -> ExitCode {
    if !dashboard.load_regions().await {
        let message = dashboard.overview().regions_error;
        return fail(message.as_deref().unwrap_or("region totals unavailable"));
    }
    let Some(view) = dashboard.region_view() else {
        return fail("region totals unavailable");
    };

    let rows = if all { view.listing() } else { view.chart() };
    for region in rows {
        println!("{:<4} {:>20}", region.uf, format_brl(Some(region.total)));
    }
    println!("{:<4} {:>20}", "", format_brl(Some(view.grand_total())));
    ExitCode::SUCCESS
}

async fn search(dashboard: &Dashboard, term: String, page: i64) -> ExitCode {
    let search = dashboard.search();
    search.set_term(term);
    if search.submit().await == SearchOutcome::Failed {
        let message = search.snapshot().error;
        return fail(message.as_deref().unwrap_or("search failed"));
    }

    if page != 1 {
        match search.goto_page(page).await {
            SearchOutcome::OutOfRange => {
                return fail(&format!(
                    "page {} out of range (1..={})",
                    page,
                    search.total_pages()
                ));
            }
            SearchOutcome::Failed => {
                let message = search.snapshot().error;
                return fail(message.as_deref().unwrap_or("search failed"));
            }
            _ => {}
        }
    }

    let Some(result) = search.current_page() else {
        return fail("no result page");
    };
    if result.items.is_empty() {
        println!("Nenhum resultado.");
        return ExitCode::SUCCESS;
    }

    for op in &result.items {
        println!(
            "{:>8} {:>14} {:<4} {:<30} {}",
            op.registro_ans, op.cnpj, op.uf, op.modalidade, op.razao_social
        );
    }
    println!(
        "Página {} de {} ({} registros)",
        result.page,
        result.total_pages(),
        result.total
    );
    ExitCode::SUCCESS
}

async fn operator(dashboard: &Dashboard, cnpj: String) -> ExitCode {
    // Prefer opening from a search row, like the listing does.
    let search = dashboard.search();
    search.set_term(cnpj.clone());
    search.submit().await;
    let row = search
        .current_page()
        .and_then(|page| page.items.iter().find(|op| op.cnpj == cnpj).cloned());

    let outcome = match row {
        Some(op) => dashboard.open_detail(op).await,
        None => {
            dashboard
                .open_detail(TopOperator {
                    razao_social: String::new(),
                    cnpj: cnpj.clone(),
                    total: 0.0,
                })
                .await
        }
    };

    let modal = dashboard.modal();
    let profile = match modal.presented.as_ref().and_then(Presented::profile) {
        Some(profile) => profile.clone(),
        None => {
            dashboard.close_detail();
            return fail(modal.error.as_deref().unwrap_or("operator not found"));
        }
    };

    println!("Razão social: {}", profile.razao_social);
    println!("Registro ANS: {}", profile.registro_ans);
    println!("CNPJ:         {}", profile.cnpj);
    println!("Modalidade:   {}", profile.modalidade);
    println!("UF:           {}", profile.uf);
    for (key, value) in &profile.extra {
        println!("{:<13} {}", format!("{}:", key), value);
    }
    println!();

    let entry = outcome.expenses.entry;
    if entry.is_failed() {
        println!("Despesas indisponíveis.");
    } else if entry.is_empty() {
        println!("Nenhuma despesa registrada.");
    } else {
        for record in entry.records() {
            println!(
                "{} {:<4} {:>20}",
                record.ano,
                record.trimestre,
                format_brl(Some(record.valor_despesas))
            );
        }
        println!("Total      {:>20}", format_brl(Some(entry.total())));
    }

    dashboard.close_detail();
    ExitCode::SUCCESS
}
