use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use datatable::{ExportFormat, SortDirection};
use erp_admin::config::Cli;
use erp_admin::{ListScreen, LoadOutcome, ModalStack, TerminalNotifier, paths, screens};
use simplelog::{Config, WriteLogger};

fn init_logging(cli: &Cli) {
    if let Err(reason) = start_file_logging(cli) {
        eprintln!("Warning: file logging disabled: {}", reason);
    }
}

fn start_file_logging(cli: &Cli) -> Result<(), String> {
    paths::rotate_logs();
    let path = paths::log_file().ok_or("no cache directory")?;
    let file = paths::open_log_file(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    WriteLogger::init(cli.settings.log_level, Config::default(), file).map_err(|e| e.to_string())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let definition = screens::by_name(cli.screen.as_str())?;
    let client = cli.settings.client()?;
    log::info!(
        "Opening {} against {}",
        definition.name(),
        client.base_url()
    );

    let screen = ListScreen::new(
        definition,
        Arc::new(client),
        Arc::new(TerminalNotifier),
        Arc::new(ModalStack::new()),
        cli.settings.screen_options(),
    )?;

    if let Some(field) = &cli.sort {
        let direction = if cli.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        screen.with_table(|table| table.set_sort_state(Some(field.as_str()), direction));
    }

    screen.set_filters(cli.filters.clone());
    if let LoadOutcome::Failed(message) = screen.load(cli.page).await {
        return Err(message.into());
    }

    match cli.export {
        Some(format) => print!("{}", screen.export(ExportFormat::from(format))?),
        None => println!("{}", screen.render()),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
