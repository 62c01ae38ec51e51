use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

use insurance_bot::application::errors::BotError;
use insurance_bot::application::messaging::MessageDispatcher;
use insurance_bot::application::services::{CarCommander, MessageService};
use insurance_bot::domain::traits::Bot;
use insurance_bot::infrastructure::adapters::{ConsoleAdapter, TelegramAdapter};
use insurance_bot::infrastructure::config::Config;
use insurance_bot::infrastructure::storage::MemoryCarStore;

#[derive(Parser)]
#[command(name = "insurance-bot")]
#[command(about = "Telegram bot for browsing and editing insurance car records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Version => {
            println!("insurance-bot v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::InitConfig => init_config(),
    }
}

/// Config file when present, environment defaults otherwise. A broken file is an error.
fn load_config(config_path: &str) -> Result<Config, BotError> {
    if std::path::Path::new(config_path).exists() {
        Ok(Config::load(config_path)?)
    } else {
        tracing::info!("{} not found, using defaults", config_path);
        Ok(Config::load_env())
    }
}

fn build_dispatcher(config: &Config) -> MessageDispatcher {
    let store = Arc::new(MemoryCarStore::with_titles(config.insurance.seed.iter().cloned()));
    tracing::info!("Seeded car store with {} records", config.insurance.seed.len());

    let cars = CarCommander::new(store).with_page_size(config.insurance.default_page_size);
    MessageDispatcher::new(&config.bot.prefix).with_service(cars.into_service())
}

fn run_bot(config_path: &str, token_override: Option<String>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Starting {}", config.bot.name);

    let dispatcher = build_dispatcher(&config);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start tokio runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(token) = token_override.or_else(|| config.telegram_token()) {
        let timeout = config.poll_timeout();
        rt.block_on(async {
            let mut bot = TelegramAdapter::new(token);

            // Fetch bot info
            if let Err(e) = bot.fetch_bot_info().await {
                tracing::error!("Failed to fetch bot info: {}", e);
                return ExitCode::FAILURE;
            }

            // Register bot commands with Telegram
            if let Err(e) = bot.register_commands(&dispatcher.command_menu()).await {
                tracing::warn!("Failed to register commands: {}", e);
            }

            run_telegram_bot(MessageService::new(bot, dispatcher), timeout).await;
            ExitCode::SUCCESS
        })
    } else if config.console_enabled() {
        // Run console bot (dev mode)
        rt.block_on(async {
            run_console_bot(MessageService::new(ConsoleAdapter::new(), dispatcher)).await;
            ExitCode::SUCCESS
        })
    } else {
        tracing::error!("No adapter enabled: set a Telegram token or enable the console");
        ExitCode::FAILURE
    }
}

async fn run_telegram_bot(service: MessageService<TelegramAdapter>, timeout_seconds: i64) {
    if let Err(e) = service.bot().start().await {
        tracing::error!("Failed to start bot: {}", e);
        return;
    }

    let info = service.bot().bot_info();
    tracing::info!("Bot started: @{}", info.username);

    let mut offset: i64 = 0;

    tracing::info!("Starting message loop...");

    loop {
        match service.bot().get_updates(offset, timeout_seconds).await {
            Ok(updates) => {
                if !updates.is_empty() {
                    tracing::info!("Received {} updates", updates.len());
                }
                if let Some(next) = TelegramAdapter::get_next_offset(&updates) {
                    offset = next;
                }
                for update in &updates {
                    let Some(message) = TelegramAdapter::to_message(update, service.dispatcher().parser()) else {
                        tracing::debug!("Skipping update {}", update.update_id);
                        continue;
                    };
                    if let Err(e) = service.process(message).await {
                        tracing::error!("Failed to handle update {}: {}", update.update_id, e);
                    }
                }
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            }
        }
    }
}

async fn run_console_bot(service: MessageService<ConsoleAdapter>) {
    if let Err(e) = service.bot().start().await {
        tracing::error!("Failed to start bot: {}", e);
        return;
    }

    let info = service.bot().bot_info();
    tracing::info!("Bot started: @{}", info.username);

    let mut presses: u64 = 0;

    // Main loop (for console mode)
    loop {
        let input = match service.bot().read_line(">").await {
            Ok(Some(input)) => input,
            Ok(None) => {
                tracing::info!("stdin closed, stopping");
                return;
            }
            Err(e) => {
                tracing::error!("{}", e);
                return;
            }
        };

        if input.is_empty() {
            continue;
        }

        presses += 1;
        let message = ConsoleAdapter::to_message(&input, service.dispatcher().parser(), presses);
        if let Err(e) = service.process(message).await {
            tracing::error!("Failed to handle input: {}", e);
        }
    }
}

fn init_config() -> ExitCode {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
