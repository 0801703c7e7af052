use clap::{Parser, Subcommand};
use std::sync::Arc;

use whisperline::application::errors::ClientError;
use whisperline::application::messaging::CommandDispatcher;
use whisperline::application::services::{ChatSession, WhisperStore};
use whisperline::domain::traits::{Notifier, SystemClock};
use whisperline::infrastructure::adapters::console::{self, ConsoleNotifier};
use whisperline::infrastructure::config::Config;
use whisperline::infrastructure::transport::{HttpChannel, LiveBinding, LiveChannel, LocalChannel, TransportGateway};
use whisperline::ClientContext;

#[derive(Parser)]
#[command(name = "whisperline")]
#[command(about = "Slash commands and whispers for chat rooms", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Username (overrides config)
    #[arg(short, long)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a console chat session
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
    /// Print the whisper history with a user
    History { user: String },
    /// List everyone you have whispered with
    Contacts,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => load_config(&cli.config, cli.user).and_then(run_client),
        Commands::Version => {
            println!("whisperline v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
        Commands::History { user } => load_config(&cli.config, cli.user).and_then(|config| {
            let store = open_store(&config)?;
            console::print_history(&store, &config.user().username, &user);
            Ok(())
        }),
        Commands::Contacts => load_config(&cli.config, cli.user).and_then(|config| {
            let store = open_store(&config)?;
            console::print_contacts(&store, &config.user().username);
            Ok(())
        }),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(path: &str, user_override: Option<String>) -> Result<Config, ClientError> {
    let mut config = Config::load_or_default(path)?;
    if let Some(user) = user_override {
        config.client.username = user;
        config.validate()?;
    }
    Ok(config)
}

fn open_store(config: &Config) -> Result<WhisperStore, ClientError> {
    let backend = config.history_backend()?;
    Ok(WhisperStore::open(backend, config.whisper.history_size))
}

fn build_gateway(config: &Config, live: LiveBinding, notifier: Arc<dyn Notifier>) -> TransportGateway {
    let mut gateway = TransportGateway::new(LocalChannel::new(notifier.clone())).with_channel(LiveChannel::new(live));

    if let Some((base_url, token)) = config.http_endpoint() {
        tracing::info!("HTTP transport enabled: {}", base_url);
        gateway = gateway.with_channel(HttpChannel::new(base_url, token, notifier));
    }
    gateway
}

fn run_client(config: Config) -> Result<(), ClientError> {
    let user = config.user();
    tracing::info!("Starting whisperline as {} in #{}", user, config.client.room);

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    // Nothing binds the live channel in console mode.
    let gateway = build_gateway(&config, LiveBinding::new(), notifier.clone());
    tracing::info!("Transport chain: {:?}", gateway.channel_names());

    let client = ClientContext::new(Arc::new(user), Arc::new(SystemClock), notifier, gateway, config.client.room.clone());
    let session = ChatSession::new(client, CommandDispatcher::new(config.cooldown()), open_store(&config)?);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(console::run(session))?;
    Ok(())
}

fn init_config() -> Result<(), ClientError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
