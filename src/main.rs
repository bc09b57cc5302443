use color_eyre::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use musicboxd::app::App;
use musicboxd::cli::{parse_args, parse_line, CliCommand, ShellCommand, SHELL_HELP, USAGE, VERSION};
use musicboxd::config::ClientConfig;
use musicboxd::render::{render_app, render_notification};

/// Log to stderr so the shell output on stdout stays clean.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

async fn print_screen(app: &App) {
    let session = app.current_session().await;
    println!("{}", render_app(app, &session));
}

fn print_notifications(app: &mut App) {
    for notification in app.notifier.take_unseen() {
        println!("{}", render_notification(&notification));
    }
    app.notifier.prune(chrono::Utc::now());
}

async fn run_shell(app: &mut App) -> Result<()> {
    print_notifications(app);
    print_screen(app).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            Ok(ShellCommand::Empty) => {}
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => println!("{}", SHELL_HELP),
            Ok(ShellCommand::Show) => print_screen(app).await,
            Ok(ShellCommand::Action(action)) => {
                app.dispatch(action).await;
                print_notifications(app);
                print_screen(app).await;
            }
            Err(message) => eprintln!("{}", message),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let api_url = match parse_args(std::env::args()) {
        Ok(CliCommand::Version) => {
            println!("musicboxd {}", VERSION);
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(CliCommand::RunShell { api_url }) => api_url,
        Err(message) => {
            eprintln!("musicboxd: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
    };

    init_logging();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = api_url {
        config = config.with_api_base_url(url);
        config.validate()?;
    }
    tracing::debug!(api = %config.api_base_url, "Starting");

    let mut app = App::new(&config)?;
    app.initialize().await;
    run_shell(&mut app).await
}
