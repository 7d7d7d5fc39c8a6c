mod command;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use command::Command;
use config::{AppConfig, ConfigStore};
use core_orchestrator::Orchestrator;
use core_types::{FormError, FormEvent, FormState, UiLanguage};
use i18n::I18n;
use provider_google::{GoogleBackendOptions, GoogleTranslateBackend};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polyglot")]
#[command(version)]
#[command(about = "Translate text between languages from an interactive terminal form")]
struct Cli {
    /// Config file to use instead of the platform config directory
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Interface language, overrides the config file
    #[arg(long, value_enum)]
    ui_language: Option<UiLanguageArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UiLanguageArg {
    EnUs,
    ZhCn,
}

impl From<UiLanguageArg> for UiLanguage {
    fn from(arg: UiLanguageArg) -> Self {
        match arg {
            UiLanguageArg::EnUs => UiLanguage::EnUs,
            UiLanguageArg::ZhCn => UiLanguage::ZhCn,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    data_dir.push("polyglot");
    let log_dir = cli.log_dir.clone().unwrap_or_else(|| data_dir.join("logs"));
    let _log_guard = init_local_logger(&log_dir);

    let config = load_config(cli.config.as_deref());
    let i18n = I18n::new(cli.ui_language.map(Into::into).unwrap_or(config.ui_language));

    let backend = match GoogleTranslateBackend::with_options(GoogleBackendOptions {
        base_url: config.backend.base_url.clone(),
        user_agent: config.backend.user_agent.clone(),
        timeout: config.backend.timeout(),
    }) {
        Ok(backend) => backend,
        Err(err) => {
            error!("failed to create translation backend: {err:#}");
            eprintln!("{}", i18n.t_with("error.prefix", &format!("{err:#}")));
            return ExitCode::FAILURE;
        }
    };

    let orchestrator = match Orchestrator::bootstrap(Arc::new(backend)).await {
        Ok(orchestrator) => orchestrator
            .with_default_target(config.default_target.clone())
            .with_swap_fallback(config.swap_fallback.clone()),
        Err(err) => {
            error!("failed to build language catalog: {err}");
            report(&err, &i18n);
            return ExitCode::FAILURE;
        }
    };

    match run_form(&orchestrator, &i18n).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("form session aborted: {err:#}");
            eprintln!("{}", i18n.t_with("error.prefix", &format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> AppConfig {
    let store = match path {
        Some(path) => ConfigStore::from_file(path),
        None => match ConfigStore::from_default_location() {
            Ok(store) => store,
            Err(err) => {
                error!("failed to locate config: {err:#}");
                return AppConfig::default();
            }
        },
    };
    match store.load_or_init() {
        Ok(config) => {
            info!(path = %store.path().display(), "config loaded");
            config
        }
        Err(err) => {
            error!("failed to load config: {err:#}");
            AppConfig::default()
        }
    }
}

async fn run_form(orchestrator: &Orchestrator, i18n: &I18n) -> Result<()> {
    let mut state = orchestrator.new_session();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", i18n.t("app.title"));
    println!("{}", i18n.t("app.caption"));
    println!("{}", i18n.t("help.commands"));
    render(&state, i18n);

    loop {
        print!("> ");
        std::io::stdout().flush().context("failed to flush stdout")?;
        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };

        let event = match command::parse(&line) {
            Command::Quit => break,
            Command::Help => {
                println!("{}", i18n.t("help.commands"));
                continue;
            }
            Command::Show => {
                render(&state, i18n);
                continue;
            }
            Command::Languages(filter) => {
                list_languages(orchestrator, filter.as_deref());
                continue;
            }
            Command::Unknown(_) => {
                println!("{}", i18n.t("help.commands"));
                continue;
            }
            Command::Translate => {
                translate(orchestrator, &mut state, i18n).await;
                continue;
            }
            Command::From(query) => FormEvent::SelectSource(query),
            Command::To(query) => FormEvent::SelectTarget(query),
            Command::Swap => FormEvent::Swap,
            Command::Clear => FormEvent::EditInput(String::new()),
            Command::Text(text) => {
                let mut input = state.input_text.clone();
                if !input.is_empty() {
                    input.push('\n');
                }
                input.push_str(&text);
                FormEvent::EditInput(input)
            }
        };

        let is_edit = matches!(event, FormEvent::EditInput(_));
        let is_swap = matches!(event, FormEvent::Swap);
        match orchestrator.dispatch(&mut state, event).await {
            Ok(_) if is_edit => {}
            Ok(_) if is_swap => {
                println!("{}", i18n.t("status.swapped"));
                render(&state, i18n);
            }
            Ok(_) => render_languages(&state, i18n),
            Err(err) => report(&err, i18n),
        }
    }

    info!(session = %state.session_id, "form session closed");
    Ok(())
}

/// Validating, pending indicator, call, commit; the output area is only
/// replaced when the backend succeeds.
async fn translate(orchestrator: &Orchestrator, state: &mut FormState, i18n: &I18n) {
    let job = match orchestrator.prepare(state) {
        Ok(job) => job,
        Err(err) => return report(&err, i18n),
    };
    println!("{}", i18n.t_with("status.pending", job.target.name()));
    match orchestrator.execute(&job).await {
        Ok(translated) => {
            orchestrator.apply(state, &translated);
            render_output(state, i18n);
        }
        Err(err) => report(&err, i18n),
    }
}

fn report(err: &FormError, i18n: &I18n) {
    let message = match err {
        FormError::EmptyInput => i18n.t("warn.empty_input").to_string(),
        FormError::UnknownLanguage(name) => i18n.t_with("warn.unknown_language", name),
        FormError::AutoDetectTarget => i18n.t("warn.auto_target").to_string(),
        FormError::TranslationFailed(detail) => i18n.t_with("error.prefix", detail),
        FormError::CatalogUnavailable(detail) => i18n.t_with("error.catalog", detail),
    };
    if err.is_warning() {
        println!("{message}");
    } else {
        eprintln!("{message}");
    }
}

fn render(state: &FormState, i18n: &I18n) {
    render_languages(state, i18n);
    println!("{}:", i18n.t("form.input"));
    print_block(&state.input_text);
    render_output(state, i18n);
}

fn render_languages(state: &FormState, i18n: &I18n) {
    println!(
        "{}: {}  <->  {}: {}",
        i18n.t("form.source"),
        state.source.label(),
        i18n.t("form.target"),
        state.target.name()
    );
}

fn render_output(state: &FormState, i18n: &I18n) {
    // hidden until something has been translated
    if state.output_text.is_empty() {
        return;
    }
    println!("{}:", i18n.t("form.output"));
    print_block(&state.output_text);
}

fn print_block(text: &str) {
    for line in text.lines() {
        println!("  | {line}");
    }
}

fn list_languages(orchestrator: &Orchestrator, filter: Option<&str>) {
    let filter = filter.map(str::to_lowercase);
    for (name, code) in orchestrator.catalog().entries() {
        let matches = filter
            .as_deref()
            .is_none_or(|f| name.to_lowercase().contains(f) || code.to_lowercase().contains(f));
        if matches {
            println!("  {name:<24} {code}");
        }
    }
}

fn init_local_logger(log_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    if let Err(err) = fs::create_dir_all(log_dir) {
        eprintln!("failed to create log dir `{}`: {err}", log_dir.display());
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, "polyglot.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,app_terminal=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_writer(writer)
        .init();

    guard
}
