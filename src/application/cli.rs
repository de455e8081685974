use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use chrono::Local;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use super::portfolio::Portfolio;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ReasoningMode;
use crate::domain::models::StorageName;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::Settlement;
use crate::infrastructure::backends::BackendManager;

fn help_text() -> String {
    let text = r#"
HOTKEYS:
- F1 / F2 / F3 - Open the About, Projects or Chat tab
- Tab / Shift+Tab - Cycle through tabs
- Up arrow / Down arrow - Scroll
- CTRL+U / CTRL+D - Page up / page down
- CTRL+T - Toggle Deep Reasoning for the next question
- CTRL+L - Clear the chat history
- Alt+1..Alt+9 - Ask a suggested question
- CTRL+C - Exit
        "#;

    return text.trim().to_string();
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn log_path() -> path::PathBuf {
    let log_dir = env::var("DEVFOLIO_LOG_DIR").map(path::PathBuf::from).unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("devfolio");
    });

    return log_dir.join("debug.log");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn ask(question: &str, deep: bool) -> Result<()> {
    let portfolio = Portfolio::from_config().await?;
    let mut conversation = portfolio.conversation().await;
    let mode = ReasoningMode::from_deep(deep);

    let Some(prompt) = conversation.send(question, mode).await else {
        bail!("Question is empty");
    };

    let backend = BackendManager::get();
    let outcome = ActionsService::generate(&backend, prompt).await;

    match conversation.settle(outcome).await {
        Settlement::Replied(message) => {
            println!("{}", message.text);
        }
        Settlement::Failed(failure) => {
            eprintln!("{}", Paint::yellow(failure.advisory()));
        }
        Settlement::Ignored => {}
    }

    return Ok(());
}

async fn print_history() -> Result<()> {
    let portfolio = Portfolio::from_config().await?;
    let conversation = portfolio.conversation().await;

    let res = conversation
        .messages()
        .iter()
        .map(|message| {
            let mut header = format!(
                "[{}] {}",
                message.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                message.role.to_string()
            );
            if message.is_deep_reasoning() {
                header = format!("{header} (Deep Reasoning)");
            }

            return format!("{}\n{}", Paint::new(header).bold(), message.text);
        })
        .collect::<Vec<String>>();

    println!("{}", res.join("\n\n"));
    return Ok(());
}

async fn clear_history() -> Result<()> {
    let portfolio = Portfolio::from_config().await?;
    portfolio.conversation().await.clear().await;

    println!("Cleared chat history");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Devfolio")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Devfolio with environment variable RUST_LOG=devfolio")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        )
        .subcommand(
            Command::new("system-instruction").about("Print the system instruction sent with every question.")
        );
}

fn subcommand_history() -> Command {
    return Command::new("history")
        .about("Manage the persisted chat history.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("Print every message in the chat history."))
        .subcommand(Command::new("clear").about("Reset the chat history to the welcome message."))
        .subcommand(Command::new("path").about("Print the storage directory path."));
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Ask the assistant a single question, continuing the saved chat history.")
        .arg(
            Arg::new("question")
                .help("The question to ask.")
                .required(true)
                .num_args(1..),
        )
        .arg(
            Arg::new("deep")
                .long("deep")
                .help("Use Deep Reasoning for this question.")
                .action(ArgAction::SetTrue),
        );
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Open the portfolio. This is the default command.");
}

fn config_arg(key: ConfigKey, env_var: &'static str, help: String) -> Arg {
    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(env_var)
        .num_args(1)
        .help(help)
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("devfolio")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_ask())
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(subcommand_history())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("DEVFOLIO_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(config_arg(
            ConfigKey::GeminiToken,
            "DEVFOLIO_GEMINI_TOKEN",
            "Gemini API key used to answer chat questions.".to_string(),
        ))
        .arg(config_arg(
            ConfigKey::GeminiURL,
            "DEVFOLIO_GEMINI_URL",
            format!("Gemini API URL. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::GeminiURL)),
        ))
        .arg(
            config_arg(
                ConfigKey::Model,
                "DEVFOLIO_MODEL",
                format!("Model answering standard questions. [default: {}]", Config::default(ConfigKey::Model)),
            )
            .short('m'),
        )
        .arg(config_arg(
            ConfigKey::DeepModel,
            "DEVFOLIO_DEEP_MODEL",
            format!("Model answering Deep Reasoning questions. [default: {}]", Config::default(ConfigKey::DeepModel)),
        ))
        .arg(config_arg(
            ConfigKey::ThinkingBudget,
            "DEVFOLIO_THINKING_BUDGET",
            format!("Thinking token budget requested for Deep Reasoning questions. [default: {}]", Config::default(ConfigKey::ThinkingBudget)),
        ))
        .arg(config_arg(
            ConfigKey::BackendHealthCheckTimeout,
            "DEVFOLIO_BACKEND_HEALTH_CHECK_TIMEOUT",
            format!("Time to wait in milliseconds before timing out when doing a healthcheck for the backend. [default: {}]", Config::default(ConfigKey::BackendHealthCheckTimeout)),
        ))
        .arg(
            config_arg(
                ConfigKey::Storage,
                "DEVFOLIO_STORAGE",
                format!("Where the active tab and chat history are kept. [default: {}]", Config::default(ConfigKey::Storage)),
            )
            .value_parser(PossibleValuesParser::new(StorageName::VARIANTS)),
        )
        .arg(config_arg(
            ConfigKey::StorageDir,
            "DEVFOLIO_STORAGE_DIR",
            format!("Directory used by file storage. [default: {}]", Config::default(ConfigKey::StorageDir)),
        ))
        .arg(config_arg(
            ConfigKey::ProfileFile,
            "DEVFOLIO_PROFILE_FILE",
            "Path to a profile JSON file replacing the built-in profile.".to_string(),
        ))
        .arg(config_arg(
            ConfigKey::Url,
            "DEVFOLIO_URL",
            format!("Initial address. A tab query parameter opens that tab, e.g. {}?tab=chat [default: {}]", Config::default(ConfigKey::Url), Config::default(ConfigKey::Url)),
        ))
        .arg(config_arg(
            ConfigKey::Username,
            "DEVFOLIO_USERNAME",
            "Your user name displayed in the chat transcript.".to_string(),
        ))
        .arg(config_arg(
            ConfigKey::AssistantName,
            "DEVFOLIO_ASSISTANT_NAME",
            "Name displayed for assistant replies.".to_string(),
        ));
}

async fn parse_history(matches: &ArgMatches, history_matches: &ArgMatches) -> Result<()> {
    Config::load(build(), vec![matches, history_matches]).await?;

    match history_matches.subcommand() {
        Some(("list", _)) => {
            print_history().await?;
        }
        Some(("clear", _)) => {
            clear_history().await?;
        }
        Some(("path", _)) => {
            if Config::get(ConfigKey::Storage) == StorageName::File.to_string() {
                println!("{}", Config::get(ConfigKey::StorageDir));
            } else {
                println!(
                    "Chat history is not written to disk with '{}' storage",
                    Config::get(ConfigKey::Storage)
                );
            }
        }
        _ => {
            subcommand_history().print_long_help()?;
        }
    }

    return Ok(());
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_path().to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                Some(("system-instruction", subcmd_matches)) => {
                    Config::load(build(), vec![&matches, debug_matches, subcmd_matches]).await?;
                    let portfolio = Portfolio::from_config().await?;
                    println!("{}", portfolio.system_instruction);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("ask", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let question = subcmd_matches
                .get_many::<String>("question")
                .map(|words| return words.cloned().collect::<Vec<String>>().join(" "))
                .unwrap_or_default();

            ask(&question, subcmd_matches.get_flag("deep")).await?;
            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("history", subcmd_matches)) => {
            parse_history(&matches, subcmd_matches).await?;
            return Ok(false);
        }
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
