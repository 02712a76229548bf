use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Password;
use dialoguer::Select;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::application::ui;
use crate::application::ui::UiExit;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ApiArc;
use crate::domain::models::CreateSessionRequest;
use crate::domain::models::LoginRequest;
use crate::domain::models::RegisterRequest;
use crate::domain::models::StudySession;
use crate::domain::models::MEETING_TYPES;
use crate::domain::services::CredentialStore;
use crate::domain::services::Credentials;
use crate::infrastructure::api::ApiManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn format_session(session: &StudySession) -> String {
    let mut res = format!(
        "{} [{}] {} {} at {}, {} ({})",
        session.title,
        session.course_code,
        session.capacity_label(),
        session.date,
        session.time,
        session.meeting_type_label(),
        session.location,
    );

    if session.is_full {
        res = format!("{res} FULL");
    }

    return res;
}

/// Loads stored credentials and publishes them into the config store.
/// Returns false when nobody is signed in.
async fn publish_credentials() -> Result<bool> {
    let store = CredentialStore::default();
    if let Some(credentials) = store.load().await? {
        credentials.publish();
        return Ok(true);
    }

    return Ok(false);
}

async fn signed_in_api() -> Result<ApiArc> {
    if !publish_credentials().await? {
        bail!("You are not logged in. Run 'studyhall login' first.");
    }

    return Ok(ApiManager::get());
}

async fn login() -> Result<()> {
    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;
    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    let request = LoginRequest { email, password };
    request.validate()?;

    let api = ApiManager::get();
    let auth = api.login(&request).await?;

    let credentials = Credentials::from_auth(&auth);
    CredentialStore::default().save(&credentials).await?;
    credentials.publish();

    println!(
        "{}",
        Paint::green(format!("Logged in as {}.", credentials.display_name()))
    );
    return Ok(());
}

async fn register() -> Result<()> {
    let theme = ColorfulTheme::default();
    let first_name: String = Input::with_theme(&theme)
        .with_prompt("First name")
        .interact_text()?;
    let last_name: String = Input::with_theme(&theme)
        .with_prompt("Last name")
        .interact_text()?;
    let school: String = Input::with_theme(&theme)
        .with_prompt("School")
        .interact_text()?;
    let email: String = Input::with_theme(&theme)
        .with_prompt("Email")
        .interact_text()?;
    let password: String = Password::with_theme(&theme)
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let request = RegisterRequest {
        first_name,
        last_name,
        email,
        password,
        school,
    };
    request.validate()?;

    let api = ApiManager::get();
    let mut auth = api.register(&request).await?;

    // Register responses may skip the profile, fill it from the form.
    if auth.id.is_empty() {
        auth.email = request.email.to_string();
        auth.first_name = request.first_name.to_string();
        auth.last_name = request.last_name.to_string();
        auth.school = request.school.to_string();
    }

    let credentials = Credentials::from_auth(&auth);
    CredentialStore::default().save(&credentials).await?;
    credentials.publish();

    println!(
        "{}",
        Paint::green(format!(
            "Account created. Welcome, {}!",
            credentials.display_name()
        ))
    );
    return Ok(());
}

async fn logout() -> Result<()> {
    CredentialStore::default().clear().await?;
    println!("Logged out.");
    return Ok(());
}

async fn print_sessions_list(mine: bool) -> Result<()> {
    let sessions = if mine {
        signed_in_api().await?.list_my_sessions().await?
    } else {
        publish_credentials().await?;
        ApiManager::get().list_sessions().await?
    };

    if sessions.is_empty() {
        if mine {
            println!("You haven't joined any study sessions yet.");
        } else {
            println!("No study sessions available yet. You could create the first one!");
        }
        return Ok(());
    }

    let lines = sessions
        .iter()
        .map(|session| {
            return format!("- (ID: {}) {}", session.id, format_session(session));
        })
        .collect::<Vec<String>>();

    println!("{}", lines.join("\n"));
    return Ok(());
}

fn prompt_create_session() -> Result<CreateSessionRequest> {
    let theme = ColorfulTheme::default();
    let title: String = Input::with_theme(&theme)
        .with_prompt("Title")
        .interact_text()?;
    let course_code: String = Input::with_theme(&theme)
        .with_prompt("Course code")
        .interact_text()?;
    let description: String = Input::with_theme(&theme)
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;
    let date: String = Input::with_theme(&theme)
        .with_prompt("Date (YYYY-MM-DD)")
        .interact_text()?;
    let time: String = Input::with_theme(&theme)
        .with_prompt("Time (HH:MM)")
        .interact_text()?;
    let location: String = Input::with_theme(&theme)
        .with_prompt("Location")
        .interact_text()?;
    let meeting_type_idx = Select::with_theme(&theme)
        .with_prompt("Meeting type")
        .default(0)
        .items(&MEETING_TYPES)
        .interact()?;
    let max_capacity: i64 = Input::with_theme(&theme)
        .with_prompt("Max capacity")
        .interact_text()?;

    let request = CreateSessionRequest {
        title,
        course_code,
        description,
        date,
        time,
        location,
        meeting_type: MEETING_TYPES[meeting_type_idx].to_string(),
        max_capacity,
    };
    request.validate()?;

    return Ok(request);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

async fn chat() -> Result<()> {
    let api = signed_in_api().await?;
    api.health_check().await?;

    loop {
        let sessions = api.list_my_sessions().await?;
        if sessions.is_empty() {
            println!("You haven't joined any study sessions yet. Join one with 'studyhall sessions join'.");
            return Ok(());
        }

        let session_options = sessions
            .iter()
            .map(|session| {
                return format_session(session);
            })
            .collect::<Vec<String>>();

        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Which session's chat would you like to open?")
            .default(0)
            .items(&session_options)
            .interact_opt()?;

        let idx = match choice {
            Some(idx) => idx,
            None => return Ok(()),
        };

        match ui::start(api.clone(), sessions[idx].clone()).await? {
            UiExit::CloseChat => continue,
            UiExit::Quit => return Ok(()),
        }
    }
}

fn arg_server_url() -> Arg {
    return Arg::new(ConfigKey::ServerURL.to_string())
        .long(ConfigKey::ServerURL.to_string())
        .env("STUDYHALL_SERVER_URL")
        .num_args(1)
        .help(format!(
            "URL of the study session server. [default: {}]",
            Config::default(ConfigKey::ServerURL)
        ))
        .global(true);
}

fn arg_poll_interval() -> Arg {
    return Arg::new(ConfigKey::PollInterval.to_string())
        .long(ConfigKey::PollInterval.to_string())
        .env("STUDYHALL_POLL_INTERVAL")
        .num_args(1)
        .help(format!(
            "Time in milliseconds between chat refreshes while a chat is open. [default: {}]",
            Config::default(ConfigKey::PollInterval)
        ))
        .global(true);
}

fn arg_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::HealthCheckTimeout.to_string())
        .long(ConfigKey::HealthCheckTimeout.to_string())
        .env("STUDYHALL_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out when checking the server is reachable. [default: {}]",
            Config::default(ConfigKey::HealthCheckTimeout)
        ))
        .global(true);
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            Arg::new("shell")
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

fn subcommand_sessions() -> Command {
    return Command::new("sessions")
        .about("Browse and manage study sessions.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List every study session on the server."))
        .subcommand(Command::new("mine").about("List the sessions you created or joined."))
        .subcommand(Command::new("create").about("Create a new study session."))
        .subcommand(
            Command::new("join")
                .about("Join a study session by ID.")
                .arg(Arg::new("session-id").help("Session ID").required(true)),
        )
        .subcommand(
            Command::new("leave")
                .about("Leave a study session by ID.")
                .arg(Arg::new("session-id").help("Session ID").required(true)),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a study session you created.")
                .arg(Arg::new("session-id").help("Session ID").required(true)),
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("studyhall")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Open the group chat for one of your sessions."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(Command::new("login").about("Log in to the study session server."))
        .subcommand(Command::new("logout").about("Log out and forget stored credentials."))
        .subcommand(Command::new("register").about("Create a new account."))
        .subcommand(subcommand_sessions())
        .arg(arg_server_url())
        .arg(arg_poll_interval())
        .arg(arg_health_check_timeout())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("STUDYHALL_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        );
}

pub async fn parse() -> Result<()> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
            }
            _ => {
                subcommand_config().print_long_help()?;
            }
        },
        Some(("login", _)) => {
            Config::load(vec![&matches]).await?;
            login().await?;
        }
        Some(("logout", _)) => {
            logout().await?;
        }
        Some(("register", _)) => {
            Config::load(vec![&matches]).await?;
            register().await?;
        }
        Some(("sessions", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("list", _)) => {
                    print_sessions_list(false).await?;
                }
                Some(("mine", _)) => {
                    print_sessions_list(true).await?;
                }
                Some(("create", _)) => {
                    let api = signed_in_api().await?;
                    let request = prompt_create_session()?;
                    let session = api.create_session(&request).await?;
                    println!(
                        "{}",
                        Paint::green(format!(
                            "Created session {} ({})",
                            session.title, session.id
                        ))
                    );
                }
                Some(("join", join_matches)) => {
                    let session_id = join_matches.get_one::<String>("session-id").unwrap();
                    signed_in_api().await?.join_session(session_id).await?;
                    println!("{}", Paint::green("Successfully joined the session!"));
                }
                Some(("leave", leave_matches)) => {
                    let session_id = leave_matches.get_one::<String>("session-id").unwrap();
                    signed_in_api().await?.leave_session(session_id).await?;
                    println!("Left session {session_id}");
                }
                Some(("delete", delete_matches)) => {
                    let session_id = delete_matches.get_one::<String>("session-id").unwrap();
                    signed_in_api().await?.delete_session(session_id).await?;
                    println!("Deleted session {session_id}");
                }
                _ => {
                    subcommand_sessions().print_long_help()?;
                }
            }
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            chat().await?;
        }
        _ => {
            Config::load(vec![&matches]).await?;
            chat().await?;
        }
    }

    return Ok(());
}
