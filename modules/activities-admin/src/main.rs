//! Activity admin CLI.
//!
//! Drives the admin activity panel against a live activities API: list and
//! render the collection, create, edit and delete activities, and manage
//! enrollments.

use std::path::PathBuf;
use std::process::ExitCode;

use activities_client::ActivitiesClient;
use activities_panel::{
    render_page, CreateForm, MessageKind, MessageTarget, Panel, PanelEvent, PanelState,
};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::AdminConfig;
use terminal::TerminalInteraction;

#[derive(Parser)]
#[command(name = "activities-admin")]
#[command(about = "Manage school activities through the admin API")]
#[command(version)]
struct Cli {
    /// Base URL of the activities API (overrides ACTIVITIES_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List activities with enrollment and remaining spots
    List,

    /// Render the admin page as HTML
    Render {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Create a new activity
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        schedule: String,
        /// Sent as typed; the server rejects values that are not integers
        #[arg(long)]
        max_participants: String,
    },

    /// Edit an activity. Fields not given keep their current values
    Edit {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        schedule: Option<String>,
        #[arg(long)]
        max_participants: Option<String>,
    },

    /// Delete an activity and all of its participants
    Delete {
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Sign a participant up for an activity
    Signup { name: String, email: String },

    /// Remove a participant from an activity
    Unregister { name: String, email: String },
}

type AdminPanel = Panel<ActivitiesClient, TerminalInteraction>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("activities=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AdminConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    match run(cli.command, &config).await {
        Ok(code) => Ok(code),
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(command: Command, config: &AdminConfig) -> Result<ExitCode> {
    match command {
        Command::List => {
            let panel = open_panel(config, false).await?;
            print_list(panel.state());
            Ok(ExitCode::SUCCESS)
        }
        Command::Render { out } => {
            let panel = open_panel(config, false).await?;
            let html = render_page(panel.state());
            match out {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "Rendered admin page");
                }
                None => println!("{html}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Create {
            name,
            description,
            schedule,
            max_participants,
        } => {
            let mut panel = open_panel(config, false).await?;
            let form = CreateForm {
                name,
                description,
                schedule,
                max_participants,
            };
            panel.dispatch(PanelEvent::CreateFormChanged(form)).await;
            panel.dispatch(PanelEvent::CreateSubmitted).await;
            Ok(exit_for(panel.state().message(&MessageTarget::Create).map(|m| m.kind)))
        }
        Command::Edit {
            name,
            description,
            schedule,
            max_participants,
        } => {
            let mut panel = open_panel(config, false).await?;
            let Some(card) = panel.state().card(&name) else {
                bail!("no activity named {name:?}");
            };
            let mut form = card.form.clone();
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(schedule) = schedule {
                form.schedule = schedule;
            }
            if let Some(max) = max_participants {
                form.max_participants = max;
            }

            panel.dispatch(PanelEvent::ToggleEdit(name.clone())).await;
            panel
                .dispatch(PanelEvent::EditFormChanged {
                    name: name.clone(),
                    form,
                })
                .await;
            panel.dispatch(PanelEvent::EditSubmitted(name.clone())).await;

            // A successful save rebuilds the card, which clears its message.
            let kind = panel
                .state()
                .card(&name)
                .and_then(|c| c.message.as_ref())
                .map(|m| m.kind);
            Ok(exit_for(kind))
        }
        Command::Delete { name, yes } => {
            let mut panel = open_panel(config, yes).await?;
            panel.dispatch(PanelEvent::DeleteRequested(name.clone())).await;

            if panel.interaction().declined() {
                println!("Delete cancelled");
                return Ok(ExitCode::SUCCESS);
            }
            if panel.state().delete_error.is_some() {
                return Ok(ExitCode::FAILURE);
            }
            print_list(panel.state());
            Ok(ExitCode::SUCCESS)
        }
        Command::Signup { name, email } => {
            let client = build_client(config)?;
            let resp = client.signup(&name, &email).await?;
            println!("{}", style(resp.message).green());
            Ok(ExitCode::SUCCESS)
        }
        Command::Unregister { name, email } => {
            let client = build_client(config)?;
            let resp = client.unregister(&name, &email).await?;
            println!("{}", style(resp.message).green());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_client(config: &AdminConfig) -> Result<ActivitiesClient> {
    let client = match config.http_timeout {
        Some(timeout) => ActivitiesClient::with_timeout(&config.api_url, timeout),
        None => ActivitiesClient::new(&config.api_url),
    };
    client.with_context(|| format!("invalid API URL {}", config.api_url))
}

/// Build the panel and run the initial load.
async fn open_panel(config: &AdminConfig, assume_yes: bool) -> Result<AdminPanel> {
    let client = build_client(config)?;
    let mut panel = Panel::new(client, TerminalInteraction::new(assume_yes))
        .with_hide_after(config.message_hide);
    panel.load().await;

    if let Some(error) = &panel.state().load_error {
        bail!("{error} ({})", config.api_url);
    }
    Ok(panel)
}

fn exit_for(kind: Option<MessageKind>) -> ExitCode {
    match kind {
        Some(MessageKind::Error) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

fn print_list(state: &PanelState) {
    if state.cards.is_empty() {
        println!("No activities available.");
        return;
    }

    for card in &state.cards {
        let activity = &card.activity;
        println!(
            "{}  {}",
            style(&activity.name).bold(),
            style(&activity.schedule).dim()
        );
        println!("  {}", activity.description);
        let spots = activity.spots_left();
        let spots = if spots > 0 {
            style(spots.to_string()).green()
        } else {
            style(spots.to_string()).red()
        };
        println!(
            "  Enrollment: {}/{}  Spots left: {spots}",
            activity.enrolled(),
            activity.max_participants
        );
        if activity.participants.is_empty() {
            println!("  No participants yet");
        } else {
            for email in &activity.participants {
                println!("  - {email}");
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::{http::StatusCode, routing::delete, routing::get, Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn config(api_url: String) -> AdminConfig {
        AdminConfig {
            api_url,
            message_hide: Duration::from_secs(5),
            http_timeout: None,
        }
    }

    #[tokio::test]
    async fn delete_of_unknown_activity_exits_with_failure() {
        let router = Router::new()
            .route("/activities", get(|| async { Json(json!({})) }))
            .route(
                "/admin/activities/{name}",
                delete(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"detail": "Activity not found"})),
                    )
                }),
            );
        let config = config(serve(router).await);

        let command = Command::Delete {
            name: "Ghost Club".into(),
            yes: true,
        };
        let code = run(command, &config).await.unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn delete_of_known_activity_exits_with_success() {
        let router = Router::new()
            .route(
                "/activities",
                get(|| async {
                    Json(json!({
                        "Chess Club": {
                            "description": "Learn chess",
                            "schedule": "Fridays",
                            "max_participants": 12,
                            "participants": []
                        }
                    }))
                }),
            )
            .route(
                "/admin/activities/{name}",
                delete(|| async {
                    Json(json!({"message": "Activity 'Chess Club' deleted successfully"}))
                }),
            );
        let config = config(serve(router).await);

        let command = Command::Delete {
            name: "Chess Club".into(),
            yes: true,
        };
        let code = run(command, &config).await.unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }
}
