// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar feed client validation tool.
//!
//! Standalone CLI for exercising the feed client against a live service.

use std::io::Write as _;

use clap::{Parser, Subcommand};
use colored::Colorize as _;
use gcalendar::{
    AuthMethod, CalendarQuery, CalendarService, EventEntry, GCalConfig, Outcome, TransportFailure,
    UrlParams,
};
use tracing_subscriber::EnvFilter;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Calendar feed client validation tool.
#[derive(Parser)]
#[command(name = "gcal_cli")]
#[command(about = "Calendar feed client validation tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Service host, e.g. www.google.com
    #[arg(long)]
    server: Option<String>,
    /// Use plain http
    #[arg(long)]
    insecure: bool,
    /// GoogleLogin auth token
    #[arg(long)]
    token: Option<String>,
    /// Application name sent in the user agent
    #[arg(long)]
    source: Option<String>,
    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List the calendars of a user
    ListCals {
        /// User id, `default` when omitted
        #[arg(long)]
        user: Option<String>,
    },
    /// List events of a user
    ListEvents {
        /// User id, `default` when omitted
        #[arg(long)]
        user: Option<String>,
        /// Lower bound on event start
        #[arg(long)]
        start: Option<String>,
        /// Upper bound on event start
        #[arg(long)]
        end: Option<String>,
        /// Full text query
        #[arg(long, short)]
        query: Option<String>,
        /// lastmodified or starttime
        #[arg(long)]
        orderby: Option<String>,
        /// ascending, descending, a or d
        #[arg(long)]
        sortorder: Option<String>,
        /// Maximum number of entries
        #[arg(long)]
        max: Option<u32>,
    },
    /// Insert a new event
    Insert {
        /// Event title
        title: String,
        /// Start date or date-time
        #[arg(long)]
        start: String,
        /// End date or date-time
        #[arg(long)]
        end: Option<String>,
        /// Location
        #[arg(long)]
        location: Option<String>,
        /// Description
        #[arg(long)]
        content: Option<String>,
        /// Feed to post to
        #[arg(long, default_value = "/calendar/feeds/default/private/full")]
        feed: String,
    },
    /// Delete an event by its edit URI
    Delete {
        /// Edit URI
        edit_uri: String,
        /// Ask the service to notify guests
        #[arg(long)]
        notify: bool,
    },
}

impl Cli {
    fn build_config(&self) -> GCalConfig {
        let server = self
            .server
            .clone()
            .or_else(|| std::env::var("GCAL_SERVER").ok())
            .unwrap_or_else(|| GCalConfig::default().server);

        let token = self
            .token
            .clone()
            .or_else(|| std::env::var("GCAL_TOKEN").ok());

        let auth = match token {
            Some(token) => AuthMethod::GoogleLogin { token },
            None => AuthMethod::None,
        };

        GCalConfig {
            server,
            secure: !self.insecure,
            auth,
            source: self
                .source
                .clone()
                .or_else(|| std::env::var("GCAL_SOURCE").ok()),
            timeout_secs: self.timeout,
            ..GCalConfig::default()
        }
    }
}

async fn cmd_list_cals(service: &CalendarService, user: Option<&str>) -> CliResult {
    let query = CalendarQuery::list_calendars(user);
    let Some(feed) = report(service.query(&query).await?) else {
        return Ok(());
    };
    let Some(feed) = feed.into_calendars() else {
        return Err("unexpected feed kind".into());
    };

    if feed.entries.is_empty() {
        println!("No calendars found");
        return Ok(());
    }

    println!("{:-<100}", "");
    println!("{:<30} {:<10} {:<10} {:<50}", "Title", "Color", "Access", "Events feed");
    println!("{:-<100}", "");

    for cal in &feed.entries {
        println!(
            "{:<30} {:<10} {:<10} {:<50}",
            cal.entry.title.as_deref().unwrap_or("Unnamed"),
            cal.color.as_deref().unwrap_or("-"),
            cal.access_level.as_deref().unwrap_or("-"),
            cal.events_feed().unwrap_or("-"),
        );
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn cmd_list_events(
    service: &CalendarService,
    user: Option<&str>,
    start: Option<String>,
    end: Option<String>,
    text: Option<String>,
    orderby: Option<String>,
    sortorder: Option<String>,
    max: Option<u32>,
) -> CliResult {
    let mut query = CalendarQuery::events(user);
    if let Some(start) = start {
        query.set_start_min(start);
    }
    if let Some(end) = end {
        query.set_start_max(end);
    }
    if let Some(orderby) = orderby {
        query.set_orderby(orderby)?;
    }
    if let Some(sortorder) = sortorder {
        query.set_sortorder(sortorder)?;
    }
    if let Some(max) = max {
        query.set_max_results(max);
    }
    if let Some(text) = text {
        query.set_text_query(text);
    }
    tracing::info!(uri = %query, "querying events");

    let Some(feed) = report(service.query(&query).await?) else {
        return Ok(());
    };
    let Some(feed) = feed.into_events() else {
        return Err("unexpected feed kind".into());
    };

    if feed.entries.is_empty() {
        println!("No events found");
        return Ok(());
    }

    println!("{:-<100}", "");
    println!("{:<26} {:<40} {:<30}", "Start", "Title", "Where");
    println!("{:-<100}", "");

    for event in &feed.entries {
        let start = event.when.first().map_or("-", |w| w.start_time.as_str());
        let location = event
            .locations
            .first()
            .map_or("", |w| w.value_string.as_str());
        println!(
            "{:<26} {:<40} {:<30}",
            start,
            event.entry.title.as_deref().unwrap_or(""),
            location
        );
    }

    if let Some(next) = feed.next_link() {
        println!("\nMore results: {next}");
    }

    Ok(())
}

async fn cmd_insert(
    service: &CalendarService,
    title: String,
    start: String,
    end: Option<String>,
    location: Option<String>,
    content: Option<String>,
    feed: &str,
) -> CliResult {
    let mut event = EventEntry::new(title).with_when(start, end);
    if let Some(location) = location {
        event = event.with_location(location);
    }
    if let Some(content) = content {
        event = event.with_content(content);
    }

    if let Some(created) = report(service.insert_event(&event, feed, None).await?) {
        println!("{}", "✓ Event created successfully".green());
        println!("Edit URI: {}", created.edit_link().unwrap_or("-"));
    }

    Ok(())
}

async fn cmd_delete(service: &CalendarService, edit_uri: &str, notify: bool) -> CliResult {
    let params = notify.then(|| UrlParams::new().param("sendEventNotifications", "true"));

    if report(service.delete_event(edit_uri, params.as_ref()).await).is_some() {
        println!("{}", "✓ Event deleted successfully".green());
        println!("Edit URI: {edit_uri}");
    }

    Ok(())
}

/// Prints a failure and yields the success value, if any.
fn report<T>(outcome: Outcome<T>) -> Option<T> {
    match outcome {
        Outcome::Success(value) => Some(value),
        Outcome::Failure(failure) => {
            std::io::stdout().flush().ok();
            eprintln!("{}", format_failure(&failure));
            None
        }
    }
}

/// Format failure for user-friendly display.
fn format_failure(failure: &TransportFailure) -> String {
    let prefix = "Error:".red().bold();
    match failure.status {
        0 => format!(
            "{prefix} Network error ({}) - check server and connection",
            failure.reason
        ),
        401 | 403 => format!("{prefix} Authentication failed"),
        404 => format!("{prefix} Feed or entry not found"),
        409 => format!("{prefix} Version conflict - entry was modified by another client"),
        _ => format!("{prefix} {failure}"),
    }
}

fn main() -> CliResult {
    // Priority: .env.local (highest) -> .env -> existing environment variables (lowest)
    dotenvy::dotenv().ok();
    dotenvy::from_filename(".env.local").ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service = CalendarService::new(cli.build_config())?;

    let runtime = tokio::runtime::Runtime::new()?;

    let result = runtime.block_on(async {
        match cli.command {
            Commands::ListCals { user } => cmd_list_cals(&service, user.as_deref()).await,
            Commands::ListEvents {
                user,
                start,
                end,
                query,
                orderby,
                sortorder,
                max,
            } => {
                cmd_list_events(
                    &service,
                    user.as_deref(),
                    start,
                    end,
                    query,
                    orderby,
                    sortorder,
                    max,
                )
                .await
            }
            Commands::Insert {
                title,
                start,
                end,
                location,
                content,
                feed,
            } => cmd_insert(&service, title, start, end, location, content, &feed).await,
            Commands::Delete { edit_uri, notify } => {
                cmd_delete(&service, &edit_uri, notify).await
            }
        }
    });

    if let Err(e) = result {
        std::io::stdout().flush().ok();
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }

    Ok(())
}
