use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::client::ChatApi;
use crate::dispatch::{Dispatcher, QueryOutcome, TRANSPORT_FAILURE_MESSAGE};
use crate::models::SummaryRecord;
use crate::present::display_model;
use crate::session::{FilterUpdate, Session};
use crate::tui;
use crate::utils::api_base_url;

#[derive(Parser)]
#[command(name = "camchat")]
#[command(version = "0.1.0")]
#[command(about = "Chat with your camera analytics backend", long_about = None)]
pub struct Cli {
    /// Base URL of the analytics backend (overrides CAMCHAT_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a one-shot question and print the matching summaries
    Ask {
        /// Natural-language question about camera activity
        query: String,
        /// Restrict to one camera (default: all cameras)
        #[arg(long)]
        camera: Option<u32>,
        /// Window start, local wall-clock YYYY-MM-DDTHH:mm (default: one hour ago)
        #[arg(long)]
        from: Option<String>,
        /// Window end (default: now)
        #[arg(long)]
        to: Option<String>,
    },
    /// List summaries for a camera/time window without a question
    Search {
        #[arg(long)]
        camera: Option<u32>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let base_url = cli.api_url.clone().unwrap_or_else(api_base_url);
    let api = ChatApi::new(base_url);

    match cli.command {
        Some(Commands::Ask { query, camera, from, to }) => {
            run_ask(api, &query, camera, from, to).await
        }
        Some(Commands::Search { camera, from, to }) => run_search(api, camera, from, to).await,
        None => tui::run_interactive(Session::start(), api),
    }
}

fn session_with_overrides(
    camera: Option<u32>,
    from: Option<String>,
    to: Option<String>,
) -> Session {
    let mut session = Session::start();
    let update = FilterUpdate { camera_id: camera.map(Some), start_time: from, end_time: to };
    session.filters.update(update);
    session
}

async fn run_ask(
    api: ChatApi,
    query: &str,
    camera: Option<u32>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let mut session = session_with_overrides(camera, from, to);
    let mut dispatcher = Dispatcher::new(api);

    match dispatcher.submit_chat(&mut session, query).await {
        QueryOutcome::Success(records) if records.is_empty() => {
            println!("No summaries matched your question.");
        }
        QueryOutcome::Success(records) => print_records(&records, &session),
        QueryOutcome::Backend(message) => println!("Error: {}", message),
        QueryOutcome::Transport => println!("{}", TRANSPORT_FAILURE_MESSAGE),
    }

    Ok(())
}

async fn run_search(
    api: ChatApi,
    camera: Option<u32>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let mut session = session_with_overrides(camera, from, to);
    let mut dispatcher = Dispatcher::new(api);

    match dispatcher.submit_search(&mut session).await {
        QueryOutcome::Success(records) if records.is_empty() => {
            println!("No results found");
        }
        QueryOutcome::Success(records) => print_records(&records, &session),
        QueryOutcome::Backend(message) => println!("Error: {}", message),
        QueryOutcome::Transport => println!("Search failed; is the backend running?"),
    }

    Ok(())
}

fn print_records(records: &[SummaryRecord], session: &Session) {
    println!("Found {} video summaries", records.len());
    for record in records {
        let display = display_model(record, session.timezone);
        println!();
        println!("{} | {} | {}", display.camera_label, display.interval_label, display.time_label);
        println!("  {}", display.summary);
        if let Some(frames_label) = display.frames_label {
            println!("  {}", frames_label);
        }
        for snapshot in &record.frame_snapshots {
            println!("  frame: {}", snapshot.path);
        }
        for clip in &record.video_clips {
            println!("  clip:  {}", clip.path);
        }
    }
}
