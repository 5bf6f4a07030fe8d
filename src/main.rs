use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use newsmap::environment::Config;
use newsmap::loader::{GroupSource, Source};
use newsmap::logging;
use newsmap::session::{refresh_groups, switch_group, Effect, MapSession, UserAction};
use newsmap::view::{compose, Scene};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "newsmap", about = "Geo-tagged news clusters on a map")]
struct Cli {
    /// Base URL or directory with the group list and group data (overrides NEWSMAP_SOURCE)
    #[arg(long)]
    source: Option<String>,

    /// Group list path relative to the source (overrides NEWSMAP_GROUPS_PATH)
    #[arg(long)]
    groups_path: Option<String>,

    /// Print the scene as JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available groups
    Groups,
    /// Load a group and print its markers, regions and news list
    Show {
        group_id: String,

        /// Select a location by record index, as a marker click would
        #[arg(long)]
        select: Option<usize>,

        /// Select a location by region index, as a polygon click would
        #[arg(long)]
        region: Option<usize>,

        /// Collapse an item by title (repeatable)
        #[arg(long)]
        collapse: Vec<String>,

        /// Hide the news list after the other actions
        #[arg(long)]
        hide_list: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Some(groups_path) = cli.groups_path {
        config.groups_path = groups_path;
    }

    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", config.log_dir))?;
    logging::configure_logging(&config.log_dir);

    let source = Source::from_address(&config.source, &config.groups_path, config.timeout)
        .with_context(|| format!("Invalid source {}", config.source))?;

    let session = Mutex::new(MapSession::new());
    refresh_groups(&session, &source).await;

    match cli.command {
        Command::Groups => {
            let session = session.lock().await;
            if session.groups().is_empty() {
                println!("{}", "No groups available".dimmed());
            }
            for group in session.groups() {
                println!(
                    "{} {}  {}",
                    group.icon,
                    group.id.bright_yellow(),
                    group.title.bold()
                );
                if !group.description.is_empty() {
                    println!("    {}", group.description.dimmed());
                }
            }
        }
        Command::Show {
            group_id,
            select,
            region,
            collapse,
            hide_list,
        } => {
            show(
                &session,
                &source,
                &group_id,
                select,
                region,
                config.collapsed.into_iter().chain(collapse).collect(),
                hide_list,
                cli.json,
            )
            .await?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn show<S: GroupSource>(
    session: &Mutex<MapSession>,
    source: &S,
    group_id: &str,
    select: Option<usize>,
    region: Option<usize>,
    collapse: Vec<String>,
    hide_list: bool,
    json: bool,
) -> Result<()> {
    switch_group(session, source, group_id).await?;

    let mut session = session.lock().await;
    session.collapse_items(&collapse);

    let mut actions: Vec<UserAction> = select.map(UserAction::SelectRecord).into_iter().collect();
    if let Some(index) = region {
        match session.regions().feature(index) {
            Some(feature) => actions.push(UserAction::ClickRegion(feature.clone())),
            None => println!("{} {}", "No region".bright_red(), index),
        }
    }
    if hide_list {
        actions.push(UserAction::ToggleList);
    }

    let mut effects = Vec::new();
    for action in actions {
        effects.extend(session.handle(action));
    }

    let scene = compose(&session);
    if json {
        println!("{}", serde_json::to_string_pretty(&scene)?);
    } else {
        print_scene(&scene, &effects);
    }
    Ok(())
}

fn print_scene(scene: &Scene, effects: &[Effect]) {
    println!("\n{}", "═".repeat(80).bright_blue());
    println!("{}", "MARKERS".bright_blue());
    println!("{}", "─".repeat(80).dimmed());
    for marker in &scene.markers {
        let line = format!(
            "{:>3}  {} {}  {}  {}",
            marker.record_index,
            marker.style.icon,
            marker.name,
            marker.coordinates,
            marker.style.color
        );
        if marker.selected {
            println!("{}", line.bright_green().bold());
        } else {
            println!("{}", line);
        }
    }

    println!("\n{}: {}", "Regions".bright_blue(), scene.regions.len());
    if let Some(style) = scene.regions.style {
        println!("{}: {} {}", "Region style".bright_blue(), style.icon, style.color);
    }

    for effect in effects {
        match effect {
            Effect::FlyTo(fly) => println!(
                "{}: {} zoom {} over {}ms",
                "Fly to".bright_magenta(),
                fly.center,
                fly.zoom,
                fly.duration_ms
            ),
            Effect::OpenArticle(url) => println!("{}: {}", "Open".bright_magenta(), url),
        }
    }

    println!("\n{}", "═".repeat(80).bright_blue());
    match &scene.selected_location {
        Some(name) => println!("{} {}", "NEWS".bright_blue(), name.bright_yellow()),
        None => println!("{} {}", "NEWS".bright_blue(), "(all locations)".dimmed()),
    }
    println!("{}", "─".repeat(80).dimmed());

    if !scene.list_visible {
        println!("{}", "List hidden".dimmed());
        return;
    }
    if scene.list.is_empty() {
        println!("{}", "No news".dimmed());
        return;
    }

    for entry in &scene.list {
        let venue = entry
            .venue
            .as_deref()
            .map(|v| format!(" ({})", v))
            .unwrap_or_default();
        let duplicates = if entry.duplicate_count > 0 {
            format!(" +{}", entry.duplicate_count)
        } else {
            String::new()
        };
        println!(
            "{}{}{}",
            entry.location_name.bold(),
            venue.dimmed(),
            duplicates.bright_cyan()
        );
        for item in &entry.items {
            let marker = if item.expanded { "▾" } else { "▸" };
            println!("  {} {}", marker, item.title);
            if item.expanded {
                println!(
                    "      {}  {}  {}",
                    item.publisher.dimmed(),
                    item.display_date.dimmed(),
                    item.url.underline()
                );
            }
        }
    }
}
