//! Vulkan samples launcher, terminal host
//!
//! Lists the samples from a manifest file as category tabs, narrows them by
//! tag, and prints the command line that would be forwarded to the native
//! samples process.

use std::path::PathBuf;

use clap::Parser;
use sample_launcher::foundation::logging;
use sample_launcher::platform::{FileStore, Notification, NotificationIdCounter, NotificationSink, Notifier};
use sample_launcher::prelude::*;
use sample_launcher::samples::display_label;

/// Launcher command line arguments
#[derive(Parser, Debug)]
#[command(name = "vkb_launcher")]
#[command(about = "Browse and launch Vulkan samples")]
struct Args {
    /// Launcher settings (.toml or .ron)
    #[arg(short, long, value_name = "PATH", default_value = "launcher.toml")]
    config: PathBuf,

    /// Sample manifest (.toml or .ron)
    #[arg(short, long, value_name = "PATH", default_value = "samples.toml")]
    manifest: PathBuf,

    /// Launch a sample by id
    #[arg(long, value_name = "ID", conflicts_with = "batch")]
    sample: Option<String>,

    /// Launch a test by id
    #[arg(long, value_name = "ID", conflicts_with = "batch")]
    test: Option<String>,

    /// Batch-run the filtered samples of a category, or of every category with `all`
    #[arg(long, value_name = "CATEGORY")]
    batch: Option<String>,

    /// Only show samples carrying one of these tags
    #[arg(short, long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// Print the tabs and their visible samples
    #[arg(short, long)]
    list: bool,

    /// Run in benchmark mode
    #[arg(long)]
    benchmark: bool,

    /// Render to a headless surface
    #[arg(long)]
    headless: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Prints transient messages to stderr
struct ToastPrinter;

impl UiEventHandler for ToastPrinter {
    fn on_event(&mut self, event: &UiEvent) -> bool {
        if let Some(message) = event.get_message() {
            eprintln!("! {message}");
        }
        true
    }
}

/// Prints forwarded command lines
struct LaunchPrinter;

impl UiEventHandler for LaunchPrinter {
    fn on_event(&mut self, event: &UiEvent) -> bool {
        if let Some(args) = event.get_arguments() {
            let orientation = if event.wants_landscape() { " (landscape)" } else { "" };
            println!("launch{orientation}: {}", args.join(" "));
        }
        true
    }
}

/// Desktop stand-in for the system notification tray
struct StderrSink;

impl NotificationSink for StderrSink {
    fn post(&mut self, channel: &str, id: i64, notification: &Notification) {
        eprintln!("[{channel}#{id}] {}: {}", notification.title, notification.big_text);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logging::init_with_level(if args.verbose {
        logging::LevelFilter::Debug
    } else {
        logging::LevelFilter::Info
    });

    log::info!("Starting Vulkan samples launcher");

    let config = LauncherConfig::load_or_default(&args.config)?;
    let benchmark = config.native.benchmark || args.benchmark;
    let headless = config.native.headless || args.headless;
    let config = config.with_launch_modes(benchmark, headless);

    let mut notifier = Notifier::new(
        config.notifications.channel_id.clone(),
        NotificationIdCounter::new(
            FileStore::new(config.notifications.prefs_path.clone()),
            config.notifications.counter_key.clone(),
        ),
        StderrSink,
    );

    let mut launcher = Launcher::new(&config, ManifestBridge::from_file(&args.manifest))?;
    launcher
        .events_mut()
        .register_handler(UiEventType::ToastPosted, Box::new(ToastPrinter));
    launcher
        .events_mut()
        .register_handler(UiEventType::LaunchRequested, Box::new(LaunchPrinter));

    // Desktop hosts have no runtime permission prompts
    if launcher.check_permissions(&|_: Permission| true) != PermissionStep::ShowSamples {
        return Err("storage permissions unavailable".into());
    }

    if !args.tags.is_empty() {
        apply_tags(&mut launcher, &args.tags);
    }

    if args.list {
        print_tabs(&launcher);
    }

    let result = run(&mut launcher, &args);
    launcher.events_mut().dispatch();

    if let Err(e) = result {
        log::error!("{e}");
        notifier.notify(&Notification::message(e.to_string()))?;
        return Err(e);
    }

    Ok(())
}

fn run(launcher: &mut Launcher<ManifestBridge>, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(category) = &args.batch {
        if let Some(tab) = launcher.tabs().iter().position(|tab| tab == category) {
            launcher.select_tab(tab)?;
        }
        launcher.run_batch_in(category)?;
        return Ok(());
    }

    let extras = IntentExtras {
        sample: args.sample.clone(),
        test: args.test.clone(),
    };
    if launcher.handle_extras(&extras)?.is_none() && !args.list {
        log::info!("Nothing to launch; pass --list to browse samples");
    }
    Ok(())
}

/// Drive the filter dialog: check exactly `selected`, then apply
fn apply_tags(launcher: &mut Launcher<ManifestBridge>, selected: &[String]) {
    let tags = launcher.index().tags().to_vec();
    for tag in selected {
        if !tags.contains(tag) {
            log::warn!("No sample carries tag '{tag}'");
        }
    }

    launcher.open_filter();
    for tag in &tags {
        launcher.toggle_filter(tag, selected.contains(tag));
    }
    launcher.apply_filter();
}

fn print_tabs(launcher: &Launcher<ManifestBridge>) {
    let filter: Vec<String> = launcher.index().active_filter().iter().map(|t| display_label(t)).collect();
    println!("Filter: {}", filter.join(", "));

    for (position, category) in launcher.tabs().iter().enumerate() {
        let rows = launcher.rows(position);
        println!("\n{} ({})", display_label(category), rows.len());
        for sample in rows {
            println!("  {:<32} {}", sample.id(), sample.name());
            if !sample.description().is_empty() {
                println!("  {:<32} {}", "", sample.description());
            }
        }
    }
}
