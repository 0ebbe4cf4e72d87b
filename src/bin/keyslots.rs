// Keyslots CLI
// Grabs the keyboards and turns key combos into clipboard slot actions

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;

use keyslots_core::config::Configuration;
use keyslots_core::display::format_slot_listing;
use keyslots_core::event::EventLoop;
use keyslots_core::input::DeviceFilter;
use keyslots_core::{
    ActionExecutor, Bindings, ComboResolver, ConfigParseError, DisplayLog, Flow, InitOutcome, Settings,
    SlotStore, SystemClipboard, VirtualDevice,
};

#[path = "../console.rs"]
mod console;

use console::ConsoleDisplay;

/// Keyboard combo clipboard slots
#[derive(Parser, Debug)]
#[command(name = "keyslots")]
#[command(version)]
#[command(about = "Save and recall clipboard text with keyboard combos", long_about = None)]
struct Args {
    /// Slot store file
    #[arg(short, long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Settings file (default: ~/.config/keyslots/settings.toml)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Grab only these devices, by name or path (can be used multiple times)
    #[arg(short, long, value_name = "DEVICE")]
    device: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Start with the status console hidden
    #[arg(long)]
    hidden: bool,

    /// Validate the store configuration and exit
    #[arg(long)]
    check_config: bool,

    /// List keyboard devices that would be grabbed
    #[arg(long)]
    list_devices: bool,

    /// Print the slot listing and exit
    #[arg(long)]
    list_slots: bool,
}

/// Main application state
struct Application {
    args: Args,
    settings: Settings,
    store: SlotStore,
    bindings: Bindings,
    /// Flag to signal event loop to stop
    running: Arc<AtomicBool>,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_settings(path: Option<&Path>) -> Settings {
    let loaded = match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load_default(),
    };
    match loaded {
        Ok(settings) => {
            if let Some(source) = settings.source_path() {
                log::debug!("Loaded settings from {}", source.display());
            }
            settings
        }
        Err(e) => {
            log::warn!("Could not load settings: {}; using defaults", e);
            Settings::new()
        }
    }
}

/// CLI `--device` > settings `[devices].only` > autodetect.
fn device_filter(cli: &[String], settings: &Settings) -> DeviceFilter {
    if !cli.is_empty() {
        DeviceFilter::only(cli.iter().cloned())
    } else if !settings.devices().is_empty() {
        DeviceFilter::only(settings.devices().iter().cloned())
    } else {
        DeviceFilter::autodetect()
    }
}

fn print_bindings(config: &Configuration) {
    let rows = [
        ("SAVE1 (save):  ", config.save1),
        ("SAVE2 (save):  ", config.save2),
        ("LOAD (load):   ", config.load),
        ("CLEAR (clear): ", config.clear),
        ("EXIT (exit):   ", config.exit),
    ];
    println!("[CONFIG] Key configuration:");
    for (label, code) in rows {
        println!("  - {}{} [{}]", label, code.describe(), code.to_hex());
    }
    let labels: Vec<&str> = config.slot_labels.iter().collect();
    println!("  - Slot characters: {}", labels.join(","));
}

fn print_usage(store: &Path) {
    println!();
    println!("USAGE");
    println!("  Save:         hold SAVE + digits, release SAVE   (SAVE + 1 + 2 = slot 12)");
    println!("  Load:         hold LOAD + digits, release LOAD   (LOAD + 4 + 5 = slot 45)");
    println!("  Clear a slot: hold LOAD + CLEAR + digits, release LOAD");
    println!("  Console:      SAVE then LOAD");
    println!("  Clear extras: LOAD then SAVE");
    println!("  Exit:         EXIT key");
    println!("  Keys are configured in {}", store.display());
    println!();
}

impl Application {
    /// Load settings and open the slot store.
    fn new(args: Args) -> anyhow::Result<(Self, Vec<ConfigParseError>)> {
        let settings = load_settings(args.settings.as_deref());
        let store_path = settings.resolve_store_path(args.store.as_deref());

        let mut store = SlotStore::new(&store_path);
        let outcome = store
            .initialize()
            .with_context(|| format!("cannot initialize slot store {}", store_path.display()))?;
        let errors = match outcome {
            InitOutcome::Created => {
                println!("OK Save file created: {}", store_path.display());
                Vec::new()
            }
            InitOutcome::Loaded { errors } => errors,
        };

        let bindings = Bindings::from_config(store.config()).context("invalid key bindings")?;

        Ok((
            Self {
                args,
                settings,
                store,
                bindings,
                running: Arc::new(AtomicBool::new(true)),
            },
            errors,
        ))
    }

    /// Validate configuration
    fn check_config(&self, errors: &[ConfigParseError]) -> anyhow::Result<()> {
        println!("Slot store: {}", self.store.path().display());
        print_bindings(self.store.config());
        if errors.is_empty() {
            println!("Configuration is valid");
            return Ok(());
        }
        for e in errors {
            println!("  XX {}", e);
        }
        bail!("{} invalid key binding(s)", errors.len())
    }

    /// List available keyboard devices
    fn list_devices(filter: &DeviceFilter) -> anyhow::Result<()> {
        let devices = EventLoop::list_devices(filter).context("error finding keyboard devices")?;
        println!("Found {} keyboard device(s):", devices.len());
        for device in &devices {
            match &device.path {
                Some(path) => println!("  {}: {} ({})", device.index, device.name, path),
                None => println!("  {}: {}", device.index, device.name),
            }
        }
        Ok(())
    }

    fn list_slots(&self) -> anyhow::Result<()> {
        let slots = self.store.list_slots()?;
        for line in format_slot_listing(&slots, &self.store.config().slot_labels) {
            println!("{}", line);
        }
        Ok(())
    }

    fn spawn_signal_handler(&self) {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let running = self.running.clone();
        std::thread::spawn(move || {
            let mut signals = match Signals::new([SIGINT, SIGTERM]) {
                Ok(signals) => signals,
                Err(e) => {
                    log::warn!("Cannot install signal handler: {}", e);
                    return;
                }
            };
            if signals.forever().next().is_some() {
                log::info!("Received signal, shutting down");
                running.store(false, Ordering::SeqCst);
            }
        });
    }

    /// Run the main event loop
    fn run(self) -> anyhow::Result<()> {
        println!("=========================================================");
        println!("   KEYSLOTS - CLIPBOARD SLOTS   ");
        println!("=========================================================");
        println!("OK Save file ready: {}", self.store.path().display());
        print_bindings(self.store.config());
        print_usage(self.store.path());

        self.spawn_signal_handler();

        let mut output = VirtualDevice::new().context("cannot create the virtual keyboard")?;
        output.set_key_delay_ms(self.settings.key_delay_ms());

        let filter = device_filter(&self.args.device, &self.settings);
        let mut event_loop = EventLoop::new_with_grab(&filter).context("cannot grab keyboard devices")?;
        log::info!(
            "Listening on {} device(s): {}",
            event_loop.device_count(),
            event_loop.device_names().join(", ")
        );

        let visible = !(self.args.hidden || self.settings.start_hidden());
        let mut display = ConsoleDisplay::stdout(visible);
        let mut resolver = ComboResolver::new(self.bindings);
        let mut executor = ActionExecutor::new(self.store, SystemClipboard::new());

        println!("[READY] Awaiting commands...");
        executor.refresh(&mut display);

        let result = Self::run_main_loop(
            &self.running,
            &mut event_loop,
            &mut resolver,
            &mut output,
            &mut executor,
            &mut display,
        );

        // Cleanup: ungrab devices and release keys
        event_loop.ungrab_all();
        if let Err(e) = output.release_all() {
            log::warn!("Failed to release keys: {}", e);
        }
        result
    }

    fn run_main_loop(
        running: &AtomicBool,
        event_loop: &mut EventLoop,
        resolver: &mut ComboResolver,
        output: &mut VirtualDevice,
        executor: &mut ActionExecutor<SystemClipboard>,
        display: &mut impl DisplayLog,
    ) -> anyhow::Result<()> {
        while running.load(Ordering::SeqCst) {
            let events = event_loop.poll_for_events(100).context("error reading input events")?;
            for event in events {
                let resolution = resolver.handle(event.key);
                if let Err(e) = output.dispatch(&event, resolution.disposition) {
                    log::error!("Error sending output: {}", e);
                }
                let Some(action) = resolution.action else {
                    continue;
                };
                if executor.execute(&action, display) == Flow::Exit {
                    running.store(false, Ordering::SeqCst);
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Handle list-devices flag (doesn't require the store)
    if args.list_devices {
        let settings = load_settings(args.settings.as_deref());
        return Application::list_devices(&device_filter(&args.device, &settings));
    }

    let (app, errors) = Application::new(args)?;

    if app.args.check_config {
        return app.check_config(&errors);
    }
    if app.args.list_slots {
        return app.list_slots();
    }
    for e in &errors {
        log::warn!("Configuration error: {}", e);
    }

    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["keyslots", "--store", "/tmp/slots.dat"]);

        assert_eq!(args.store, Some(PathBuf::from("/tmp/slots.dat")));
        assert!(args.settings.is_none());
        assert!(args.device.is_empty());
        assert!(!args.verbose);
        assert!(!args.hidden);
        assert!(!args.check_config);
        assert!(!args.list_devices);
        assert!(!args.list_slots);
    }

    #[test]
    fn test_args_with_options() {
        let args = Args::parse_from([
            "keyslots",
            "--verbose",
            "--hidden",
            "--device",
            "/dev/input/event0",
            "-d",
            "/dev/input/event1",
        ]);

        assert!(args.verbose);
        assert!(args.hidden);
        assert_eq!(args.device, ["/dev/input/event0", "/dev/input/event1"]);
    }

    #[test]
    fn test_args_list_flags() {
        assert!(Args::parse_from(["keyslots", "--list-devices"]).list_devices);
        assert!(Args::parse_from(["keyslots", "--list-slots"]).list_slots);
        assert!(Args::parse_from(["keyslots", "--check-config"]).check_config);
    }

    #[test]
    fn test_device_filter_precedence() {
        let settings = Settings::from_toml("[devices]\nonly = [\"from-settings\"]\n").unwrap();

        let cli = vec!["from-cli".to_string()];
        assert_eq!(device_filter(&cli, &settings), DeviceFilter::only(["from-cli"]));
        assert_eq!(device_filter(&[], &settings), DeviceFilter::only(["from-settings"]));
        assert!(device_filter(&[], &Settings::new()).is_autodetect());
    }
}
