//! inkchord binary: wires the interceptor to real collaborators

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use inkchord::cli::{CliArgs, StartupConfig, StartupMode};
use inkchord::config_paths;
use inkchord::interceptor::Interceptor;
use inkchord::keymap::{load_default_keymap, ActionTable, KeyboardLayout, Resolver};
use inkchord::mode::{ModeSlot, ModeStore};
use inkchord::source::{self, EventSource};
use inkchord::style::{clipboard_payload, synthesize};
use inkchord::target::{
    ArboardClipboard, Backends, Clipboard, CommandEditor, RecordingTarget, XclipClipboard,
    XdotoolTarget,
};
use inkchord::Settings;

fn load_action_table() -> ActionTable {
    let user_keymap = config_paths::keymap_file();
    ActionTable::with_bindings(load_default_keymap(user_keymap.as_deref()))
}

fn print_style(config: &StartupConfig) -> Result<()> {
    let keys = config
        .style_keys()
        .ok_or_else(|| anyhow!("no style keys given"))?;
    println!("{}", clipboard_payload(&synthesize(&keys)));
    Ok(())
}

fn list_bindings() {
    for binding in load_action_table().bindings() {
        println!("{:<10} {}", binding.key.to_string(), binding.action);
    }

    let Some(modes_dir) = config_paths::modes_dir() else {
        return;
    };
    let store = ModeStore::new(modes_dir);
    for slot in [ModeSlot::Style, ModeSlot::Object] {
        let saved = store.list(slot);
        if !saved.is_empty() {
            println!(
                "\n{} snippets in {}: {}",
                slot.dir_name(),
                store.root().join(slot.dir_name()).display(),
                saved.join(" ")
            );
        }
    }
}

fn init_config() -> Result<()> {
    let path = config_paths::config_file().ok_or_else(|| anyhow!("no config directory available"))?;
    if path.exists() {
        println!("{} already exists", path.display());
        return Ok(());
    }
    let written = Settings::default()
        .save()
        .context("failed to write default config")?;
    println!("Wrote {}", written.display());
    Ok(())
}

fn live_backends(window: String, layout: KeyboardLayout, settings: &Settings) -> Backends {
    let xclip = XclipClipboard::new();
    let clipboard: Box<dyn Clipboard> = if xclip.is_available() {
        Box::new(xclip)
    } else {
        tracing::warn!("xclip not found, falling back to a plain-text clipboard");
        Box::new(ArboardClipboard)
    };

    Backends {
        target: Box::new(XdotoolTarget::new(window, layout)),
        clipboard,
        editor: Box::new(CommandEditor::new(&settings.editor)),
    }
}

fn intercept(config: &StartupConfig, window: Option<String>, dry_run: bool) -> Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    config_paths::ensure_all_config_dirs();

    let resolver = Resolver::new(KeyboardLayout::detect());
    tracing::debug!("Keyboard layout has {} keycodes", resolver.layout().len());

    let backends = match (dry_run, window) {
        (true, _) => Backends::recording(&RecordingTarget::dry_run()),
        (false, Some(window)) => {
            tracing::info!("Driving window {}", window);
            live_backends(window, resolver.layout().clone(), &settings)
        }
        (false, None) => return Err(anyhow!("--window is required unless --dry-run is given")),
    };

    let mut interceptor =
        Interceptor::new(resolver, load_action_table(), backends).with_settings(settings);

    let source = EventSource::open(config.input.as_deref()).context("failed to open event feed")?;
    let stats = source::run(&mut interceptor, source.events());
    let skipped = source.join();

    tracing::info!(
        events = stats.events,
        handled = stats.handled,
        replayed = stats.replayed,
        forwarded = stats.forwarded,
        failed = stats.failed,
        skipped,
        "event feed ended"
    );
    Ok(())
}

fn main() -> Result<()> {
    let config = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;
    inkchord::tracing::init(config.verbose);

    match config.mode.clone() {
        StartupMode::PrintStyle(_) => print_style(&config),
        StartupMode::ListBindings => {
            list_bindings();
            Ok(())
        }
        StartupMode::InitConfig => init_config(),
        StartupMode::Intercept { window, dry_run } => intercept(&config, window, dry_run),
    }
}
