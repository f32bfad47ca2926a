//! Application runner logic
//!
//! Loads settings, sets up logging and dispatches each subcommand against
//! a UFO opened with [`UfoFont`].

use crate::core::cli::{CliArgs, Command};
use crate::core::config_file::ConfigFile;
use crate::core::settings::Settings;
use crate::font_source::{SpacingFont, UfoFont};
use crate::logging;
use crate::spacing::{
    export_groups, groups_for_glyph, import_groups, make_group, margins, propagate,
    render_preview, siblings, spacing_groups, MakeGroup, Side, Transfer, TransferReport,
};
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Run the command selected on the command line
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    if cli_args.command == Command::InitConfig {
        return ConfigFile::initialize_config_directory();
    }

    let config = ConfigFile::load();
    let settings = Settings::resolve(&cli_args, config.as_ref());
    let _log_guard = logging::init(settings.verbose, cli_args.log_file)?;
    tracing::debug!("Resolved settings: {:?}", settings);

    run_command(&cli_args.command, &settings)
}

/// Dispatch one subcommand with already resolved settings
pub fn run_command(command: &Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Groups { ufo, glyph } => {
            let font = UfoFont::load(ufo)?;
            print_groups(&font, settings, glyph.as_deref());
        }
        Command::Siblings { ufo, glyph, side } => {
            let font = UfoFont::load(ufo)?;
            ensure_glyph(&font, glyph)?;
            for sibling in siblings(&font, &settings.prefixes, glyph, *side) {
                println!("{sibling}");
            }
        }
        Command::Margins {
            ufo,
            glyph,
            beam,
            layer,
        } => {
            let mut font = UfoFont::load(ufo)?;
            if let Some(layer) = layer {
                font.set_current_layer(layer)?;
            }
            ensure_glyph(&font, glyph)?;
            let layer = font.current_layer();
            match margins(&font, &layer, glyph, *beam) {
                Some(m) => println!("{glyph}: left {} right {}", m.left, m.right),
                None => println!("{glyph}: no margins"),
            }
        }
        Command::Copy {
            ufo,
            glyph,
            side,
            beam,
            all_layers,
            dry_run,
        } => {
            let mut font = UfoFont::load(ufo)?;
            ensure_glyph(&font, glyph)?;
            let group = siblings(&font, &settings.prefixes, glyph, *side);
            if group.is_empty() {
                println!("'{glyph}' is not in a {side} spacing group");
                return Ok(());
            }
            let transfer = Transfer::new(glyph.as_str(), group, *side)
                .with_beam(*beam)
                .with_all_layers(*all_layers)
                .with_verbose(settings.verbose);
            let report = propagate(&mut font, &transfer)?;
            print_report(&report);
            save_if_modified(&font, ufo, *dry_run)?;
        }
        Command::MakeGroup {
            ufo,
            glyph,
            side,
            dry_run,
        } => {
            let mut font = UfoFont::load(ufo)?;
            ensure_glyph(&font, glyph)?;
            match make_group(&mut font, &settings.prefixes, glyph, *side)? {
                MakeGroup::Created(name) => {
                    println!("Created {name}");
                    if !*dry_run {
                        font.save(ufo)?;
                    }
                }
                MakeGroup::Exists(name) => println!("{name} already exists"),
            }
        }
        Command::Export { ufo, json } => {
            let font = UfoFont::load(ufo)?;
            let count = export_groups(&font, &settings.prefixes, json)?;
            println!("Exported {count} spacing groups to {}", json.display());
        }
        Command::Import { ufo, json, dry_run } => {
            let mut font = UfoFont::load(ufo)?;
            let summary = import_groups(&mut font, json)?;
            println!(
                "Imported {} groups from {} ({} new, {} replaced)",
                summary.len(),
                json.display(),
                summary.created.len(),
                summary.replaced.len()
            );
            if !*dry_run && !summary.is_empty() {
                font.save(ufo)?;
            }
        }
        Command::Preview {
            ufo,
            glyph,
            side,
            opacity,
        } => {
            let font = UfoFont::load(ufo)?;
            ensure_glyph(&font, glyph)?;
            let group = siblings(&font, &settings.prefixes, glyph, *side);
            let style = settings.preview_style(*opacity);
            let commands = render_preview(&font, glyph, &group, *side, &style);
            println!("{}", serde_json::to_string_pretty(&commands)?);
        }
        Command::InitConfig => ConfigFile::initialize_config_directory()?,
    }
    Ok(())
}

fn ensure_glyph(font: &UfoFont, glyph: &str) -> Result<()> {
    let layer = font.current_layer();
    if !font.has_glyph(&layer, glyph) {
        bail!("Glyph '{glyph}' not found in layer '{layer}'");
    }
    Ok(())
}

fn print_groups(font: &UfoFont, settings: &Settings, glyph: Option<&str>) {
    let Some(glyph) = glyph else {
        for (name, members) in spacing_groups(font, &settings.prefixes) {
            println!("{name}: {}", members.join(" "));
        }
        return;
    };
    let groups = groups_for_glyph(font, &settings.prefixes, glyph);
    for side in [Side::Left, Side::Right] {
        println!("{side}: {}", groups.get(side).unwrap_or("-"));
    }
}

fn print_report(report: &TransferReport) {
    let Some(value) = report.value else {
        println!("No {} margin to copy from '{}'", report.side, report.source);
        return;
    };
    println!(
        "{} margin of '{}': {}{}",
        report.side,
        report.source,
        value,
        if report.beam.is_some() { " (beam)" } else { "" }
    );
    for change in &report.changes {
        println!(
            "  {}/{}: {} -> {} ({:+})",
            change.layer, change.glyph, change.before, change.after, change.delta
        );
    }
    for skipped in &report.skipped {
        println!("  {}/{}: skipped, {}", skipped.layer, skipped.glyph, skipped.reason);
    }
}

fn save_if_modified(font: &UfoFont, path: &Path, dry_run: bool) -> Result<()> {
    if !font.is_modified() {
        return Ok(());
    }
    if dry_run {
        tracing::info!("Dry run: not saving {:?}", path);
        return Ok(());
    }
    font.save(path)
        .with_context(|| format!("Failed to save {}", path.display()))
}
