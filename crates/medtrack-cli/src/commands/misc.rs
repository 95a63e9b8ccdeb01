use clap::CommandFactory;
use clap_complete::generate;
use serde_json::json;

use medtrack_core::View;

use crate::app::{parse_timezone, resolve_config_path, AppContext};
use crate::cli::{Cli, ConfigArgs, ConfigInitArgs, ConfigSubcommand, RouteArgs};
use crate::config::{write_config, MedtrackConfig};
use crate::errors::CliError;
use crate::output::print_json;
use crate::ui::{hint, kv, print, receipt};

pub fn handle_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "medtrack", &mut std::io::stdout());
    Ok(())
}

/// Map a path to the view it names. Unknown paths fall back to the dashboard.
pub fn handle_route(ctx: &AppContext, args: &RouteArgs) -> anyhow::Result<()> {
    let view = View::from_path(&args.path);

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&json!({
            "requested": args.path,
            "path": view.path(),
            "title": view.title(),
        }));
    }
    print(&ui, &kv(&ui, "View", view.title()));
    print(&ui, &kv(&ui, "Path", view.path()));
    Ok(())
}

pub fn handle_config(ctx: &AppContext, args: &ConfigArgs) -> anyhow::Result<()> {
    match &args.command {
        ConfigSubcommand::Init(init) => handle_config_init(ctx, init),
        ConfigSubcommand::Path => handle_config_path(ctx),
    }
}

fn handle_config_init(ctx: &AppContext, args: &ConfigInitArgs) -> anyhow::Result<()> {
    let path = resolve_config_path()?;
    if path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Pass --force to overwrite it.",
            path.display()
        ))
        .into());
    }
    let timezone = args
        .timezone
        .as_deref()
        .map(|tz| parse_timezone(tz).map(|tz| tz.name().to_string()))
        .transpose()?;
    let store_path = args.store_path.as_deref().map(std::path::PathBuf::from);

    let config = MedtrackConfig::new(store_path, timezone);
    write_config(&path, &config)?;
    log::info!("wrote config {}", path.display());

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&json!({ "path": path, "config": config }));
    }
    if !ctx.quiet() {
        print(
            &ui,
            &receipt(&ui, "Wrote config", &[("Path", path.display().to_string())]),
        );
        print(&ui, &hint(&ui, "medtrack login --email demo@example.com"));
    }
    Ok(())
}

fn handle_config_path(ctx: &AppContext) -> anyhow::Result<()> {
    let config = resolve_config_path()?;
    let store = ctx.store_path()?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&json!({
            "config": config,
            "configExists": config.exists(),
            "store": store,
        }));
    }
    print(&ui, &kv(&ui, "Config", &config.display().to_string()));
    print(&ui, &kv(&ui, "State", &store.display().to_string()));
    Ok(())
}
