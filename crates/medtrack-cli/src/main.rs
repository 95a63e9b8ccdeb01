//! Medtrack CLI - track medicines, dosing schedules and adherence
//!
//! This is the command-line interface for Medtrack. It drives the core
//! library's state controller and renders its derived views.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use medtrack_core::VERSION;

use crate::app::{init_logging, AppContext};
use crate::cli::{
    Cli, Commands, LogsSubcommand, MedicinesSubcommand, SchedulesSubcommand,
};
use crate::commands::{
    dashboard, logs, medicines, misc, reminders, report, schedules, session, settings,
};
use crate::config::xdg_data_dir;
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        log::error!("{:#}", e);
        let ui_ctx = ctx.ui_context();
        let error_msg = format!("{}", e);
        let (message, hint) = split_error_hint(&error_msg);
        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Split a trailing "Hint: ..." line off an error message, or supply a
/// contextual hint for common failures.
fn split_error_hint(error: &str) -> (&str, Option<String>) {
    if let Some(idx) = error.find("\nHint:") {
        let hint = error[idx + 1..].trim_start_matches("Hint:").trim();
        return (&error[..idx], Some(hint.to_string()));
    }

    if error.to_lowercase().contains("failed to parse config") {
        return (
            error,
            Some("Fix the file, or rewrite it with `medtrack config init --force`.".to_string()),
        );
    }
    (error, None)
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    if let Some(level) = cli.log_level.as_deref() {
        init_logging(level, &xdg_data_dir()?)?;
    }

    match &cli.command {
        Some(Commands::Login(args)) => {
            session::handle_login(ctx, args)?;
        }
        Some(Commands::Logout) => {
            session::handle_logout(ctx)?;
        }
        Some(Commands::Whoami) => {
            session::handle_whoami(ctx)?;
        }
        Some(Commands::Dashboard) => {
            dashboard::handle_dashboard(ctx)?;
        }
        Some(Commands::Medicines(args)) => match &args.command {
            MedicinesSubcommand::Add(add_args) => medicines::handle_add(ctx, add_args)?,
            MedicinesSubcommand::List(list_args) => medicines::handle_list(ctx, list_args)?,
            MedicinesSubcommand::Show(ref_args) => medicines::handle_show(ctx, ref_args)?,
            MedicinesSubcommand::Edit(edit_args) => medicines::handle_edit(ctx, edit_args)?,
            MedicinesSubcommand::Delete(ref_args) => medicines::handle_delete(ctx, ref_args)?,
            MedicinesSubcommand::Activate(ref_args) => {
                medicines::handle_set_active(ctx, ref_args, true)?
            }
            MedicinesSubcommand::Deactivate(ref_args) => {
                medicines::handle_set_active(ctx, ref_args, false)?
            }
        },
        Some(Commands::Schedules(args)) => match &args.command {
            SchedulesSubcommand::Add(add_args) => schedules::handle_add(ctx, add_args)?,
            SchedulesSubcommand::List(list_args) => schedules::handle_list(ctx, list_args)?,
            SchedulesSubcommand::Edit(edit_args) => schedules::handle_edit(ctx, edit_args)?,
            SchedulesSubcommand::Delete(id_args) => schedules::handle_delete(ctx, id_args)?,
            SchedulesSubcommand::Week(week_args) => schedules::handle_week(ctx, week_args)?,
        },
        Some(Commands::Logs(args)) => match &args.command {
            LogsSubcommand::Add(add_args) => logs::handle_add(ctx, add_args)?,
            LogsSubcommand::List(list_args) => logs::handle_list(ctx, list_args)?,
            LogsSubcommand::Edit(edit_args) => logs::handle_edit(ctx, edit_args)?,
            LogsSubcommand::Take(id_args) => logs::handle_take(ctx, id_args)?,
            LogsSubcommand::Skip(id_args) => logs::handle_skip(ctx, id_args)?,
            LogsSubcommand::Delete(id_args) => logs::handle_delete(ctx, id_args)?,
        },
        Some(Commands::Report(args)) => {
            report::handle_report(ctx, args)?;
        }
        Some(Commands::Reminders(args)) => {
            reminders::handle_reminders(ctx, args)?;
        }
        Some(Commands::Settings(args)) => {
            settings::handle_settings(ctx, args)?;
        }
        Some(Commands::Route(args)) => {
            misc::handle_route(ctx, args)?;
        }
        Some(Commands::Reset) => {
            session::handle_reset(ctx)?;
        }
        Some(Commands::Config(args)) => {
            misc::handle_config(ctx, args)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args.shell)?;
        }
        None => {
            println!("Medtrack v{}", VERSION);
            println!("\nQuickstart:");
            println!("  medtrack login --email demo@example.com");
            println!("  medtrack dashboard");
            println!("  medtrack medicines add \"Vitamin C\" --time 08:00");
            println!("  medtrack logs take <id>");
            println!("  medtrack report --period weekly");
            println!("\nRun `medtrack --help` for full usage.");
        }
    }

    Ok(())
}
