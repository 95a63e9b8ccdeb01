use medtrack_core::model::{LogId, LogStatus, LogUpdate, MedicationLog};
use medtrack_core::views::{LogQuery, LogSummary};

use crate::app::{AppContext, Workspace};
use crate::cli::{IdArgs, LogAddArgs, LogEditArgs, LogListArgs};
use crate::constants::DEFAULT_LOG_LIMIT;
use crate::errors::CliError;
use crate::helpers::{
    confirm, parse_date, parse_datetime, parse_status, resolve_log, resolve_medicine,
};
use crate::output::{
    log_json, log_rows, logs_json, print_cancelled, print_json, LOG_COLUMNS,
};
use crate::ui::{
    badge, format_datetime, header, hint, kv, print, receipt, short_id, table, Badge,
};

const LIST_HINT: &str = "Hint: Run `medtrack logs list` to see log IDs.";

fn log_not_found(reference: &str) -> anyhow::Error {
    CliError::not_found(format!("Log \"{}\" not found", reference), LIST_HINT).into()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn handle_add(ctx: &AppContext, args: &LogAddArgs) -> anyhow::Result<()> {
    let status = parse_status(&args.status)?;

    let mut ws = ctx.load()?;
    ws.require_user()?;
    let medicine_id = resolve_medicine(ws.state.entities(), &args.medicine)?;
    let today = ws.state.today();
    let at = match args.at.as_deref() {
        Some(value) => parse_datetime(value, today)?,
        None => ws.state.now(),
    };
    let id = ws
        .state
        .quick_log(medicine_id, at, status, non_blank(args.notes.as_deref()));
    ws.save()?;
    report_log(ctx, &ws, id, "Recorded dose")
}

pub fn handle_list(ctx: &AppContext, args: &LogListArgs) -> anyhow::Result<()> {
    let mut ws = ctx.load()?;
    ws.require_user()?;
    let today = ws.state.today();

    let mut query = LogQuery::new();
    if let Some(value) = args.date.as_deref() {
        query = query.date(parse_date(value, today)?);
    }
    for status in &args.status {
        query = query.status(parse_status(status)?);
    }
    if let Some(medicine) = args.medicine.as_deref() {
        query = query.medicine(resolve_medicine(ws.state.entities(), medicine)?);
    }
    // Without a day to narrow on, cap the history shown.
    match args.limit {
        Some(limit) => query = query.limit(limit),
        None if args.date.is_none() => query = query.limit(DEFAULT_LOG_LIMIT),
        None => {}
    }

    let store = ws.state.entities();
    let logs = query.run(store);

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&logs_json(store, &logs)?);
    }
    if logs.is_empty() {
        print(&ui, &badge(&ui, Badge::Info, "No dose logs"));
        print(&ui, &hint(&ui, "medtrack logs add <medicine>"));
        return Ok(());
    }
    let context = args.date.as_deref().unwrap_or("recent");
    print(&ui, &header(&ui, "logs", Some(context)));
    print(&ui, &table(&ui, &LOG_COLUMNS, &log_rows(&ui, store, &logs)));

    let summary = LogSummary::from_logs(logs.iter().copied());
    print(
        &ui,
        &kv(
            &ui,
            "Summary",
            &format!(
                "{} taken, {} scheduled, {} missed, {} skipped",
                summary.completed, summary.pending, summary.missed, summary.skipped
            ),
        ),
    );
    Ok(())
}

pub fn handle_edit(ctx: &AppContext, args: &LogEditArgs) -> anyhow::Result<()> {
    let mut ws = ctx.load()?;
    ws.require_user()?;
    let today = ws.state.today();

    let mut update = LogUpdate::new();
    if let Some(status) = args.status.as_deref() {
        update = update.status(parse_status(status)?);
    }
    if let Some(value) = args.scheduled.as_deref() {
        update = update.scheduled_time(parse_datetime(value, today)?);
    }
    if args.clear_taken {
        update = update.taken_time(None);
    } else if let Some(value) = args.taken.as_deref() {
        update = update.taken_time(Some(parse_datetime(value, today)?));
    }
    if args.clear_notes {
        update = update.notes(None);
    } else if let Some(notes) = args.notes.as_deref() {
        update = update.notes(non_blank(Some(notes)));
    }
    if update.is_empty() {
        return Err(CliError::invalid_input(
            "Nothing to change. Pass --status, --scheduled, --taken or --notes.",
        )
        .into());
    }

    let id = resolve_log(ws.state.entities(), &args.id)?;
    if !ws.state.update_log(id, &update) {
        return Err(log_not_found(&args.id));
    }
    ws.save()?;
    report_log(ctx, &ws, id, "Updated dose")
}

/// Mark a dose taken at the current time.
pub fn handle_take(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let mut ws = ctx.load()?;
    ws.require_user()?;
    let id = resolve_log(ws.state.entities(), &args.id)?;
    let update = LogUpdate::new()
        .status(LogStatus::Completed)
        .taken_time(Some(ws.state.now()));
    if !ws.state.update_log(id, &update) {
        return Err(log_not_found(&args.id));
    }
    ws.save()?;
    report_log(ctx, &ws, id, "Dose taken")
}

pub fn handle_skip(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let mut ws = ctx.load()?;
    ws.require_user()?;
    let id = resolve_log(ws.state.entities(), &args.id)?;
    let update = LogUpdate::new().status(LogStatus::Skipped).taken_time(None);
    if !ws.state.update_log(id, &update) {
        return Err(log_not_found(&args.id));
    }
    ws.save()?;
    report_log(ctx, &ws, id, "Dose skipped")
}

pub fn handle_delete(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let mut ws = ctx.load()?;
    ws.require_user()?;
    let id = resolve_log(ws.state.entities(), &args.id)?;
    let label = match ws.state.entities().log(id) {
        Some(log) => describe(&ws, log),
        None => return Err(log_not_found(&args.id)),
    };

    let ui = ctx.ui_context();
    if !confirm(ctx, &format!("Delete the log for {}?", label))? {
        return print_cancelled(&ui, "delete", "Delete cancelled");
    }
    let deleted = ws.state.delete_log(id).ok_or_else(|| log_not_found(&args.id))?;
    ws.save()?;

    if ui.mode.is_json() {
        return print_json(&deleted);
    }
    if !ctx.quiet() {
        print(&ui, &badge(&ui, Badge::Ok, &format!("Deleted log for {}", label)));
    }
    Ok(())
}

fn describe(ws: &Workspace, log: &MedicationLog) -> String {
    format!(
        "{} at {}",
        ws.state.entities().medicine_name(log.medicine_id),
        format_datetime(&log.scheduled_time, true)
    )
}

fn report_log(ctx: &AppContext, ws: &Workspace, id: LogId, title: &str) -> anyhow::Result<()> {
    let store = ws.state.entities();
    let log = store.log(id).ok_or_else(|| log_not_found(&id.to_string()))?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&log_json(store, log)?);
    }
    if ctx.quiet() {
        println!("{}", id);
        return Ok(());
    }
    let pretty = ui.mode.is_pretty();
    let mut items = vec![
        ("ID", short_id(&log.id)),
        ("Medicine", store.medicine_name(log.medicine_id).to_string()),
        ("Scheduled", format_datetime(&log.scheduled_time, pretty)),
        ("Status", log.status.label().to_string()),
    ];
    if let Some(taken) = log.taken_time {
        items.push(("Taken", format_datetime(&taken, pretty)));
    }
    if let Some(notes) = log.notes.as_deref() {
        items.push(("Notes", notes.to_string()));
    }
    print(&ui, &receipt(&ui, title, &items));
    Ok(())
}
