use medtrack_core::model::{Medicine, NewSchedule, Schedule, ScheduleUpdate};
use medtrack_core::views::MedicineFilter;

use crate::app::{AppContext, Workspace};
use crate::cli::{IdArgs, ScheduleAddArgs, ScheduleEditArgs, ScheduleListArgs, WeekArgs};
use crate::errors::CliError;
use crate::helpers::{
    confirm, parse_date, parse_days, parse_frequency, parse_time, resolve_medicine,
    resolve_schedule,
};
use crate::output::{
    print_cancelled, print_json, print_week, schedule_rows, week_json, SCHEDULE_COLUMNS,
};
use crate::ui::{badge, header, hint, print, receipt, short_id, table, Badge};

const LIST_HINT: &str = "Hint: Run `medtrack schedules list` to see schedule IDs.";

fn schedule<'a>(ws: &'a Workspace, id: &str) -> anyhow::Result<(&'a Medicine, &'a Schedule)> {
    let id = resolve_schedule(ws.state.entities(), id)?;
    ws.state
        .entities()
        .schedule(id)
        .ok_or_else(|| CliError::not_found(format!("Schedule {} not found", id), LIST_HINT).into())
}

pub fn handle_add(ctx: &AppContext, args: &ScheduleAddArgs) -> anyhow::Result<()> {
    let mut new = NewSchedule::new(parse_time(&args.time)?, parse_frequency(&args.frequency)?);
    if let Some(days) = args.days.as_deref() {
        new = new.with_days(parse_days(days)?);
    }

    let mut ws = ctx.load()?;
    ws.require_user()?;
    let medicine_id = resolve_medicine(ws.state.entities(), &args.medicine)?;
    let id = ws.state.add_schedule(medicine_id, new).ok_or_else(|| {
        CliError::not_found(
            format!("Medicine \"{}\" not found", args.medicine),
            "Hint: Run `medtrack medicines list` to see medicine IDs.",
        )
    })?;
    ws.save()?;
    report_schedule(ctx, &ws, &id.to_string(), "Added schedule")
}

pub fn handle_list(ctx: &AppContext, args: &ScheduleListArgs) -> anyhow::Result<()> {
    let filter: MedicineFilter = args.filter.parse()?;
    let ws = ctx.load()?;
    ws.require_user()?;
    let store = ws.state.entities();
    let only = args
        .medicine
        .as_deref()
        .map(|m| resolve_medicine(store, m))
        .transpose()?;

    let mut rows: Vec<(&Medicine, &Schedule)> = store
        .medicines()
        .iter()
        .filter(|m| only.map_or(true, |id| m.id == id))
        .flat_map(|m| m.schedules.iter().map(move |s| (m, s)))
        .filter(|(_, s)| match filter {
            MedicineFilter::All => true,
            MedicineFilter::Active => s.active,
            MedicineFilter::Inactive => !s.active,
        })
        .collect();
    rows.sort_by_key(|(_, s)| s.scheduled_time);

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        let schedules: Vec<&Schedule> = rows.iter().map(|(_, s)| *s).collect();
        return print_json(&schedules);
    }
    if rows.is_empty() {
        print(&ui, &badge(&ui, Badge::Info, "No schedules"));
        print(&ui, &hint(&ui, "medtrack schedules add <medicine> --time 08:00"));
        return Ok(());
    }
    print(&ui, &header(&ui, "schedules", None));
    print(&ui, &table(&ui, &SCHEDULE_COLUMNS, &schedule_rows(&rows)));
    Ok(())
}

pub fn handle_edit(ctx: &AppContext, args: &ScheduleEditArgs) -> anyhow::Result<()> {
    let mut update = ScheduleUpdate::new();
    if let Some(time) = args.time.as_deref() {
        update = update.time(parse_time(time)?);
    }
    if let Some(frequency) = args.frequency.as_deref() {
        update = update.frequency(parse_frequency(frequency)?);
    }
    if args.every_day {
        update = update.days(None);
    } else if let Some(days) = args.days.as_deref() {
        update = update.days(Some(parse_days(days)?));
    }
    if args.pause {
        update = update.active(false);
    } else if args.resume {
        update = update.active(true);
    }
    if update.is_empty() {
        return Err(CliError::invalid_input(
            "Nothing to change. Pass --time, --frequency, --days, --every-day, --pause or --resume.",
        )
        .into());
    }

    let mut ws = ctx.load()?;
    ws.require_user()?;
    let id = schedule(&ws, &args.id)?.1.id;
    ws.state.update_schedule(id, &update);
    ws.save()?;
    report_schedule(ctx, &ws, &id.to_string(), "Updated schedule")
}

fn report_schedule(ctx: &AppContext, ws: &Workspace, id: &str, title: &str) -> anyhow::Result<()> {
    let (medicine, schedule) = schedule(ws, id)?;
    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(schedule);
    }
    if ctx.quiet() {
        return Ok(());
    }
    print(
        &ui,
        &receipt(
            &ui,
            title,
            &[
                ("ID", short_id(&schedule.id)),
                ("Medicine", medicine.name.clone()),
                ("Time", schedule.scheduled_time.to_string()),
                ("Days", schedule.effective_days().label()),
                ("Status", if schedule.active { "active" } else { "paused" }.to_string()),
            ],
        ),
    );
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let mut ws = ctx.load()?;
    ws.require_user()?;
    let (id, label) = {
        let (medicine, schedule) = schedule(&ws, &args.id)?;
        (
            schedule.id,
            format!("{} at {}", medicine.name, schedule.scheduled_time),
        )
    };

    let ui = ctx.ui_context();
    if !confirm(ctx, &format!("Delete the schedule for {}?", label))? {
        return print_cancelled(&ui, "delete", "Delete cancelled");
    }
    if !ws.state.delete_schedule(id) {
        return Err(CliError::not_found(format!("Schedule {} not found", args.id), LIST_HINT).into());
    }
    ws.save()?;

    if ui.mode.is_json() {
        return print_json(&serde_json::json!({ "deleted": id }));
    }
    if !ctx.quiet() {
        print(&ui, &badge(&ui, Badge::Ok, &format!("Deleted schedule for {}", label)));
    }
    Ok(())
}

pub fn handle_week(ctx: &AppContext, args: &WeekArgs) -> anyhow::Result<()> {
    let mut ws = ctx.load()?;
    ws.require_user()?;
    let today = ws.state.today();
    let anchor = match args.date.as_deref() {
        Some(value) => parse_date(value, today)?,
        None => today,
    };
    let week = ws.state.week_calendar(anchor);

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&week_json(&week));
    }
    print_week(&ui, &week);
    Ok(())
}
