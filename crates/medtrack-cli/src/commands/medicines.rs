use medtrack_core::model::{Medicine, MedicineId, MedicineUpdate, NewMedicine, NewSchedule};
use medtrack_core::views::{MedicineFilter, MedicineQuery};

use crate::app::{AppContext, Workspace};
use crate::cli::{MedicineAddArgs, MedicineEditArgs, MedicineListArgs, MedicineRefArgs};
use crate::errors::CliError;
use crate::helpers::{confirm, parse_days, parse_frequency, parse_time, resolve_medicine};
use crate::output::{
    medicine_rows, print_cancelled, print_json, print_medicine, MEDICINE_COLUMNS,
};
use crate::ui::{badge, header, hint, print, receipt, short_id, table, Badge};

fn non_blank(value: &str, what: &str) -> anyhow::Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CliError::invalid_input(format!("{} must not be empty", what)).into());
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn medicine<'a>(ws: &'a Workspace, reference: &str) -> anyhow::Result<&'a Medicine> {
    let id = resolve_medicine(ws.state.entities(), reference)?;
    ws.state.entities().medicine(id).ok_or_else(|| {
        CliError::not_found(
            format!("Medicine \"{}\" not found", reference),
            "Hint: Run `medtrack medicines list` to see medicine IDs.",
        )
        .into()
    })
}

pub fn handle_add(ctx: &AppContext, args: &MedicineAddArgs) -> anyhow::Result<()> {
    let name = non_blank(&args.name, "Medicine name")?;
    let frequency = parse_frequency(&args.frequency)?;
    let days = args.days.as_deref().map(parse_days).transpose()?;

    let mut new = NewMedicine::new(name);
    if let Some(description) = optional(args.description.as_deref()) {
        new = new.with_description(description);
    }
    if let Some(dosage) = optional(args.dosage.as_deref()) {
        new = new.with_dosage(dosage, optional(args.unit.as_deref()));
    } else if args.unit.is_some() {
        return Err(CliError::invalid_input("--unit needs --dosage").into());
    }
    for time in &args.times {
        let mut schedule = NewSchedule::new(parse_time(time)?, frequency);
        if let Some(days) = days {
            schedule = schedule.with_days(days);
        }
        new = new.with_schedule(schedule);
    }

    let mut ws = ctx.load()?;
    ws.require_user()?;
    let id = ws.state.add_medicine(new)?;
    ws.save()?;

    let ui = ctx.ui_context();
    let medicine = ws.state.entities().medicine(id);
    if ui.mode.is_json() {
        return print_json(&medicine);
    }
    if ctx.quiet() {
        println!("{}", id);
        return Ok(());
    }
    let schedules = medicine.map(|m| m.schedules.len()).unwrap_or_default();
    print(
        &ui,
        &receipt(
            &ui,
            "Added medicine",
            &[
                ("ID", short_id(&id)),
                ("Name", args.name.trim().to_string()),
                ("Dose times", schedules.to_string()),
            ],
        ),
    );
    if schedules == 0 {
        print(
            &ui,
            &hint(&ui, &format!("medtrack schedules add {} --time 08:00", short_id(&id))),
        );
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &MedicineListArgs) -> anyhow::Result<()> {
    let filter: MedicineFilter = args.filter.parse()?;
    let mut query = MedicineQuery::new().filter(filter);
    if let Some(term) = optional(args.search.as_deref()) {
        query = query.search(term);
    }

    let ws = ctx.load()?;
    ws.require_user()?;
    let medicines = query.run(ws.state.entities());

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&medicines);
    }
    if medicines.is_empty() {
        print(&ui, &badge(&ui, Badge::Info, "No medicines"));
        print(&ui, &hint(&ui, "medtrack medicines add <name> --time 08:00"));
        return Ok(());
    }
    print(&ui, &header(&ui, "medicines", Some(&args.filter.to_ascii_lowercase())));
    print(&ui, &table(&ui, &MEDICINE_COLUMNS, &medicine_rows(&medicines)));
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &MedicineRefArgs) -> anyhow::Result<()> {
    let ws = ctx.load()?;
    ws.require_user()?;
    let medicine = medicine(&ws, &args.medicine)?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(medicine);
    }
    print_medicine(&ui, ws.state.entities(), medicine);
    Ok(())
}

pub fn handle_edit(ctx: &AppContext, args: &MedicineEditArgs) -> anyhow::Result<()> {
    let mut update = MedicineUpdate::new();
    if let Some(name) = args.name.as_deref() {
        update = update.name(non_blank(name, "Medicine name")?);
    }
    if args.clear_description {
        update = update.description(None);
    } else if let Some(description) = args.description.as_deref() {
        update = update.description(optional(Some(description)));
    }
    if args.clear_dosage {
        update = update.dosage(None).unit(None);
    } else {
        if let Some(dosage) = args.dosage.as_deref() {
            update = update.dosage(optional(Some(dosage)));
        }
        if let Some(unit) = args.unit.as_deref() {
            update = update.unit(optional(Some(unit)));
        }
    }
    if update.is_empty() {
        return Err(CliError::invalid_input(
            "Nothing to change. Pass --name, --description, --dosage or --unit.",
        )
        .into());
    }

    let mut ws = ctx.load()?;
    ws.require_user()?;
    let id = medicine(&ws, &args.medicine)?.id;
    ws.state.update_medicine(id, &update);
    ws.save()?;
    report_change(ctx, &ws, id, "Updated medicine")
}

pub fn handle_set_active(ctx: &AppContext, args: &MedicineRefArgs, active: bool) -> anyhow::Result<()> {
    let mut ws = ctx.load()?;
    ws.require_user()?;
    let id = medicine(&ws, &args.medicine)?.id;
    ws.state.update_medicine(id, &MedicineUpdate::new().active(active));
    ws.save()?;
    let title = if active {
        "Medicine activated"
    } else {
        "Medicine deactivated"
    };
    report_change(ctx, &ws, id, title)
}

fn report_change(
    ctx: &AppContext,
    ws: &Workspace,
    id: MedicineId,
    title: &str,
) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let medicine = ws.state.entities().medicine(id);
    if ui.mode.is_json() {
        return print_json(&medicine);
    }
    if ctx.quiet() {
        return Ok(());
    }
    let name = medicine.map(|m| m.name.clone()).unwrap_or_default();
    print(&ui, &receipt(&ui, title, &[("ID", short_id(&id)), ("Name", name)]));
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &MedicineRefArgs) -> anyhow::Result<()> {
    let mut ws = ctx.load()?;
    ws.require_user()?;
    let (id, name, logs) = {
        let medicine = medicine(&ws, &args.medicine)?;
        let logs = ws.state.entities().logs_for_medicine(medicine.id).count();
        (medicine.id, medicine.name.clone(), logs)
    };

    let ui = ctx.ui_context();
    if !confirm(ctx, &format!("Delete {} and its {} dose log(s)?", name, logs))? {
        return print_cancelled(&ui, "delete", "Delete cancelled");
    }

    let deleted = ws.state.delete_medicine(id).ok_or_else(|| {
        CliError::not_found(
            format!("Medicine \"{}\" not found", args.medicine),
            "Hint: Run `medtrack medicines list` to see medicine IDs.",
        )
    })?;
    ws.save()?;

    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "deleted": deleted.medicine.id,
            "name": deleted.medicine.name,
            "removedLogs": deleted.removed_logs,
        }));
    }
    if !ctx.quiet() {
        print(
            &ui,
            &receipt(
                &ui,
                "Deleted medicine",
                &[
                    ("Name", deleted.medicine.name.clone()),
                    ("Removed logs", deleted.removed_logs.to_string()),
                ],
            ),
        );
    }
    Ok(())
}
