use medtrack_core::model::MedicationLog;
use serde_json::json;

use crate::app::AppContext;
use crate::cli::RemindersArgs;
use crate::helpers::parse_duration;
use crate::output::{log_rows, logs_json, print_json, LOG_COLUMNS};
use crate::ui::{badge, blank_line, header, hint, print, simple_table, Badge};

pub fn handle_reminders(ctx: &AppContext, args: &RemindersArgs) -> anyhow::Result<()> {
    let window = parse_duration(&args.window)?;

    let mut ws = ctx.load()?;
    ws.require_user()?;
    let sweep = if args.sweep {
        let outcome = ws.state.sweep_doses();
        ws.save()?;
        Some(outcome)
    } else {
        None
    };

    let overdue: Vec<MedicationLog> = ws.state.overdue_logs().into_iter().cloned().collect();
    let overdue_refs: Vec<&MedicationLog> = overdue.iter().collect();
    let state = &ws.state;
    let enabled = state.settings().notifications().enabled;
    let reminders = state.due_reminders(window);

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&json!({
            "notificationsEnabled": enabled,
            "reminders": reminders,
            "overdue": logs_json(state.entities(), &overdue_refs)?,
            "sweep": sweep.map(|s| json!({ "created": s.created, "missed": s.missed })),
        }));
    }

    print(&ui, &header(&ui, "reminders", Some(&args.window)));
    if let Some(outcome) = sweep {
        print(
            &ui,
            &badge(
                &ui,
                Badge::Info,
                &format!(
                    "Sweep: {} dose log(s) created, {} marked missed",
                    outcome.created, outcome.missed
                ),
            ),
        );
    }
    if !enabled {
        print(&ui, &badge(&ui, Badge::Warn, "Notifications are off"));
        print(&ui, &hint(&ui, "medtrack settings notifications --enable"));
    } else if reminders.is_empty() {
        print(&ui, &badge(&ui, Badge::Ok, "No reminders due"));
    } else {
        for reminder in &reminders {
            print(&ui, &badge(&ui, Badge::Info, &reminder.message()));
        }
    }

    if !overdue_refs.is_empty() {
        blank_line(&ui);
        print(&ui, &badge(&ui, Badge::Err, "Overdue"));
        let rows = log_rows(&ui, state.entities(), &overdue_refs);
        print(&ui, &simple_table(&ui, &LOG_COLUMNS, &rows));
    }
    Ok(())
}
