use chrono::Duration;
use serde_json::json;

use medtrack_core::model::MedicationLog;
use medtrack_core::views::medicine_totals;

use crate::app::AppContext;
use crate::output::{log_rows, logs_json, print_json, LOG_COLUMNS};
use crate::ui::{
    badge, blank_line, format_date, header, hint, kv, print, simple_table, Badge,
};

/// How far ahead the dashboard looks for reminders.
const REMINDER_LOOKAHEAD_MINUTES: i64 = 60;

pub fn handle_dashboard(ctx: &AppContext) -> anyhow::Result<()> {
    let mut ws = ctx.load()?;
    let greeting = ws.require_user()?.greeting_name().to_string();

    let today = ws.state.today();
    let stats = ws.state.today_stats();
    let pending: Vec<MedicationLog> = ws.state.pending_medications().into_iter().cloned().collect();
    let state = &ws.state;
    let totals = medicine_totals(state.entities());
    let reminders = state.due_reminders(Duration::minutes(REMINDER_LOOKAHEAD_MINUTES));
    let pending_refs: Vec<&MedicationLog> = pending.iter().collect();

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&json!({
            "date": today,
            "greeting": greeting,
            "stats": stats,
            "medicines": totals,
            "pending": logs_json(state.entities(), &pending_refs)?,
            "reminders": reminders,
        }));
    }

    let pretty = ui.mode.is_pretty();
    print(&ui, &header(&ui, "dashboard", Some(&format_date(&today, pretty))));
    if pretty {
        print(&ui, &format!("Hello, {}", greeting));
    }
    blank_line(&ui);

    let taken = format!("{} of {} taken", stats.completed, stats.total);
    let rate = format!("{}%", stats.adherence_rate);
    let rate = if pretty {
        badge(&ui, Badge::for_rate(f64::from(stats.adherence_rate)), &rate)
    } else {
        rate
    };
    print(&ui, &kv(&ui, "Today", &taken));
    print(&ui, &kv(&ui, "Adherence", &rate));
    print(&ui, &kv(&ui, "Pending", &stats.pending.to_string()));
    print(&ui, &kv(&ui, "Missed", &stats.missed.to_string()));
    if stats.skipped > 0 {
        print(&ui, &kv(&ui, "Skipped", &stats.skipped.to_string()));
    }
    print(
        &ui,
        &kv(
            &ui,
            "Medicines",
            &format!(
                "{} active of {}, {} dose times",
                totals.active_medicines, totals.medicines, totals.active_schedules
            ),
        ),
    );
    blank_line(&ui);

    if pending_refs.is_empty() {
        print(&ui, &badge(&ui, Badge::Ok, "Nothing due right now"));
    } else {
        print(&ui, &badge(&ui, Badge::Info, "Due now"));
        let rows = log_rows(&ui, state.entities(), &pending_refs);
        print(&ui, &simple_table(&ui, &LOG_COLUMNS, &rows));
    }

    if !reminders.is_empty() {
        blank_line(&ui);
        for reminder in &reminders {
            print(&ui, &badge(&ui, Badge::Info, &reminder.message()));
        }
    }

    if pretty && !pending_refs.is_empty() {
        blank_line(&ui);
        print(&ui, &hint(&ui, "medtrack logs take <id>"));
    }
    Ok(())
}
