//! Text and table output formatting.

use medtrack_core::model::{MedicationLog, Medicine, Schedule};
use medtrack_core::views::{AdherenceReport, WeekCalendar};
use medtrack_core::EntityStore;

use crate::ui::format::single_line;
use crate::ui::theme::{status_label, styled, styles};
use crate::ui::{
    badge, blank_line, format_date, format_datetime, format_rate, header, kv, print, short_id,
    simple_table, table, truncate, Badge, Column, UiContext,
};

const NOTES_MAX: usize = 40;

pub const MEDICINE_COLUMNS: [Column; 5] = [
    Column::new("ID"),
    Column::new("Name"),
    Column::new("Dosage"),
    Column::new("Times"),
    Column::new("Status"),
];

pub const SCHEDULE_COLUMNS: [Column; 6] = [
    Column::new("ID"),
    Column::new("Medicine"),
    Column::new("Time"),
    Column::new("Frequency"),
    Column::new("Days"),
    Column::new("Status"),
];

pub const LOG_COLUMNS: [Column; 6] = [
    Column::new("ID"),
    Column::new("Scheduled"),
    Column::new("Medicine"),
    Column::new("Status"),
    Column::new("Taken"),
    Column::new("Notes"),
];

fn active_label(active: bool) -> &'static str {
    if active {
        "active"
    } else {
        "inactive"
    }
}

fn schedule_times(medicine: &Medicine) -> String {
    let times: Vec<String> = medicine
        .active_schedules()
        .map(|s| s.scheduled_time.to_string())
        .collect();
    if times.is_empty() {
        "-".to_string()
    } else {
        times.join(", ")
    }
}

pub fn medicine_rows(medicines: &[&Medicine]) -> Vec<Vec<String>> {
    medicines
        .iter()
        .map(|m| {
            vec![
                short_id(&m.id),
                m.name.clone(),
                m.dosage_label().unwrap_or_else(|| "-".to_string()),
                schedule_times(m),
                active_label(m.active).to_string(),
            ]
        })
        .collect()
}

pub fn schedule_rows(rows: &[(&Medicine, &Schedule)]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|(medicine, schedule)| {
            vec![
                short_id(&schedule.id),
                medicine.name.clone(),
                schedule.scheduled_time.to_string(),
                schedule.frequency.to_string(),
                schedule.effective_days().label(),
                if schedule.active { "active" } else { "paused" }.to_string(),
            ]
        })
        .collect()
}

pub fn log_rows(ctx: &UiContext, store: &EntityStore, logs: &[&MedicationLog]) -> Vec<Vec<String>> {
    let pretty = ctx.mode.is_pretty();
    logs.iter()
        .map(|log| {
            let status = if pretty {
                status_label(log.status, ctx.color)
            } else {
                log.status.to_string()
            };
            vec![
                short_id(&log.id),
                format_datetime(&log.scheduled_time, pretty),
                store.medicine_name(log.medicine_id).to_string(),
                status,
                log.taken_time
                    .map(|t| format_datetime(&t, pretty))
                    .unwrap_or_else(|| "-".to_string()),
                log.notes
                    .as_deref()
                    .map(|n| truncate(&single_line(n), NOTES_MAX))
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect()
}

/// Full detail for one medicine: fields, schedules and recent log counts.
pub fn print_medicine(ctx: &UiContext, store: &EntityStore, medicine: &Medicine) {
    print(ctx, &header(ctx, "medicine", Some(&medicine.name)));
    print(ctx, &kv(ctx, "ID", &medicine.id.to_string()));
    print(ctx, &kv(ctx, "Name", &medicine.name));
    if let Some(description) = medicine.description.as_deref() {
        print(ctx, &kv(ctx, "Description", &single_line(description)));
    }
    if let Some(dosage) = medicine.dosage_label() {
        print(ctx, &kv(ctx, "Dosage", &dosage));
    }
    print(ctx, &kv(ctx, "Status", active_label(medicine.active)));
    print(ctx, &kv(ctx, "Logs", &store.logs_for_medicine(medicine.id).count().to_string()));
    blank_line(ctx);

    if medicine.schedules.is_empty() {
        print(ctx, &badge(ctx, Badge::Info, "No schedules"));
        return;
    }
    let rows: Vec<(&Medicine, &Schedule)> =
        medicine.schedules.iter().map(|s| (medicine, s)).collect();
    print(ctx, &table(ctx, &SCHEDULE_COLUMNS, &schedule_rows(&rows)));
}

/// Seven-day grid, one block per day.
pub fn print_week(ctx: &UiContext, week: &WeekCalendar<'_>) {
    let pretty = ctx.mode.is_pretty();
    let range = format!("{} to {}", week.start, week.end());
    print(ctx, &header(ctx, "week", Some(&range)));

    for day in &week.days {
        if pretty {
            blank_line(ctx);
            print(ctx, &styled(&format_date(&day.date, true), styles::bold(), ctx.color));
            if day.cells.is_empty() {
                print(ctx, "  -");
            }
            for cell in &day.cells {
                print(
                    ctx,
                    &format!(
                        "  {}  {}  {}",
                        cell.schedule.scheduled_time,
                        status_label(cell.status(), ctx.color),
                        cell.medicine.name
                    ),
                );
            }
        } else {
            for cell in &day.cells {
                print(
                    ctx,
                    &format!(
                        "{}\t{}\t{}\t{}",
                        format_date(&day.date, false),
                        cell.schedule.scheduled_time,
                        cell.status(),
                        cell.medicine.name
                    ),
                );
            }
        }
    }
}

pub fn print_report(ctx: &UiContext, report: &AdherenceReport) {
    let range = format!("{} to {}", report.start, report.end);
    print(ctx, &header(ctx, "report", Some(&format!("{}, {}", report.period, range))));

    let summary = &report.summary;
    let rate = format_rate(summary.adherence_rate);
    let rate = if ctx.mode.is_pretty() {
        badge(ctx, Badge::for_rate(summary.adherence_rate), &rate)
    } else {
        rate
    };
    print(ctx, &kv(ctx, "Adherence", &rate));
    print(ctx, &kv(ctx, "Scheduled", &summary.total_scheduled.to_string()));
    print(ctx, &kv(ctx, "Taken", &summary.total_taken.to_string()));
    print(ctx, &kv(ctx, "Missed", &summary.total_missed.to_string()));
    if let Some(band) = summary.most_missed_time {
        print(ctx, &kv(ctx, "Most missed", band.label()));
    }
    if let Some(best) = summary.best_adherence_medicine.as_deref() {
        print(ctx, &kv(ctx, "Best", best));
    }
    if let Some(worst) = summary.worst_adherence_medicine.as_deref() {
        print(ctx, &kv(ctx, "Worst", worst));
    }

    if !report.medicines.is_empty() {
        blank_line(ctx);
        let columns = [
            Column::new("Medicine"),
            Column::new("Scheduled"),
            Column::new("Taken"),
            Column::new("Missed"),
            Column::new("Adherence"),
            Column::new("Missed at"),
        ];
        let rows: Vec<Vec<String>> = report
            .medicines
            .iter()
            .map(|m| {
                vec![
                    m.medicine_name.clone(),
                    m.scheduled_count.to_string(),
                    m.taken_count.to_string(),
                    m.missed_count.to_string(),
                    format_rate(m.adherence_rate),
                    if m.missed_times.is_empty() {
                        "-".to_string()
                    } else {
                        m.missed_times.join(", ")
                    },
                ]
            })
            .collect();
        print(ctx, &simple_table(ctx, &columns, &rows));
    }

    blank_line(ctx);
    for recommendation in &report.recommendations {
        if ctx.mode.is_pretty() {
            print(ctx, &format!("  \u{2022} {}", recommendation));
        } else {
            print(ctx, &kv(ctx, "recommendation", recommendation));
        }
    }
}
