//! Profile, notification and theme preferences.

use serde_json::json;

use medtrack_core::model::{NotificationSettings, NotificationUpdate, ProfileUpdate, ResolvedTheme, Theme};

use crate::app::{parse_timezone, AppContext};
use crate::cli::{NotificationsArgs, ProfileArgs, SettingsArgs, SettingsSubcommand, ThemeArgs};
use crate::errors::CliError;
use crate::output::print_json;
use crate::ui::{badge, blank_line, header, kv, print, Badge, UiContext};

pub fn handle_settings(ctx: &AppContext, args: &SettingsArgs) -> anyhow::Result<()> {
    match &args.command {
        None | Some(SettingsSubcommand::Show) => handle_show(ctx),
        Some(SettingsSubcommand::Profile(profile)) => handle_profile(ctx, profile),
        Some(SettingsSubcommand::Notifications(notifications)) => {
            handle_notifications(ctx, notifications)
        }
        Some(SettingsSubcommand::Theme(theme)) => handle_theme(ctx, theme),
    }
}

fn resolved_label(theme: ResolvedTheme) -> &'static str {
    match theme {
        ResolvedTheme::Light => "light",
        ResolvedTheme::Dark => "dark",
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn weekday_name(day: u8) -> &'static str {
    const NAMES: [&str; 7] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];
    NAMES.get(usize::from(day)).copied().unwrap_or("?")
}

fn print_notifications(ui: &UiContext, settings: &NotificationSettings) {
    print(ui, &kv(ui, "Reminders", on_off(settings.enabled)));
    print(
        ui,
        &kv(ui, "Remind before", &format!("{} min", settings.reminder_minutes)),
    );
    let missed = if settings.missed_medication_minutes == 0 {
        "never".to_string()
    } else {
        format!("{} min", settings.missed_medication_minutes)
    };
    print(ui, &kv(ui, "Missed after", &missed));
    let weekly = if settings.weekly_report_enabled {
        weekday_name(settings.weekly_report_day).to_string()
    } else {
        "off".to_string()
    };
    print(ui, &kv(ui, "Weekly report", &weekly));
}

fn handle_show(ctx: &AppContext) -> anyhow::Result<()> {
    let ws = ctx.load()?;
    let settings = ws.state.settings();
    let prefers_dark = ctx.prefers_dark()?;
    let theme = settings.theme();
    let resolved = resolved_label(settings.resolved_theme(prefers_dark));

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&json!({
            "profile": settings.profile(),
            "notifications": settings.notifications(),
            "theme": theme,
            "resolvedTheme": resolved,
        }));
    }

    print(&ui, &header(&ui, "settings", None));
    match settings.profile() {
        Some(profile) => {
            print(&ui, &kv(&ui, "Name", profile.greeting_name()));
            print(&ui, &kv(&ui, "Email", &profile.email));
            print(&ui, &kv(&ui, "Timezone", &profile.timezone));
            print(&ui, &kv(&ui, "Account alerts", on_off(profile.notification_enabled)));
        }
        None => print(&ui, &badge(&ui, Badge::Info, "Not signed in")),
    }
    blank_line(&ui);
    print_notifications(&ui, settings.notifications());
    blank_line(&ui);
    print(&ui, &kv(&ui, "Theme", &format!("{} ({})", theme, resolved)));
    Ok(())
}

fn handle_profile(ctx: &AppContext, args: &ProfileArgs) -> anyhow::Result<()> {
    let mut update = ProfileUpdate::default();
    if args.clear_display_name {
        update.display_name = Some(None);
    } else if let Some(name) = args.display_name.as_deref() {
        let name = name.trim();
        update.display_name = Some((!name.is_empty()).then(|| name.to_string()));
    }
    if let Some(timezone) = args.timezone.as_deref() {
        update.timezone = Some(parse_timezone(timezone)?.name().to_string());
    }
    update.notification_enabled = args.notifications;
    if update.is_empty() {
        return Err(CliError::invalid_input(
            "Nothing to change. Pass --display-name, --timezone or --notifications.",
        )
        .into());
    }

    let mut ws = ctx.load()?;
    ws.require_user()?;
    ws.state.update_profile(&update)?;
    ws.save()?;

    let ui = ctx.ui_context();
    let profile = ws.require_user()?;
    if ui.mode.is_json() {
        return print_json(profile);
    }
    if !ctx.quiet() {
        print(&ui, &badge(&ui, Badge::Ok, "Profile updated"));
        print(&ui, &kv(&ui, "Name", profile.greeting_name()));
        print(&ui, &kv(&ui, "Timezone", &profile.timezone));
        print(&ui, &kv(&ui, "Account alerts", on_off(profile.notification_enabled)));
    }
    Ok(())
}

fn handle_notifications(ctx: &AppContext, args: &NotificationsArgs) -> anyhow::Result<()> {
    let update = NotificationUpdate {
        enabled: if args.enable {
            Some(true)
        } else if args.disable {
            Some(false)
        } else {
            None
        },
        reminder_minutes: args.reminder_minutes,
        missed_medication_minutes: args.missed_minutes,
        weekly_report_enabled: args.weekly_report,
        weekly_report_day: args.weekly_report_day,
    };

    let mut ws = ctx.load()?;
    if !update.is_empty() {
        ws.state.update_notifications(&update)?;
        ws.save()?;
    }

    let ui = ctx.ui_context();
    let settings = ws.state.settings().notifications();
    if ui.mode.is_json() {
        return print_json(settings);
    }
    if ctx.quiet() {
        return Ok(());
    }
    if !update.is_empty() {
        print(&ui, &badge(&ui, Badge::Ok, "Notification settings updated"));
    }
    print_notifications(&ui, settings);
    Ok(())
}

fn handle_theme(ctx: &AppContext, args: &ThemeArgs) -> anyhow::Result<()> {
    let mut ws = ctx.load()?;
    let changed = match args.theme.as_deref() {
        Some(value) => {
            let theme: Theme = value.parse()?;
            ws.state.set_theme(theme);
            ws.save()?;
            true
        }
        None => false,
    };

    let settings = ws.state.settings();
    let theme = settings.theme();
    let resolved = resolved_label(settings.resolved_theme(ctx.prefers_dark()?));

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&json!({ "theme": theme, "resolvedTheme": resolved }));
    }
    if ctx.quiet() {
        return Ok(());
    }
    if changed {
        print(&ui, &badge(&ui, Badge::Ok, &format!("Theme set to {}", theme)));
    }
    print(&ui, &kv(&ui, "Theme", theme.as_str()));
    print(&ui, &kv(&ui, "Resolved", resolved));
    Ok(())
}
