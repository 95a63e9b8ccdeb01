//! Sign-in, sign-out and full reset.

use std::io::IsTerminal;

use serde_json::json;

use medtrack_core::session::DEMO_EMAIL;
use medtrack_core::{AppState, JsonFileStore, MedtrackError};

use crate::app::AppContext;
use crate::cli::LoginArgs;
use crate::errors::CliError;
use crate::helpers::confirm;
use crate::output::{print_cancelled, print_json};
use crate::ui::{badge, hint, kv, print, receipt, Badge};

pub fn handle_login(ctx: &AppContext, args: &LoginArgs) -> anyhow::Result<()> {
    let email = match args.email.as_deref() {
        Some(email) => email.to_string(),
        None => prompt_email()?,
    };

    let mut ws = ctx.load()?;
    let profile = ws.state.login(&email)?.clone();
    ws.save()?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&json!({
            "user": profile,
            "token": ws.state.auth_token(),
        }));
    }
    if ctx.quiet() {
        return Ok(());
    }
    let medicines = ws.state.entities().medicines().len();
    print(
        &ui,
        &receipt(
            &ui,
            &format!("Signed in as {}", profile.greeting_name()),
            &[
                ("Email", profile.email.clone()),
                ("Sample medicines", medicines.to_string()),
            ],
        ),
    );
    print(&ui, &hint(&ui, "medtrack dashboard"));
    Ok(())
}

fn prompt_email() -> anyhow::Result<String> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "Email required. Pass --email demo@example.com (or test@example.com).",
        )
        .into());
    }
    let email = dialoguer::Input::<String>::new()
        .with_prompt("Email")
        .default(DEMO_EMAIL.to_string())
        .interact_text()?;
    Ok(email)
}

pub fn handle_logout(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    if !confirm(ctx, "Sign out and delete all medicines, logs and settings?")? {
        return print_cancelled(&ui, "logout", "Logout cancelled");
    }

    let mut ws = ctx.load()?;
    ws.state.logout();
    ws.save()?;

    if ui.mode.is_json() {
        return print_json(&json!({ "status": "signed_out" }));
    }
    if !ctx.quiet() {
        print(&ui, &badge(&ui, Badge::Ok, "Signed out; stored data cleared"));
    }
    Ok(())
}

pub fn handle_whoami(ctx: &AppContext) -> anyhow::Result<()> {
    let ws = ctx.load()?;
    let profile = ws.require_user()?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(profile);
    }
    print(&ui, &kv(&ui, "Name", profile.greeting_name()));
    print(&ui, &kv(&ui, "Email", &profile.email));
    print(&ui, &kv(&ui, "User ID", &profile.id.to_string()));
    print(&ui, &kv(&ui, "Timezone", &profile.timezone));
    print(
        &ui,
        &kv(
            &ui,
            "Notifications",
            if profile.notification_enabled { "on" } else { "off" },
        ),
    );
    if let Some(line) = profile.line_user_id.as_deref() {
        print(&ui, &kv(&ui, "LINE user", line));
    }
    if let Some(at) = profile.last_login_at {
        print(&ui, &kv(&ui, "Last login", &at.format("%Y-%m-%d %H:%M UTC").to_string()));
    }
    Ok(())
}

/// Clear everything. Works even when the state file no longer parses: such
/// a file is deleted outright.
pub fn handle_reset(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let path = ctx.store_path()?;
    if !confirm(ctx, &format!("Delete all data in {}?", path.display()))? {
        return print_cancelled(&ui, "reset", "Reset cancelled");
    }

    match JsonFileStore::open(&path) {
        Ok(mut store) => {
            let mut state = AppState::load(&store, ctx.clock()?)?;
            state.reset();
            state.persist(&mut store)?;
        }
        Err(MedtrackError::Serialization(cause)) => {
            log::warn!("discarding unreadable state file {}: {}", path.display(), cause);
            JsonFileStore::destroy(&path)?;
        }
        Err(e) => return Err(e.into()),
    }

    if ui.mode.is_json() {
        return print_json(&json!({ "status": "reset", "path": path }));
    }
    if !ctx.quiet() {
        print(&ui, &badge(&ui, Badge::Ok, "All data cleared"));
    }
    Ok(())
}
