use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

const NOW: &str = "2025-06-08T09:00";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_medtrack"))
}

/// An isolated home: state file, config and XDG dirs all live in a temp dir.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("state.json")
    }

    fn command(&self, args: &[&str]) -> Command {
        let root = self.dir.path();
        let mut cmd = Command::new(bin());
        cmd.args(args)
            .env("MEDTRACK_STORE", self.store())
            .env("MEDTRACK_CONFIG", root.join("config.toml"))
            .env("MEDTRACK_NOW", NOW)
            .env("XDG_CONFIG_HOME", root.join("config"))
            .env("XDG_DATA_HOME", root.join("data"))
            .env("HOME", root)
            .env_remove("MEDTRACK_LOG")
            .stdin(Stdio::null());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("run medtrack")
    }

    fn json(&self, args: &[&str]) -> Value {
        let mut full = args.to_vec();
        full.push("--json");
        let output = self.run(&full);
        assert!(
            output.status.success(),
            "medtrack {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
    }

    fn login(&self) {
        self.json(&["login", "--email", "demo@example.com"]);
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write(path: &Path, contents: &str) {
    std::fs::write(path, contents).expect("write file");
}

#[test]
fn test_login_seeds_dashboard() {
    let sandbox = Sandbox::new();
    let login = sandbox.json(&["login", "--email", "demo@example.com"]);
    assert_eq!(login["user"]["email"], "demo@example.com");
    assert!(login["token"].as_str().is_some());

    let dashboard = sandbox.json(&["dashboard"]);
    assert_eq!(dashboard["date"], "2025-06-08");
    assert_eq!(dashboard["greeting"], "Demo User");
    assert_eq!(dashboard["stats"]["total"], 3);
    assert_eq!(dashboard["stats"]["completed"], 2);
    assert_eq!(dashboard["stats"]["adherenceRate"], 67);
    assert_eq!(dashboard["medicines"]["medicines"], 2);

    let whoami = sandbox.json(&["whoami"]);
    assert_eq!(whoami["email"], "demo@example.com");
}

#[test]
fn test_state_survives_between_runs() {
    let sandbox = Sandbox::new();
    sandbox.login();
    assert!(sandbox.store().exists());

    let medicines = sandbox.json(&["medicines", "list"]);
    assert_eq!(medicines.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_medicine_add_list_delete() {
    let sandbox = Sandbox::new();
    sandbox.login();

    let added = sandbox.json(&[
        "medicines", "add", "Iron", "--dosage", "1", "--unit", "capsule", "--time", "12:00",
    ]);
    assert_eq!(added["name"], "Iron");
    assert_eq!(added["schedules"].as_array().map(Vec::len), Some(1));

    let found = sandbox.json(&["medicines", "list", "--search", "iron"]);
    assert_eq!(found.as_array().map(Vec::len), Some(1));

    let deleted = sandbox.json(&["medicines", "delete", "iron", "--yes"]);
    assert_eq!(deleted["name"], "Iron");
    assert_eq!(deleted["removedLogs"], 0);

    let remaining = sandbox.json(&["medicines", "list"]);
    assert_eq!(remaining.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_deleting_medicine_removes_its_logs() {
    let sandbox = Sandbox::new();
    sandbox.login();

    let deleted = sandbox.json(&["medicines", "delete", "Blood pressure medication", "--yes"]);
    assert_eq!(deleted["removedLogs"], 2);

    let logs = sandbox.json(&["logs", "list"]);
    assert_eq!(logs.as_array().map(Vec::len), Some(1));
    assert_eq!(logs[0]["medicineName"], "Vitamin D");
}

#[test]
fn test_take_pending_dose() {
    let sandbox = Sandbox::new();
    sandbox.login();

    let pending = sandbox.json(&["logs", "list", "--status", "pending"]);
    let id = pending[0]["id"].as_str().expect("log id").to_string();

    let taken = sandbox.json(&["logs", "take", &id[..8]]);
    assert_eq!(taken["status"], "completed");
    assert_eq!(taken["takenTime"], "2025-06-08T09:00:00");

    let dashboard = sandbox.json(&["dashboard"]);
    assert_eq!(dashboard["stats"]["completed"], 3);
    assert_eq!(dashboard["stats"]["adherenceRate"], 100);
}

#[test]
fn test_quick_log_records_taken_dose() {
    let sandbox = Sandbox::new();
    sandbox.login();

    let logged = sandbox.json(&["logs", "add", "Vitamin D", "--at", "08:30", "--notes", "with food"]);
    assert_eq!(logged["status"], "completed");
    assert_eq!(logged["scheduledTime"], "2025-06-08T08:30:00");
    assert_eq!(logged["takenTime"], "2025-06-08T08:30:00");
    assert_eq!(logged["notes"], "with food");
}

#[test]
fn test_week_calendar_starts_on_sunday() {
    let sandbox = Sandbox::new();
    sandbox.login();

    let week = sandbox.json(&["schedules", "week"]);
    assert_eq!(week["start"], "2025-06-08");
    assert_eq!(week["days"].as_array().map(Vec::len), Some(7));
}

#[test]
fn test_report_custom_range() {
    let sandbox = Sandbox::new();
    sandbox.login();

    let report = sandbox.json(&["report", "--from", "2025-06-08", "--to", "2025-06-08"]);
    assert_eq!(report["summary"]["totalScheduled"], 3);
    assert_eq!(report["summary"]["totalTaken"], 2);

    let output = sandbox.run(&["report", "--from", "2025-06-09", "--to", "2025-06-01"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_settings_theme_and_notifications() {
    let sandbox = Sandbox::new();
    sandbox.login();

    let theme = sandbox.json(&["settings", "theme", "dark"]);
    assert_eq!(theme["theme"], "dark");
    assert_eq!(theme["resolvedTheme"], "dark");

    let notifications = sandbox.json(&["settings", "notifications", "--reminder-minutes", "15"]);
    assert_eq!(notifications["reminderMinutes"], 15);

    let output = sandbox.run(&["settings", "notifications", "--weekly-report-day", "9"]);
    assert_eq!(output.status.code(), Some(4));

    let shown = sandbox.json(&["settings"]);
    assert_eq!(shown["theme"], "dark");
    assert_eq!(shown["notifications"]["reminderMinutes"], 15);
}

#[test]
fn test_requires_sign_in() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["dashboard"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("medtrack login"));
}

#[test]
fn test_unknown_account_is_rejected() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["login", "--email", "nobody@example.com"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_bad_input_exit_codes() {
    let sandbox = Sandbox::new();
    sandbox.login();

    let output = sandbox.run(&["medicines", "add", "Iron", "--time", "25:00"]);
    assert_eq!(output.status.code(), Some(4));

    let output = sandbox.run(&["medicines", "show", "Aspirin"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("medtrack medicines list"));
}

#[test]
fn test_destructive_commands_need_confirmation() {
    let sandbox = Sandbox::new();
    sandbox.login();

    let output = sandbox.run(&["logout"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("--yes"));

    let output = sandbox.run(&["logout", "--yes"]);
    assert!(output.status.success());
    let output = sandbox.run(&["whoami"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_reset_discards_unreadable_state() {
    let sandbox = Sandbox::new();
    write(&sandbox.store(), "{ not json");

    let output = sandbox.run(&["dashboard"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("medtrack reset --yes"));

    let output = sandbox.run(&["reset", "--yes"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!sandbox.store().exists());

    sandbox.login();
}

#[test]
fn test_route_resolves_views() {
    let sandbox = Sandbox::new();
    let route = sandbox.json(&["route", "/medicines/"]);
    assert_eq!(route["title"], "Medicines");

    let route = sandbox.json(&["route", "/nowhere"]);
    assert_eq!(route["path"], "/");
}

#[test]
fn test_config_init_records_store_path() {
    let sandbox = Sandbox::new();
    let custom = sandbox.dir.path().join("elsewhere.json");
    let custom_arg = custom.to_string_lossy().to_string();

    let output = sandbox.run(&["config", "init", "--store-path", &custom_arg, "--timezone", "Asia/Tokyo"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let mut cmd = sandbox.command(&["config", "path", "--json"]);
    cmd.env_remove("MEDTRACK_STORE");
    let output = cmd.output().expect("run medtrack");
    let paths: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(paths["store"], custom_arg.as_str());

    let output = sandbox.run(&["config", "init"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_schedule_list_filters_paused() {
    let sandbox = Sandbox::new();
    sandbox.login();

    let all = sandbox.json(&["schedules", "list"]);
    assert_eq!(all.as_array().map(Vec::len), Some(3));
    let id = all[0]["id"].as_str().expect("schedule id").to_string();

    let paused = sandbox.json(&["schedules", "edit", &id, "--pause"]);
    assert_eq!(paused["active"], false);

    let inactive = sandbox.json(&["schedules", "list", "--filter", "inactive"]);
    assert_eq!(inactive.as_array().map(Vec::len), Some(1));
    assert_eq!(inactive[0]["id"], id.as_str());

    let active = sandbox.json(&["schedules", "list", "--filter", "active"]);
    assert_eq!(active.as_array().map(Vec::len), Some(2));
    assert!(active.as_array().unwrap().iter().all(|s| s["id"] != id.as_str()));

    let output = sandbox.run(&["schedules", "list", "--filter", "sometimes"]);
    assert_eq!(output.status.code(), Some(4));
}
