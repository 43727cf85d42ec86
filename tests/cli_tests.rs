#![cfg(feature = "cli_api")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

#[test]
fn cli_adds_and_shows_items() {
    run_cli("add m1 medication daily 2025-01-01 08:00 Losartan 50mg\nshow\nquit\n")
        .success()
        .stdout(str_contains("Item upserted."))
        .stdout(str_contains("Losartan 50mg"));
}

#[test]
fn cli_rejects_weekly_without_days() {
    run_cli("add c1 care weekly 2025-01-01 14:00 Physio\nquit\n")
        .success()
        .stdout(str_contains(
            "weekly item requires at least one day of the week",
        ));
}

#[test]
fn cli_weekly_with_days_appears_on_matching_agenda() {
    // 2025-01-06 is a Monday
    run_cli(
        "add c1 care weekly:Mon,Fri 2025-01-01 14:00 Physio\nagenda 2025-01-06\nagenda 2025-01-07\nquit\n",
    )
    .success()
    .stdout(str_contains("14:00 Physio"))
    .stdout(str_contains("(nothing due)"));
}

#[test]
fn cli_delete_command_removes_item() {
    run_cli(
        "add m1 medication daily 2025-01-01 08:00 Losartan\ndelete m1\ndelete m1\nquit\n",
    )
    .success()
    .stdout(str_contains("Deleted item m1."))
    .stdout(str_contains("Item m1 not found."));
}

#[test]
fn cli_done_toggles_and_reports_summary() {
    run_cli(
        "add m1 medication daily 2025-01-01 08:00 Losartan\ndone m1 2025-01-05\nday 2025-01-05\ndone m1 2025-01-05\nday 2025-01-05\nquit\n",
    )
    .success()
    .stdout(str_contains("Marked m1 completed on 2025-01-05."))
    .stdout(str_contains("date=2025-01-05, total=1, done=1"))
    .stdout(str_contains("Marked m1 not completed on 2025-01-05."))
    .stdout(str_contains("date=2025-01-05, total=1, pending=1"));
}

#[test]
fn cli_history_records_completions_only() {
    run_cli(
        "add m1 medication daily 2025-01-01 08:00 Losartan\ndone m1 2025-01-05\ndone m1 2025-01-05\nhistory\nquit\n",
    )
    .success()
    .stdout(str_contains("Losartan (m1) completed for 2025-01-05"));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "add m1 medication daily 2025-01-01 08:00 Losartan\nsave json {}\nadd m2 care daily 2025-01-01 09:00 Temp\nload json {}\nshow\nquit\n",
        path, path
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(
        output.contains("Schedule loaded from"),
        "expected output to mention load completion"
    );
    let after_reload = output
        .split("Schedule loaded from")
        .last()
        .unwrap_or_default();
    assert!(
        after_reload.contains("Losartan"),
        "expected persisted item to remain:\n{}",
        after_reload
    );
    assert!(
        !after_reload.contains("Temp"),
        "temporary item should not appear after reload:\n{}",
        after_reload
    );
}

#[test]
fn cli_updates_metadata() {
    run_cli("meta name Maria Silva\nmeta condition Hypertension\nmeta show\nquit\n")
        .success()
        .stdout(str_contains("Patient name   : Maria Silva"))
        .stdout(str_contains("Main condition : Hypertension"));
}
