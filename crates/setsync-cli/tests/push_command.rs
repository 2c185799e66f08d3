use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct TestFixture {
    _temp_dir: TempDir,
    data_dir: PathBuf,
}

const SAMPLE_CSV: &str = "\
Date,Workout Name,Duration,Exercise Name,Set Order,Weight,Reps,Distance,Seconds,Notes,Workout Notes,RPE
2024-03-04 17:30:00,Push Day,1h,Bench Press (Barbell),1,60.0,8,,,,,
2024-03-05 18:00:00,Leg Day,45m,Squat (Barbell),1,100.0,5,,,,,
";

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".setsync");
        fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            _temp_dir: temp_dir,
            data_dir,
        }
    }

    fn write_csv(&self, contents: &str) -> PathBuf {
        let path = self._temp_dir.path().join("export.csv");
        fs::write(&path, contents).expect("Failed to write export");
        path
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("setsync").expect("Failed to find setsync binary");
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }
}

#[test]
fn dry_run_lists_candidates_without_delivering() {
    let fixture = TestFixture::new();
    let csv = fixture.write_csv(SAMPLE_CSV);
    fixture.command().arg("import").arg(&csv).assert().success();

    fixture
        .command()
        .args(["push", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would push 2 sets"))
        .stdout(predicate::str::contains("Bench Press (Barbell)"))
        .stdout(predicate::str::contains("Squat (Barbell)"));

    // nothing was recorded as pushed
    fixture
        .command()
        .args(["--format", "json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pushed\":0"))
        .stdout(predicate::str::contains("\"unpushed\":2"));
}

#[test]
fn dry_run_respects_the_limit() {
    let fixture = TestFixture::new();
    let csv = fixture.write_csv(SAMPLE_CSV);
    fixture.command().arg("import").arg(&csv).assert().success();

    fixture
        .command()
        .args(["push", "--dry-run", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would push 1 sets"));
}

#[test]
fn dry_run_refreshes_the_enriched_view() {
    let fixture = TestFixture::new();
    let csv = fixture.write_csv(SAMPLE_CSV);
    fixture.command().arg("import").arg(&csv).assert().success();

    // no explicit enrich; push does it before selecting candidates
    fixture.command().args(["push", "--dry-run"]).assert().success();

    fixture
        .command()
        .args(["--format", "json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"enriched\":2"));
}

#[test]
fn push_without_tracker_credentials_fails() {
    let fixture = TestFixture::new();
    let csv = fixture.write_csv(SAMPLE_CSV);
    fixture.command().arg("import").arg(&csv).assert().success();

    fixture
        .command()
        .arg("push")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tracker is not configured"));
}

#[test]
fn empty_dry_run_reports_nothing_to_push() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["push", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to push"));
}
