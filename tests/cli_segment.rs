use assert_cmd::Command;
use tempfile::TempDir;

#[test]
fn command_segment() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("codas")?;
    let output = cmd
        .arg("segment")
        .arg("tests/codas/means.json")
        .arg("tests/codas/query.csv")
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(
        lines[0],
        "REC,Whale,TsTo,Coda,Duration,ICI1,ICI2,ICI3,ICI4,ICI5,ICI6,ICI7,ICI8,ICI9"
    );
    // two codas
    assert_eq!(lines[1], "r1,1,10,0,4,0.5,0.5,3,0,0,0,0,0,0");
    assert_eq!(lines[2], "r1,1,14,3,3.8,0.2,0.2,0.4,3,0,0,0,0,0");
    // a noisy click, then a coda
    assert_eq!(lines[3], "r1,2,20.5,100,2,2,0,0,0,0,0,0,0,0");
    assert_eq!(lines[4], "r1,2,22.5,0,1,0.5,0.5,0,0,0,0,0,0,0");
    // malformed and too short rows are reported, not fatal
    assert_eq!(lines[5], "r2,1,5,-1,0,0,0,0,0,0,0,0,0,0");
    assert_eq!(lines[6], "r2,1,7,-1,0.4,0,0,0,0,0,0,0,0,0");
    assert_eq!(lines.len(), 7);

    Ok(())
}

#[test]
fn command_segment_parallel() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let serial = temp.path().join("serial.csv");
    let parallel = temp.path().join("parallel.csv");

    let mut cmd = Command::cargo_bin("codas")?;
    cmd.arg("segment")
        .arg("tests/codas/means.json")
        .arg("tests/codas/query.csv")
        .arg("-o")
        .arg(&serial)
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("codas")?;
    cmd.arg("segment")
        .arg("tests/codas/means.json")
        .arg("tests/codas/query.csv")
        .arg("--parallel")
        .arg("3")
        .arg("-o")
        .arg(&parallel)
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(&serial)?,
        std::fs::read_to_string(&parallel)?
    );

    Ok(())
}

#[test]
fn command_segment_without_timing() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("query.csv");
    std::fs::write(&input, "id,ICI1,ICI2,ICI3,ICI4\nx,2.0,0.5,0.5,\n")?;

    let mut cmd = Command::cargo_bin("codas")?;
    let output = cmd
        .arg("segment")
        .arg("tests/codas/means.json")
        .arg(&input)
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("id,TsTo,Coda,Duration,ICI1,"));
    assert!(lines[1].starts_with("x,0,100,2,2,0,"));
    assert!(lines[2].starts_with("x,2,0,1,0.5,0.5,0,"));

    Ok(())
}

#[test]
fn command_segment_tight_budget() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("codas")?;
    let output = cmd
        .arg("segment")
        .arg("tests/codas/means.json")
        .arg("tests/codas/query.csv")
        .arg("--max-nodes")
        .arg("1")
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    // every row gives up, none aborts the batch
    let codes: Vec<&str> = stdout
        .lines()
        .skip(1)
        .map(|l| l.split(',').nth(3).unwrap())
        .collect();
    assert_eq!(codes, vec!["-1", "-1", "-1", "-1"]);

    Ok(())
}

#[test]
fn command_segment_overlong_row() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("query.csv");
    std::fs::write(
        &input,
        "id,ICI1,ICI2,ICI3\nx,0.5,0.5,3.0\ny,0.5,0.5,3.0,9\nz,0.5,0.5,3.0\n",
    )?;

    let mut cmd = Command::cargo_bin("codas")?;
    let output = cmd
        .arg("segment")
        .arg("tests/codas/means.json")
        .arg(&input)
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "x,0,0,4,0.5,0.5,3,0,0,0,0,0,0");
    assert_eq!(lines[2], "y,0,-1,0,0,0,0,0,0,0,0,0,0");
    assert_eq!(lines[3], "z,0,0,4,0.5,0.5,3,0,0,0,0,0,0");

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("line 3"));

    Ok(())
}

#[test]
fn command_segment_width_from_templates() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let templates = temp.path().join("means.json");
    // nine intervals, a match consumes ten
    std::fs::write(
        &templates,
        r#"{"0":[0.5,1.0],"16":[0.1,0.2,0.3,0.4,0.5,0.6,0.7,0.8,1.0]}"#,
    )?;
    let long = temp.path().join("long.csv");
    std::fs::write(
        &long,
        "id,ICI1,ICI2,ICI3,ICI4,ICI5,ICI6,ICI7,ICI8,ICI9,ICI10,ICI11\n\
         x,0.1,0.1,0.1,0.1,0.1,0.1,0.1,0.1,0.2,3.0,0.4\n",
    )?;
    let short = temp.path().join("short.csv");
    std::fs::write(&short, "id,ICI1,ICI2,ICI3\nw,0.4,,\n")?;

    let header = "id,TsTo,Coda,Duration,ICI1,ICI2,ICI3,ICI4,ICI5,ICI6,ICI7,ICI8,ICI9,ICI10";

    let mut cmd = Command::cargo_bin("codas")?;
    let output = cmd
        .arg("segment")
        .arg(&templates)
        .arg(&long)
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], header);
    assert_eq!(lines[1], "x,0,16,4,0.1,0.1,0.1,0.1,0.1,0.1,0.1,0.1,0.2,3");
    assert_eq!(lines[2], "x,4,100,0.4,0.4,0,0,0,0,0,0,0,0,0");

    // same columns when no long coda occurs
    let mut cmd = Command::cargo_bin("codas")?;
    let output = cmd
        .arg("segment")
        .arg(&templates)
        .arg(&short)
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], header);
    assert_eq!(lines[1], "w,0,-1,0.4,0,0,0,0,0,0,0,0,0,0");

    Ok(())
}
