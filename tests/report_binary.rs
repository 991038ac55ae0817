use anyhow::Result;
use std::{fs, path::Path, process::Command};

fn write_inputs(dir: &Path, akas: &str, basics: &str) -> Result<()> {
    let data = dir.join("data");
    fs::create_dir_all(&data)?;
    fs::write(data.join("title.akas.tsv"), akas)?;
    fs::write(data.join("title.basics.tsv"), basics)?;
    Ok(())
}

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_akas-participation"))
}

#[test]
fn prints_three_lines_for_fixed_inputs() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_inputs(
        dir.path(),
        "titleId\tordering\ttitle\tregion\n\
         t1\t1\tCarmencita\t\\N\n\
         t1\t2\tCarmencita\tUS\n\
         t2\t1\tLe clown\tFR\n\
         t3\t1\tPauvre Pierrot\tFR\n",
        "tconst\ttitleType\tprimaryTitle\nt1\tshort\ta\nt2\tshort\tb\nt3\tshort\tc\nt4\tshort\td\nt5\tshort\te\n",
    )?;

    let out = binary().current_dir(dir.path()).output()?;
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8(out.stdout)?,
        "Number of unique values in 'titleId': 3\n\
         Number of records in Title Basics: 5\n\
         There are 2 titles which do not have an alternative title.\n"
    );
    Ok(())
}

#[test]
fn missing_input_exits_nonzero_without_report() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let out = binary().current_dir(dir.path()).output()?;
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("title.akas.tsv"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn missing_title_id_column_exits_nonzero() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_inputs(dir.path(), "tconst\ttitle\nt1\ta\n", "tconst\nt1\n")?;

    let out = binary().current_dir(dir.path()).output()?;
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("titleId"));
    Ok(())
}

#[test]
fn config_file_redirects_inputs() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let dumps = dir.path().join("dumps");
    fs::create_dir_all(&dumps)?;
    fs::write(dumps.join("akas.tsv"), "titleId\nt1\nt2\n")?;
    fs::write(dumps.join("basics.tsv"), "tconst\nt1\nt2\n")?;
    fs::write(
        dir.path().join("akas-participation.yaml"),
        "akas_path: dumps/akas.tsv\nbasics_path: dumps/basics.tsv\n",
    )?;

    let out = binary().current_dir(dir.path()).output()?;
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout)?;
    assert!(stdout.ends_with("There are 0 titles which do not have an alternative title.\n"));
    Ok(())
}
