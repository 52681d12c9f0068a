use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use lifeline_cli::{Args, ReportStyle, error_adapter::format_plain, run};

const DEMOS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos");

/// Error demos and the code each one must be rejected with.
const ERROR_DEMOS: &[(&str, &str)] = &[
    ("blocked_send", "E103"),
    ("double_stop", "E101"),
    ("duplicate_message", "E102"),
    ("missing_arguments", "E002"),
    ("never_received", "E301"),
    ("unfinished_activity", "E300"),
    ("unknown_command", "E001"),
    ("unknown_message", "E200"),
    ("wrong_return", "E203"),
];

/// Collects all .seq files from a directory
fn collect_seq_files(dir: impl AsRef<Path>) -> Vec<PathBuf> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("seq")
                })
                .collect()
        })
        .unwrap_or_default();

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        report: ReportStyle::Plain,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_seq_files(DEMOS_DIR);
    assert!(!demos.is_empty(), "No demos found in {DEMOS_DIR}");

    let mut failed = Vec::new();
    for demo in &demos {
        let output = temp_dir
            .path()
            .join(format!("{}.svg", demo.file_stem().unwrap().to_string_lossy()));

        match run(&args_for(demo, &output)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output).expect("output was written");
                assert!(svg.starts_with("<svg"), "{} produced no SVG", demo.display());
            }
            Err(err) => failed.push((demo.clone(), format_plain(&err))),
        }
    }

    if !failed.is_empty() {
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_seq_files(Path::new(DEMOS_DIR).join("errors"));
    assert_eq!(demos.len(), ERROR_DEMOS.len(), "error demos and expected codes differ");

    for demo in &demos {
        let output = temp_dir.path().join("never.svg");
        let result = run(&args_for(demo, &output));

        let stem = demo.file_stem().unwrap().to_string_lossy();
        let (_, code) = ERROR_DEMOS
            .iter()
            .find(|(name, _)| *name == stem)
            .unwrap_or_else(|| panic!("no expected code for {}", demo.display()));

        let err = result.expect_err(&format!("{} should be rejected", demo.display()));
        let line = format_plain(&err);
        assert!(
            line.starts_with(&format!("error[{code}]")),
            "{}: {line}",
            demo.display()
        );
        assert!(line.ends_with(')'), "{}: {line}", demo.display());
        assert!(!output.exists(), "{} wrote output", demo.display());
    }
}

#[test]
fn e2e_missing_input_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args_for(
        &temp_dir.path().join("missing.seq"),
        &temp_dir.path().join("out.svg"),
    );

    let err = run(&args).unwrap_err();
    assert!(matches!(err, lifeline::LifelineError::Io(_)), "{err:?}");
}

#[test]
fn e2e_explicit_config_changes_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[layout]\nswimlane_width = 120\n").unwrap();

    let demo = Path::new(DEMOS_DIR).join("hello.seq");
    let output = temp_dir.path().join("hello.svg");
    let mut args = args_for(&demo, &output);
    args.config = Some(config_path.to_string_lossy().to_string());

    run(&args).expect("demo renders with custom config");
    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains(r#"width="240""#), "{svg}");
}
