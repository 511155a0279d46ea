use std::{fs, path::PathBuf};

use tempfile::tempdir;

use sketchflow::export::ExportFormat;
use sketchflow_cli::{Args, run};

/// Collects all .json snapshots from a directory
fn collect_snapshots(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &PathBuf, format: ExportFormat, output: &std::path::Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        format,
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let valid_demos = collect_snapshots(demos_path());

    assert!(!valid_demos.is_empty(), "No demos found in demos/");

    let mut failed_demos = Vec::new();

    for format in ExportFormat::ALL {
        // Files are named by timestamp, so each format gets its own directory
        let temp_dir = tempdir().expect("Failed to create temp directory");

        for demo_path in &valid_demos {
            match run(&args_for(demo_path, format, temp_dir.path())) {
                Ok(written) => {
                    let bytes = fs::read(&written).expect("Exported file should exist");
                    assert!(!bytes.is_empty(), "{} is empty", written.display());
                    assert_eq!(
                        written.extension().and_then(|s| s.to_str()),
                        Some(format.extension())
                    );
                }
                Err(e) => failed_demos.push((demo_path.clone(), format, e)),
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, format, err) in &failed_demos {
            eprintln!("  - {} ({format}): {}", path.display(), err);
        }
        panic!("{} valid demo export(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_snapshots(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        if run(&args_for(demo_path, ExportFormat::Svg, temp_dir.path())).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    let leftovers = fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(leftovers, 0, "Failed exports must not write files");

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}
