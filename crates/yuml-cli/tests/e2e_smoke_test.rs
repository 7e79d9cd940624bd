use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use yuml_cli::{Args, run};

/// Collects all .yuml files from a directory
fn collect_yuml_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = if let Ok(entries) = fs::read_dir(dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yuml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Arguments that compile without the external layout engine.
fn dot_args(input: &Path, output: &Path) -> Args {
    Args {
        input: Some(input.to_string_lossy().to_string()),
        output: Some(output.to_string_lossy().to_string()),
        dot: true,
        log_level: "off".to_string(),
        ..Args::default()
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_yuml_files(&demos_path());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy();
        let output_path = temp_dir.path().join(format!("{stem}.out"));

        match run(&dot_args(demo_path, &output_path)) {
            Ok(()) => {
                let output = fs::read_to_string(&output_path).unwrap();
                let expected = if stem == "sequence" { "<svg" } else { "digraph G {" };
                if !output.contains(expected) {
                    failed_demos.push((demo_path.clone(), format!("missing `{expected}`")));
                }
            }
            Err(e) => failed_demos.push((demo_path.clone(), e.to_string())),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_yuml_files(&demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.out",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&dot_args(demo_path, &output_path)).is_ok() {
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

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_arguments_and_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let input = temp_dir.path().join("untyped.yuml");
    fs::write(&input, "(start)->(Work)->(end)\n").unwrap();

    let config = temp_dir.path().join("config.toml");
    fs::write(
        &config,
        "[diagram]\ntype = \"state\"\n\n[dot_header.graph]\nbgcolor = \"lightyellow\"\n",
    )
    .unwrap();

    let output = temp_dir.path().join("untyped.dot");
    let args = Args {
        direction: Some("LR".to_string()),
        config: Some(config.to_string_lossy().to_string()),
        ..dot_args(&input, &output)
    };
    run(&args).expect("Failed to compile with configuration");

    let dot = fs::read_to_string(&output).unwrap();
    assert!(dot.contains("rankdir=LR"));
    assert!(dot.contains("bgcolor=lightyellow"));
    assert!(dot.contains(r#"shape="doublecircle""#));
}

#[test]
fn e2e_missing_input_is_an_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = dot_args(
        &temp_dir.path().join("missing.yuml"),
        &temp_dir.path().join("missing.dot"),
    );

    let err = run(&args).unwrap_err();
    assert!(matches!(err, yuml::YumlError::Io(_)));
}
