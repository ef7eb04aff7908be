use std::{fs, path::PathBuf};

use tempfile::tempdir;

use predviz_cli::{Args, run};

/// Collects all .pv files from a directory
fn collect_pv_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("pv")
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

fn args_for(input: Option<String>, formula: Option<&str>, output: &std::path::Path) -> Args {
    Args {
        input,
        formula: formula.map(str::to_string),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_pv_files(demos_path());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!(
            "{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        let args = args_for(
            Some(demo_path.to_string_lossy().to_string()),
            None,
            &output_path,
        );

        match run(&args) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("Output should exist");
                assert!(svg.starts_with("<svg"), "{}", demo_path.display());
                assert!(svg.trim_end().ends_with("</svg>"), "{}", demo_path.display());
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
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

    let error_demos = collect_pv_files(demos_path().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        let args = args_for(
            Some(demo_path.to_string_lossy().to_string()),
            None,
            &output_path,
        );

        if run(&args).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(
            !output_path.exists(),
            "{} left a partial output",
            demo_path.display()
        );
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

    println!("✅ All {} error demos failed as expected", error_demos.len());
}

#[test]
fn e2e_inline_formula() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("inline.svg");

    let args = args_for(None, Some("!x:(p(x) -> ?y:q(x, y))"), &output_path);
    run(&args).expect("Inline formula should render");

    let svg = fs::read_to_string(&output_path).expect("Output should exist");
    assert!(svg.contains("∀x"));
    assert!(svg.contains("∃y"));
}

#[test]
fn e2e_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[layout]\nmargin = 0.0\n").expect("Failed to write config");

    let default_output = temp_dir.path().join("default.svg");
    run(&args_for(None, Some("p"), &default_output)).expect("Default render failed");

    let tight_output = temp_dir.path().join("tight.svg");
    let mut args = args_for(None, Some("p"), &tight_output);
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).expect("Configured render failed");

    let default_svg = fs::read_to_string(&default_output).unwrap();
    let tight_svg = fs::read_to_string(&tight_output).unwrap();
    assert_ne!(default_svg, tight_svg);
}

#[test]
fn e2e_warning_reported_once() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("vacuous.svg");

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_predviz"))
        .args(["--formula", "∀x.p", "--log-level", "warn", "--output"])
        .arg(&output_path)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run predviz");

    assert!(output.status.success());
    assert!(output_path.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("W200").count(), 1, "{stderr}");
}
