use std::fs;
use std::path::Path;
use tempfile::TempDir;
use uvmgen::artifacts::{scenarios, ArtifactWriter};
use uvmgen::config::{parse_config, validate, ValidatedConfig};
use uvmgen::error::Error;
use uvmgen::manifest::GeneratedFileManifest;
use uvmgen::renderer::MiniJinjaRenderer;
use uvmgen::template::{ComponentRole, TemplateDescriptor};

fn alu_config() -> ValidatedConfig {
    let content = "project: {}\ndut: { module_name: alu, interface_name: alu_if }\ninterface: {}\n\
                   simulation: { wave_format: fst }\ndirectories: {}\n";
    validate(&parse_config(content, "config.yaml").unwrap()).unwrap()
}

/// Writes placeholder component files and records them.
fn record_components(root: &Path, roles: &[ComponentRole]) -> GeneratedFileManifest {
    let mut manifest = GeneratedFileManifest::new();
    for role in roles {
        let descriptor = TemplateDescriptor::new(*role, "alu");
        let path = root.join("sim/uvm").join(&descriptor.output_relative_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "// component\n").unwrap();
        manifest.record_component(*role, path, &descriptor.output_relative_path);
    }
    manifest
}

#[test]
fn test_aggregator_requires_every_component() {
    let temp_dir = TempDir::new().unwrap();
    let config = alu_config();
    let renderer = MiniJinjaRenderer::new();
    let writer = ArtifactWriter::new(&renderer, &config, temp_dir.path());

    let manifest = record_components(
        temp_dir.path(),
        &[ComponentRole::Transaction, ComponentRole::Sequence],
    );
    match writer.write_aggregator(&manifest) {
        Err(Error::DependencyError { step, missing }) => {
            assert_eq!(step, "package");
            assert_eq!(
                missing,
                vec!["driver", "monitor", "agent", "environment", "test"]
            );
        }
        other => panic!("Expected DependencyError, got {other:?}"),
    }
    assert!(!writer.aggregator_path().exists());
}

#[test]
fn test_aggregator_rejects_deleted_component() {
    let temp_dir = TempDir::new().unwrap();
    let config = alu_config();
    let renderer = MiniJinjaRenderer::new();
    let writer = ArtifactWriter::new(&renderer, &config, temp_dir.path());

    let manifest = record_components(temp_dir.path(), &ComponentRole::ALL);
    fs::remove_file(temp_dir.path().join("sim/uvm/agents/alu_monitor.sv")).unwrap();

    let result = writer.render_aggregator(&manifest);
    assert!(matches!(
        result,
        Err(Error::DependencyError { ref missing, .. }) if missing.len() == 1
    ));
}

#[test]
fn test_aggregator_content() {
    let temp_dir = TempDir::new().unwrap();
    let config = alu_config();
    let renderer = MiniJinjaRenderer::new();
    let writer = ArtifactWriter::new(&renderer, &config, temp_dir.path());

    let manifest = record_components(temp_dir.path(), &ComponentRole::ALL);
    let path = writer.write_aggregator(&manifest).unwrap();
    assert_eq!(path, temp_dir.path().join("sim/uvm/base/alu_pkg.sv"));

    let content = fs::read_to_string(path).unwrap();
    let includes: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("`include \"../"))
        .collect();
    assert_eq!(
        includes,
        vec![
            "`include \"../transactions/alu_transaction.sv\"",
            "`include \"../sequences/alu_sequence.sv\"",
            "`include \"../agents/alu_driver.sv\"",
            "`include \"../agents/alu_monitor.sv\"",
            "`include \"../agents/alu_agent.sv\"",
            "`include \"../env/alu_env.sv\"",
            "`include \"../tests/alu_test.sv\"",
        ]
    );
    assert!(content.contains("// ALU UVM Package"));
    assert!(content.ends_with("endpackage\n"));
}

#[test]
fn test_entry_requires_aggregator() {
    let temp_dir = TempDir::new().unwrap();
    let config = alu_config();
    let renderer = MiniJinjaRenderer::new();
    let writer = ArtifactWriter::new(&renderer, &config, temp_dir.path());

    let manifest = record_components(temp_dir.path(), &ComponentRole::ALL);
    assert!(matches!(
        writer.render_entry(&manifest),
        Err(Error::DependencyError { .. })
    ));
}

#[test]
fn test_scenarios() {
    let config = alu_config();
    let scenarios = scenarios(&config);
    assert_eq!(scenarios.len(), 2);
    assert_eq!(scenarios[0].name, "alu_basic");
    assert_eq!(scenarios[0].test_class, "alu_basic_test");
    assert_eq!(scenarios[0].wave_file, "alu_basic.fst");
    assert_eq!(scenarios[1].name, "alu_random");
    assert_eq!(scenarios[1].verbosity, "UVM_HIGH");
}

#[test]
fn test_run_config_lines() {
    let config = alu_config();
    let renderer = MiniJinjaRenderer::new();
    let writer = ArtifactWriter::new(&renderer, &config, Path::new("."));

    let content = writer.render_run_config().unwrap();
    let records: Vec<&str> = content
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    assert_eq!(records.len(), 2);
    assert!(records[0].starts_with("alu_basic|"));
    assert!(records[0].ends_with("|alu.f|alu_basic_test|alu_basic.fst|UVM_MEDIUM"));
    assert_eq!(records[1].split('|').count(), 6);
}
