use std::fs;
use std::path::{Path, PathBuf};

use breakwatch_core::ModuleFilter;
use breakwatch_operations::operations::{CollectInput, CollectOperation, TargetVersion};
use breakwatch_operations::pipeline::{BreakingChangeReport, UNSPECIFIC_VERSION};
use breakwatch_operations::providers::{DirectoryPathTable, FileSystemCommandLoader};
use breakwatch_operations::render_markdown;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn create_checkout() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for module in ["monitor", "vm"] {
        fs::create_dir_all(dir.path().join("modules").join(module)).expect("create module dir");
    }
    fs::create_dir_all(dir.path().join("extensions").join("costmanagement"))
        .expect("create extension dir");
    fs::create_dir_all(dir.path().join("core")).expect("create core dir");
    dir
}

fn path_table(dir: &TempDir) -> DirectoryPathTable {
    DirectoryPathTable::new()
        .with_core_dir(dir.path().join("core"))
        .with_modules_dir(dir.path().join("modules"))
        .with_extension_dir(dir.path().join("extensions"))
}

fn collect(input: &CollectInput) -> BreakingChangeReport {
    let dir = create_checkout();
    let loader = FileSystemCommandLoader::new(fixture("commands.json"));

    CollectOperation::new(loader, path_table(&dir))
        .execute(input)
        .expect("collect breaking changes")
}

fn flat(report: BreakingChangeReport) -> indexmap::IndexMap<String, indexmap::IndexMap<String, Vec<String>>> {
    match report {
        BreakingChangeReport::Flat(modules) => modules,
        BreakingChangeReport::ByVersion(_) => panic!("expected flat report"),
    }
}

#[test]
fn unbounded_collection_reports_every_annotation() {
    let input = CollectInput {
        target_version: TargetVersion::Unbounded,
        ..CollectInput::default()
    };

    let report = collect(&input);

    assert_eq!(report.len(), 10);
    let modules = flat(report);
    assert_eq!(
        modules.keys().collect::<Vec<_>>(),
        vec!["core", "monitor", "vm", "costmanagement"]
    );
    assert_eq!(
        modules["core"]["core"],
        vec![
            "`az login` will use WAM by default.",
            "Python 3.8 support will be dropped."
        ]
    );
    assert_eq!(
        modules["monitor"]["monitor metrics list"],
        vec![
            "This option `--agg/-a` is deprecated and replaced by `--aggregation`. \
             This command would be removed in 3.0.0.",
            "This parameter `--filter` is deprecated and replaced by `--odata-filter`. \
             This parameter would be removed in 2.70.0.",
            "The default value of `--interval` will change to `PT5M`.",
            "The output will no longer include `cost`.",
        ]
    );
    assert_eq!(
        modules["monitor"]["monitor log-profiles"],
        vec!["This command group is deprecated and replaced by `monitor diagnostic-settings subscription`."]
    );
    assert_eq!(
        modules["vm"]["vm create"],
        vec!["This parameter `--size` is deprecated."]
    );
}

#[test]
fn bounded_collection_grouped_by_version() {
    let input = CollectInput {
        target_version: TargetVersion::UpTo("2.73.0".to_string()),
        group_by_version: true,
        ..CollectInput::default()
    };

    let report = collect(&input);

    let BreakingChangeReport::ByVersion(modules) = report else {
        panic!("expected by-version report");
    };
    assert_eq!(
        modules.keys().collect::<Vec<_>>(),
        vec!["core", "monitor", "costmanagement"]
    );
    let metrics = &modules["monitor"]["monitor metrics list"];
    assert_eq!(metrics.keys().collect::<Vec<_>>(), vec!["2.70.0", "2.73.0"]);
    assert!(!modules["monitor"].contains_key("monitor log-profiles"));
    assert!(
        modules
            .values()
            .flat_map(|commands| commands.values())
            .all(|versions| !versions.contains_key(UNSPECIFIC_VERSION))
    );
}

#[test]
fn cli_sentinel_excludes_extensions() {
    let input = CollectInput {
        modules: ModuleFilter::from_names(vec!["CLI".to_string()]),
        target_version: TargetVersion::Unbounded,
        ..CollectInput::default()
    };

    let modules = flat(collect(&input));

    assert_eq!(modules.keys().collect::<Vec<_>>(), vec!["core", "monitor", "vm"]);
}

#[test]
fn named_modules_limit_the_walk() {
    let input = CollectInput {
        modules: ModuleFilter::from_names(vec!["vm".to_string()]),
        target_version: TargetVersion::Unbounded,
        ..CollectInput::default()
    };

    let modules = flat(collect(&input));

    assert_eq!(modules.keys().collect::<Vec<_>>(), vec!["vm"]);
}

#[test]
fn next_window_without_release_reports_everything() {
    let report = collect(&CollectInput::default());

    assert_eq!(report.len(), 10);
}

#[test]
fn markdown_lists_modules_and_commands() {
    let input = CollectInput {
        modules: ModuleFilter::from_names(vec!["EXT".to_string()]),
        target_version: TargetVersion::Unbounded,
        group_by_version: true,
        ..CollectInput::default()
    };

    let markdown = render_markdown(&collect(&input));

    assert!(markdown.contains("## costmanagement"));
    assert!(markdown.contains("### costmanagement export create"));
    assert!(markdown.contains("#### 1.0.0\n\n- `--schedule-status` will be required.\n"));
    assert!(!markdown.contains("## monitor"));
}

#[test]
fn structure_serializes_as_nested_json() {
    let input = CollectInput {
        modules: ModuleFilter::from_names(vec!["vm".to_string()]),
        target_version: TargetVersion::Unbounded,
        ..CollectInput::default()
    };

    let json = serde_json::to_value(collect(&input)).expect("serialize report");

    assert_eq!(
        json,
        serde_json::json!({"vm": {"vm create": ["This parameter `--size` is deprecated."]}})
    );
}
