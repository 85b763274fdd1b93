
use std::fs;
use std::path::Path;

use module_test_support::{build, parse_verses, text, write_module_dir, ModuleImage, Slot};
use sword_reader::sword::convert::ModuleFiles;
use sword_reader::{
    convert_batch, convert_module, ConvertOptions, DecodeOptions, ModuleDescriptor, SwordError,
    WorkCatalog,
};
use tempfile::tempdir;

fn read_output(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
}

#[test]
fn converts_a_module_directory() {
    let root = tempdir().unwrap();
    let image = build(&[Slot::Empty, text("Hello"), Slot::Corrupt, text("In the <beginning>")]);
    let module_dir = write_module_dir(root.path(), "mhc", "MHC", &image, "Encoding=UTF-8\n");

    let summary = convert_module(&module_dir, &WorkCatalog::kjv(), &ConvertOptions::default())
        .expect("conversion succeeds");

    assert_eq!(summary.module, "MHC");
    assert_eq!(summary.output, module_dir.join("mhc.osis.xml"));
    assert_eq!(summary.index_records, 4);
    assert_eq!(summary.stats.decoded, 2);
    assert_eq!(summary.stats.empty, 1);
    assert_eq!(summary.stats.failed, 1);
    assert_eq!(summary.written, 2);

    let verses = parse_verses(&read_output(&summary.output));
    assert_eq!(
        verses,
        vec![
            ("Gen.1.2".to_string(), "Hello".to_string()),
            ("Gen.1.4".to_string(), "In the <beginning>".to_string()),
        ]
    );
}

#[test]
fn empty_index_still_writes_a_document() {
    let root = tempdir().unwrap();
    let module_dir = write_module_dir(root.path(), "blank", "Blank", &ModuleImage::default(), "");

    let summary = convert_module(&module_dir, &WorkCatalog::kjv(), &ConvertOptions::default())
        .expect("empty index is not an error");
    assert_eq!(summary.index_records, 0);
    assert_eq!(summary.written, 0);

    let doc = read_output(&summary.output);
    assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(doc.contains("</osisText>"));
    assert!(!doc.contains("<verse"));
}

#[test]
fn missing_index_is_a_configuration_error() {
    let root = tempdir().unwrap();
    let image = build(&[text("x")]);
    let module_dir = write_module_dir(root.path(), "noidx", "NoIdx", &image, "");
    let data_dir = module_dir.join("modules/comments/zcom/noidx");
    fs::remove_file(data_dir.join("noidx.zdx")).unwrap();

    let err = convert_module(&module_dir, &WorkCatalog::kjv(), &ConvertOptions::default())
        .unwrap_err();
    assert!(matches!(err, SwordError::Configuration(_)));
    assert!(!module_dir.join("noidx.osis.xml").exists());
}

#[test]
fn batch_continues_past_failing_modules() {
    let root = tempdir().unwrap();
    write_module_dir(root.path(), "a_good", "Good", &build(&[text("one"), text("two")]), "");

    let no_data = write_module_dir(root.path(), "b_nodata", "NoData", &build(&[text("x")]), "");
    fs::remove_dir_all(no_data.join("modules")).unwrap();

    let no_conf = write_module_dir(root.path(), "c_noconf", "NoConf", &build(&[text("x")]), "");
    fs::remove_file(no_conf.join("mods.d").join("noconf.conf")).unwrap();

    // Not a module: no mods.d directory.
    fs::create_dir_all(root.path().join("d_stray")).unwrap();

    let report = convert_batch(root.path(), &WorkCatalog::kjv(), &ConvertOptions::default())
        .expect("root is readable");

    assert_eq!(report.total(), 3);
    assert_eq!(report.succeeded(), 1);
    let names: Vec<_> = report
        .results
        .iter()
        .map(|(dir, _)| dir.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_good", "b_nodata", "c_noconf"]);
    assert!(report.results[0].1.is_ok());
    for (_, result) in &report.results[1..] {
        assert!(matches!(result, Err(SwordError::Configuration(_))));
    }
}

#[test]
fn parallel_batch_matches_sequential() {
    let root = tempdir().unwrap();
    for i in 0..5 {
        let slots: Vec<_> = (0..=i).map(|n| text(&format!("m{i} e{n}"))).collect();
        write_module_dir(root.path(), &format!("mod{i}"), &format!("Mod{i}"), &build(&slots), "");
    }

    let catalog = WorkCatalog::kjv();
    let sequential = convert_batch(root.path(), &catalog, &ConvertOptions::default()).unwrap();
    let parallel = convert_batch(
        root.path(),
        &catalog,
        &ConvertOptions {
            jobs: 3,
            ..ConvertOptions::default()
        },
    )
    .unwrap();

    assert_eq!(parallel.succeeded(), 5);
    for ((dir_a, a), (dir_b, b)) in sequential.results.iter().zip(&parallel.results) {
        assert_eq!(dir_a, dir_b);
        assert_eq!(a.as_ref().unwrap(), b.as_ref().unwrap());
    }
}

#[test]
fn output_cap_extension_and_directory() {
    let root = tempdir().unwrap();
    let out = root.path().join("out");
    let slots: Vec<_> = (0..10).map(|n| text(&format!("entry {n}"))).collect();
    let module_dir = write_module_dir(root.path(), "capped", "Capped", &build(&slots), "");

    let options = ConvertOptions {
        max_written: Some(3),
        extension: "xml".to_string(),
        output_dir: Some(out.clone()),
        decode: DecodeOptions {
            max_slots: Some(8),
            ..DecodeOptions::default()
        },
        ..ConvertOptions::default()
    };
    let summary = convert_module(&module_dir, &WorkCatalog::kjv(), &options).unwrap();

    assert_eq!(summary.output, out.join("capped.xml"));
    assert_eq!(summary.index_records, 10);
    assert_eq!(summary.stats.attempted, 8);
    assert_eq!(summary.stats.decoded, 8);
    assert_eq!(summary.written, 3);
    assert_eq!(parse_verses(&read_output(&summary.output)).len(), 3);
}

#[test]
fn descriptor_encoding_is_honoured() {
    let root = tempdir().unwrap();
    let image = build(&[Slot::Raw(b"caf\xE9".to_vec())]);
    let module_dir = write_module_dir(root.path(), "latin", "Latin", &image, "Encoding=Latin-1\n");

    let summary =
        convert_module(&module_dir, &WorkCatalog::kjv(), &ConvertOptions::default()).unwrap();
    let verses = parse_verses(&read_output(&summary.output));
    assert_eq!(verses, vec![("Gen.1.1".to_string(), "café".to_string())]);
}

#[test]
fn index_falls_back_to_first_zdx() {
    let root = tempdir().unwrap();
    let module_dir = write_module_dir(root.path(), "renamed", "Renamed", &build(&[text("x")]), "");
    let data_dir = module_dir.join("modules/comments/zcom/renamed");
    fs::rename(data_dir.join("renamed.zdx"), data_dir.join("ot.zdx")).unwrap();
    fs::rename(data_dir.join("renamed.zdt"), data_dir.join("ot.zdt")).unwrap();

    let descriptor = ModuleDescriptor::load(module_dir.join("mods.d/renamed.conf")).unwrap();
    let files = ModuleFiles::locate(&module_dir, &descriptor).unwrap();
    assert_eq!(files.index, data_dir.join("ot.zdx"));
    assert_eq!(files.data, data_dir.join("ot.zdt"));
}
