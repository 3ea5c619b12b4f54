//! Integration tests for the render workflow: core service + adapters.

use std::path::Path;

use stencil_adapters::{
    FilesystemTemplateSource, InMemoryTemplateSource, LocalFilesystem, MemoryFilesystem,
};
use stencil_core::{
    application::{ApplicationError, CancelFlag, RenderOptions, RenderService},
    domain::{DerivedRule, DomainError, Transform},
    error::EngineError,
};

fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn service(source: InMemoryTemplateSource, filesystem: MemoryFilesystem) -> RenderService {
    RenderService::new(Box::new(source), Box::new(filesystem))
}

#[test]
fn scenario_tokenized_path_and_content() {
    let source = InMemoryTemplateSource::new()
        .with_file("{{name}}/App.java", b"package {{bundle_id}};".to_vec());
    let fs = MemoryFilesystem::new();
    let svc = service(source, fs.clone());

    let report = svc
        .render(
            params(&[("name", "myapp"), ("bundle_id", "com.example.app")]),
            &[],
            Path::new("/out"),
            &RenderOptions::default(),
        )
        .unwrap();

    assert_eq!(report.files_written, 1);
    assert_eq!(
        fs.read_file(Path::new("/out/myapp/App.java")).unwrap(),
        b"package com.example.app;"
    );
}

#[test]
fn derived_bundle_path_creates_nested_directories() {
    let rules = vec![DerivedRule {
        name: "bundle_path".into(),
        from: "bundle_id".into(),
        transforms: vec![Transform::Replace {
            find: ".".into(),
            with: "/".into(),
        }],
    }];
    let source = InMemoryTemplateSource::new().with_file(
        "java/{{bundle_path}}/MainActivity.java",
        b"package {{bundle_id}};".to_vec(),
    );
    let fs = MemoryFilesystem::new();
    let svc = service(source, fs.clone());

    svc.render(
        params(&[("bundle_id", "com.example.app")]),
        &rules,
        Path::new("/out"),
        &RenderOptions::default(),
    )
    .unwrap();

    assert_eq!(
        fs.read_file(Path::new("/out/java/com/example/app/MainActivity.java"))
            .unwrap(),
        b"package com.example.app;"
    );
}

#[test]
fn token_free_template_is_pure_copy() {
    let content = b"no tokens here\r\n\x00binary-ish".to_vec();
    let source = InMemoryTemplateSource::new()
        .with_directory("docs")
        .with_file("docs/readme.txt", content.clone());
    let fs = MemoryFilesystem::new();
    let svc = service(source, fs.clone());

    svc.render(params(&[]), &[], Path::new("/out"), &RenderOptions::default())
        .unwrap();

    assert_eq!(fs.read_file(Path::new("/out/docs/readme.txt")).unwrap(), content);
}

#[test]
fn rendering_twice_into_fresh_destinations_is_identical() {
    let build = || {
        InMemoryTemplateSource::new()
            .with_file("{{name}}/a.txt", b"v = {{name}}\n".to_vec())
            .with_file("{{name}}/b.txt", b"plain\n".to_vec())
    };
    let fs = MemoryFilesystem::new();

    service(build(), fs.clone())
        .render(params(&[("name", "x")]), &[], Path::new("/one"), &RenderOptions::default())
        .unwrap();
    service(build(), fs.clone())
        .render(params(&[("name", "x")]), &[], Path::new("/two"), &RenderOptions::default())
        .unwrap();

    for rel in ["x/a.txt", "x/b.txt"] {
        assert_eq!(
            fs.read_file(&Path::new("/one").join(rel)).unwrap(),
            fs.read_file(&Path::new("/two").join(rel)).unwrap(),
        );
    }
}

#[test]
fn traversal_parameter_is_rejected_before_any_write() {
    let source = InMemoryTemplateSource::new().with_file("{{name}}/x.txt", b"x".to_vec());
    let fs = MemoryFilesystem::new();
    let svc = service(source, fs.clone());

    let err = svc
        .render(
            params(&[("name", "../../etc")]),
            &[],
            Path::new("/out"),
            &RenderOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        EngineError::Domain(DomainError::InvalidParameterValue { .. })
    ));
    assert!(fs.list_files().is_empty());
}

#[test]
fn unresolved_token_names_token_and_leaves_no_partial_file() {
    let source = InMemoryTemplateSource::new().with_file("a.txt", b"hello {{ghost}}".to_vec());
    let fs = MemoryFilesystem::new();
    let svc = service(source, fs.clone());

    let err = svc
        .render(params(&[]), &[], Path::new("/out"), &RenderOptions::default())
        .unwrap_err();

    match err {
        EngineError::Domain(DomainError::UnresolvedToken { token, origin }) => {
            assert_eq!(token, "ghost");
            assert_eq!(origin, "a.txt");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(fs.list_files().is_empty());
}

#[test]
fn existing_destination_file_is_a_conflict_and_stays_untouched() {
    let source = InMemoryTemplateSource::new().with_file("myapp/App.java", b"new".to_vec());
    let fs = MemoryFilesystem::new();
    fs.seed_file("/out/myapp/App.java", b"original".to_vec());
    let svc = service(source, fs.clone());

    let err = svc
        .render(params(&[]), &[], Path::new("/out"), &RenderOptions::default())
        .unwrap_err();

    assert!(matches!(
        err,
        EngineError::Application(ApplicationError::DestinationConflict { .. })
    ));
    assert_eq!(
        fs.read_file(Path::new("/out/myapp/App.java")).unwrap(),
        b"original"
    );
}

#[test]
fn overwrite_mode_replaces_existing_file() {
    let source = InMemoryTemplateSource::new().with_file("myapp/App.java", b"new".to_vec());
    let fs = MemoryFilesystem::new();
    fs.seed_file("/out/myapp/App.java", b"original".to_vec());
    let svc = service(source, fs.clone());

    svc.render(
        params(&[]),
        &[],
        Path::new("/out"),
        &RenderOptions {
            overwrite: true,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(fs.read_file(Path::new("/out/myapp/App.java")).unwrap(), b"new");
}

#[test]
fn colliding_rendered_paths_are_rejected() {
    let source = InMemoryTemplateSource::new()
        .with_file("{{a}}.txt", b"1".to_vec())
        .with_file("{{b}}.txt", b"2".to_vec());
    let fs = MemoryFilesystem::new();
    let svc = service(source, fs.clone());

    let err = svc
        .render(
            params(&[("a", "same"), ("b", "same")]),
            &[],
            Path::new("/out"),
            &RenderOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        EngineError::Domain(DomainError::DuplicatePath { .. })
    ));
}

#[test]
fn executable_bit_is_preserved() {
    let source =
        InMemoryTemplateSource::new().with_executable_file("gradlew", b"#!/bin/sh\n".to_vec());
    let fs = MemoryFilesystem::new();
    let svc = service(source, fs.clone());

    svc.render(params(&[]), &[], Path::new("/out"), &RenderOptions::default())
        .unwrap();

    assert!(fs.is_executable(Path::new("/out/gradlew")));
}

#[test]
fn binary_file_with_token_like_bytes_is_copied_verbatim() {
    let raw = b"\x89PNG{{not_a_param}}".to_vec();
    let source = InMemoryTemplateSource::new().with_file("res/icon.png", raw.clone());
    let fs = MemoryFilesystem::new();
    let svc = service(source, fs.clone());

    svc.render(params(&[]), &[], Path::new("/out"), &RenderOptions::default())
        .unwrap();

    assert_eq!(fs.read_file(Path::new("/out/res/icon.png")).unwrap(), raw);
}

#[test]
fn cancelled_render_writes_nothing() {
    let source = InMemoryTemplateSource::new().with_file("a.txt", b"x".to_vec());
    let fs = MemoryFilesystem::new();
    let svc = service(source, fs.clone());

    let cancel = CancelFlag::new();
    cancel.cancel();

    let err = svc
        .render(
            params(&[]),
            &[],
            Path::new("/out"),
            &RenderOptions {
                overwrite: false,
                cancel,
            },
        )
        .unwrap_err();

    assert!(matches!(
        err,
        EngineError::Application(ApplicationError::Cancelled)
    ));
    assert!(fs.list_files().is_empty());
}

#[test]
fn preview_renders_without_writing() {
    let source = InMemoryTemplateSource::new().with_file("{{name}}.txt", b"{{name}}".to_vec());
    let fs = MemoryFilesystem::new();
    let svc = service(source, fs.clone());

    let tree = svc.preview(params(&[("name", "app")]), &[]).unwrap();

    assert_eq!(tree.entry_count(), 1);
    assert_eq!(tree.entries()[0].path().as_str(), "app.txt");
    assert!(fs.list_files().is_empty());
}

// ── end-to-end on the real filesystem ─────────────────────────────────────────

#[test]
fn local_filesystem_end_to_end() {
    let template_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();

    std::fs::create_dir_all(template_dir.path().join("{{name}}/src")).unwrap();
    std::fs::write(
        template_dir.path().join("{{name}}/src/App.java"),
        b"package {{bundle_id}};\n",
    )
    .unwrap();
    std::fs::write(
        template_dir.path().join("template.toml"),
        br#"
[template]
id = "demo"
version = "1.0.0"

[metadata]
name = "Demo"
"#,
    )
    .unwrap();

    let svc = RenderService::new(
        Box::new(FilesystemTemplateSource::new(template_dir.path())),
        Box::new(LocalFilesystem::new()),
    );

    let report = svc
        .render(
            params(&[("name", "myapp"), ("bundle_id", "com.example.app")]),
            &[],
            dest_dir.path(),
            &RenderOptions::default(),
        )
        .unwrap();

    assert_eq!(report.files_written, 1);
    let written = std::fs::read(dest_dir.path().join("myapp/src/App.java")).unwrap();
    assert_eq!(written, b"package com.example.app;\n");
    // manifest is engine configuration, never rendered into the output
    assert!(!dest_dir.path().join("template.toml").exists());
}

#[test]
fn local_filesystem_rerender_is_deterministic() {
    let template_dir = tempfile::tempdir().unwrap();
    std::fs::write(template_dir.path().join("hello.txt"), b"hello {{name}}\n").unwrap();

    let render_into = |dest: &Path| {
        let svc = RenderService::new(
            Box::new(FilesystemTemplateSource::new(template_dir.path())),
            Box::new(LocalFilesystem::new()),
        );
        svc.render(
            params(&[("name", "world")]),
            &[],
            dest,
            &RenderOptions::default(),
        )
        .unwrap();
    };

    let one = tempfile::tempdir().unwrap();
    let two = tempfile::tempdir().unwrap();
    render_into(one.path());
    render_into(two.path());

    assert_eq!(
        std::fs::read(one.path().join("hello.txt")).unwrap(),
        std::fs::read(two.path().join("hello.txt")).unwrap(),
    );
}
