const COPY_DIRS: &[&str] = &[
    "include/sanitizer",
    "lib/sanitizer_common",
    "lib/asan",
    "lib/interception",
    "lib/builtins",
    "lib/lsan",
    "lib/ubsan",
    "lib/ubsan_minimal",
];

fn setup_trees() -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let vendor_root = tmp_dir.path().join("repo").join("vendor");
    let llvm_dir = tmp_dir.path().join("llvm-project");
    let upstream_rt = llvm_dir.join("compiler-rt");
    let vendored_rt = vendor_root.join("compiler-rt");
    for dir in COPY_DIRS {
        std::fs::create_dir_all(upstream_rt.join(dir)).unwrap();
        std::fs::create_dir_all(vendored_rt.join(dir)).unwrap();
    }
    std::fs::write(upstream_rt.join("CREDITS.TXT"), "upstream credits").unwrap();
    std::fs::write(upstream_rt.join("LICENSE.TXT"), "upstream license").unwrap();
    (tmp_dir, vendor_root, llvm_dir)
}

fn run_update(vendor_root: &std::path::Path, llvm_dir: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("update-compiler-rt").unwrap();
    cmd.arg(llvm_dir)
        .arg("--vendor-root")
        .arg(vendor_root);
    cmd
}

#[test]
fn test_update_imports_upstream_files() {
    let (_tmp_dir, vendor_root, llvm_dir) = setup_trees();
    let upstream_builtins = llvm_dir.join("compiler-rt").join("lib").join("builtins");
    std::fs::write(upstream_builtins.join("atomic.c"), "upstream atomic").unwrap();
    std::fs::write(upstream_builtins.join("addtf3.c"), "upstream addtf3").unwrap();
    std::fs::write(upstream_builtins.join("clear_cache.S"), "asm").unwrap();
    std::fs::write(upstream_builtins.join("CMakeLists.txt"), "cmake").unwrap();
    std::fs::write(upstream_builtins.join("README.txt"), "upstream readme").unwrap();
    std::fs::write(upstream_builtins.join("asan.syms.extra"), "syms").unwrap();
    std::fs::write(upstream_builtins.join(".clang-format"), "style").unwrap();
    // nested directories of a configured subtree are not vendored
    std::fs::create_dir(upstream_builtins.join("macho_embedded")).unwrap();
    std::fs::write(upstream_builtins.join("macho_embedded").join("common.txt"), "x").unwrap();

    let vendored_builtins = vendor_root.join("compiler-rt").join("lib").join("builtins");
    std::fs::write(vendored_builtins.join("outdated.c"), "old import").unwrap();
    std::fs::write(vendored_builtins.join("readme.txt"), "local notes").unwrap();
    std::fs::write(vendored_builtins.join("emscripten_setjmp.c"), "local code").unwrap();

    run_update(&vendor_root, &llvm_dir).assert().success();

    assert_eq!(
        std::fs::read_to_string(vendored_builtins.join("atomic.c")).unwrap(),
        "upstream atomic"
    );
    assert_eq!(
        std::fs::read_to_string(vendored_builtins.join("addtf3.c")).unwrap(),
        "upstream addtf3"
    );
    // skip-list entries never land in the vendored tree
    assert!(!vendored_builtins.join("clear_cache.S").exists());
    assert!(!vendored_builtins.join("CMakeLists.txt").exists());
    assert!(!vendored_builtins.join("README.txt").exists());
    assert!(!vendored_builtins.join("asan.syms.extra").exists());
    assert!(!vendored_builtins.join(".clang-format").exists());
    assert!(!vendored_builtins.join("macho_embedded").exists());
    // pre-existing imports are cleared, local files survive
    assert!(!vendored_builtins.join("outdated.c").exists());
    assert_eq!(
        std::fs::read_to_string(vendored_builtins.join("readme.txt")).unwrap(),
        "local notes"
    );
    assert_eq!(
        std::fs::read_to_string(vendored_builtins.join("emscripten_setjmp.c")).unwrap(),
        "local code"
    );
    // attribution files land in the vendored root
    let vendored_rt = vendor_root.join("compiler-rt");
    assert_eq!(
        std::fs::read_to_string(vendored_rt.join("CREDITS.TXT")).unwrap(),
        "upstream credits"
    );
    assert_eq!(
        std::fs::read_to_string(vendored_rt.join("LICENSE.TXT")).unwrap(),
        "upstream license"
    );
}

#[test]
fn test_update_refreshes_every_subtree() {
    let (_tmp_dir, vendor_root, llvm_dir) = setup_trees();
    for dir in COPY_DIRS {
        std::fs::write(
            llvm_dir.join("compiler-rt").join(dir).join("source.cpp"),
            format!("content of {dir}"),
        )
        .unwrap();
    }
    run_update(&vendor_root, &llvm_dir).assert().success();
    for dir in COPY_DIRS {
        assert_eq!(
            std::fs::read_to_string(
                vendor_root.join("compiler-rt").join(dir).join("source.cpp")
            )
            .unwrap(),
            format!("content of {dir}")
        );
    }
}

#[test]
fn test_missing_upstream_fails_before_mutation() {
    let (_tmp_dir, vendor_root, llvm_dir) = setup_trees();
    let vendored_builtins = vendor_root.join("compiler-rt").join("lib").join("builtins");
    std::fs::write(vendored_builtins.join("outdated.c"), "old import").unwrap();
    std::fs::remove_dir_all(&llvm_dir).unwrap();
    run_update(&vendor_root, &llvm_dir)
        .assert()
        .failure()
        .stderr(predicates::str::contains("not found"));
    // nothing was cleared
    assert!(vendored_builtins.join("outdated.c").exists());
}

#[test]
fn test_missing_vendored_subtree_fails_before_mutation() {
    let (_tmp_dir, vendor_root, llvm_dir) = setup_trees();
    let vendored_asan = vendor_root.join("compiler-rt").join("lib").join("asan");
    std::fs::remove_dir_all(&vendored_asan).unwrap();
    let vendored_builtins = vendor_root.join("compiler-rt").join("lib").join("builtins");
    std::fs::write(vendored_builtins.join("outdated.c"), "old import").unwrap();
    run_update(&vendor_root, &llvm_dir)
        .assert()
        .failure()
        .stderr(predicates::str::contains("not found"));
    assert!(vendored_builtins.join("outdated.c").exists());
}

#[test]
fn test_summary_output() {
    let (_tmp_dir, vendor_root, llvm_dir) = setup_trees();
    std::fs::write(
        llvm_dir
            .join("compiler-rt")
            .join("lib")
            .join("builtins")
            .join("atomic.c"),
        "upstream atomic",
    )
    .unwrap();
    run_update(&vendor_root, &llvm_dir)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicates::str::contains("files copied:"))
        .stdout(predicates::str::contains("upstream entries skipped:"));
}
