use anyhow::Context;

pub fn create_temp_dir() -> anyhow::Result<std::path::PathBuf> {
    let mut idx = 0;
    loop {
        let tmp_dir = std::env::temp_dir().join(format!("vendor_tools_test{}", &idx));
        if let Err(error) = std::fs::create_dir(&tmp_dir) {
            match error.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    idx += 1;
                }
                _ => return Err(error.into()),
            }
        } else {
            return Ok(tmp_dir);
        }
    }
}

pub fn setup_test_dir() -> anyhow::Result<std::path::PathBuf> {
    // create a temporary directory
    let tmp_dir = create_temp_dir()?;
    // foo
    // |- 0.txt
    // |- bar
    //    |- 1.txt
    //    |- 2.txt
    //    |- 3.txt
    // |- baz
    //    |- 4.txt
    //    |- 5.txt -> ../bar/2.txt
    //    |- 6.txt -> (absolute path) .../foo/bar/3.txt
    let foo_path = tmp_dir.join("foo");
    std::fs::create_dir(&foo_path)?;
    std::fs::write(foo_path.join("0.txt"), "0")?;
    let bar_path = foo_path.join("bar");
    std::fs::create_dir(&bar_path)?;
    std::fs::write(bar_path.join("1.txt"), "1")?;
    std::fs::write(bar_path.join("2.txt"), "2")?;
    std::fs::write(bar_path.join("3.txt"), "3")?;
    let baz_path = foo_path.join("baz");
    std::fs::create_dir(&baz_path)?;
    std::fs::write(baz_path.join("4.txt"), "4")?;
    std::os::unix::fs::symlink("../bar/2.txt", baz_path.join("5.txt"))?;
    std::os::unix::fs::symlink(bar_path.join("3.txt"), baz_path.join("6.txt"))?;
    Ok(tmp_dir)
}

pub fn check_dirs_identical(src: &std::path::Path, dst: &std::path::Path) -> anyhow::Result<()> {
    for src_entry in std::fs::read_dir(src)? {
        let src_entry_path = src_entry?.path();
        let src_entry_name = src_entry_path.file_name().unwrap();
        let dst_entry_path = dst.join(src_entry_name);
        let src_md = std::fs::metadata(&src_entry_path)
            .with_context(|| format!("source file {:?} is missing!", &src_entry_path))?;
        let dst_md = std::fs::metadata(&dst_entry_path)
            .with_context(|| format!("destination file {:?} is missing!", &dst_entry_path))?;
        assert_eq!(src_md.is_file(), dst_md.is_file());
        if src_md.is_file() {
            let src_contents = std::fs::read(&src_entry_path)?;
            let dst_contents = std::fs::read(&dst_entry_path)?;
            assert_eq!(src_contents, dst_contents);
        } else {
            check_dirs_identical(&src_entry_path, &dst_entry_path)?;
        }
    }
    Ok(())
}
