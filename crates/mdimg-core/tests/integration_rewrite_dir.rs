//! End-to-end runs over a scratch directory of Markdown and other files.

use std::fs;
use std::path::Path;

use mdimg_core::{run, ImageLinkRewriter, RewriteError, RunOptions};

const POST: &str = "2021-05-01-my-post";

fn options(dir: &Path) -> RunOptions {
    RunOptions {
        dir: dir.to_path_buf(),
        folder: POST.to_string(),
        fail_fast: false,
    }
}

#[test]
fn rewrites_markdown_and_skips_everything_else() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(
        root.join("post.md"),
        "# Hello\n\n![alt](./images/image1.png)\n\nText ![b](images/image2.jpg) end\n",
    )
    .unwrap();
    let notes = b"![alt](./images/image1.png)\n".to_vec();
    fs::write(root.join("notes.txt"), &notes).unwrap();
    fs::write(root.join("UPPER.MD"), "![u](images/image9.png)").unwrap();
    fs::write(root.join("empty.md"), "").unwrap();

    let mut printed = Vec::new();
    let summary = run(&options(root), &ImageLinkRewriter::default(), |p| {
        printed.push(p.file_name().unwrap().to_string_lossy().into_owned())
    })
    .unwrap();

    assert_eq!(printed, vec!["empty.md", "post.md"]);
    assert_eq!(summary.rewritten(), 1);
    assert_eq!(summary.unchanged(), 1);
    assert_eq!(summary.replacements(), 2);

    assert_eq!(
        fs::read_to_string(root.join("post.md")).unwrap(),
        "# Hello\n\n![alt](https://gnoy-nus.github.io/img/in-post/2021-05-01-my-post/images/image1.png)\n\n\
         Text ![b](https://gnoy-nus.github.io/img/in-post/2021-05-01-my-post/images/image2.jpg) end\n"
    );
    assert_eq!(fs::read(root.join("notes.txt")).unwrap(), notes);
    assert_eq!(
        fs::read_to_string(root.join("UPPER.MD")).unwrap(),
        "![u](images/image9.png)"
    );
    assert_eq!(fs::read(root.join("empty.md")).unwrap(), b"");

    let leftovers: Vec<_> = fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .filter(|n| n.to_string_lossy().ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn second_run_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("post.md");
    fs::write(&path, "![alt](./images/image1.png)\n").unwrap();

    let rewriter = ImageLinkRewriter::default();
    run(&options(dir.path()), &rewriter, |_| {}).unwrap();
    let first = fs::read_to_string(&path).unwrap();

    let summary = run(&options(dir.path()), &rewriter, |_| {}).unwrap();
    assert_eq!(summary.rewritten(), 0);
    assert_eq!(summary.unchanged(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn bad_files_are_reported_and_others_still_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("a-dir.md")).unwrap();
    fs::write(root.join("b-latin1.md"), b"![caf\xe9](images/image1.png)").unwrap();
    fs::write(root.join("c-good.md"), "![ok](images/image1.png)").unwrap();

    let summary = run(&options(root), &ImageLinkRewriter::default(), |_| {}).unwrap();
    assert_eq!(summary.failed(), 2);
    assert_eq!(summary.rewritten(), 1);

    let failures: Vec<_> = summary.failures().collect();
    assert!(matches!(failures[0], RewriteError::Read { .. }));
    assert!(matches!(failures[1], RewriteError::Decode { .. }));
    assert_eq!(
        fs::read(root.join("b-latin1.md")).unwrap(),
        b"![caf\xe9](images/image1.png)"
    );
    assert!(fs::read_to_string(root.join("c-good.md"))
        .unwrap()
        .starts_with("![ok](https://gnoy-nus.github.io/"));
}

#[test]
fn fail_fast_aborts_on_directory_named_md() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("a.md")).unwrap();
    fs::write(root.join("b.md"), "![b](images/image1.png)").unwrap();

    let mut opts = options(root);
    opts.fail_fast = true;
    let mut printed = Vec::new();
    let err = run(&opts, &ImageLinkRewriter::default(), |p| printed.push(p.to_path_buf()))
        .unwrap_err();

    assert_eq!(printed, vec![root.join("a.md")]);
    assert!(matches!(
        err.downcast_ref::<RewriteError>(),
        Some(RewriteError::Read { .. })
    ));
    assert_eq!(
        fs::read_to_string(root.join("b.md")).unwrap(),
        "![b](images/image1.png)"
    );
}

#[test]
fn custom_base_url_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    fs::write(&cfg_path, "base_url = \"https://cdn.example.com/blog/\"\n").unwrap();
    let cfg = mdimg_core::config::load_or_init_at(&cfg_path).unwrap();

    let posts = dir.path().join("posts");
    fs::create_dir(&posts).unwrap();
    fs::write(posts.join("p.md"), "![x](images/image4.webp)").unwrap();

    run(&options(&posts), &cfg.rewriter(), |_| {}).unwrap();
    assert_eq!(
        fs::read_to_string(posts.join("p.md")).unwrap(),
        "![x](https://cdn.example.com/blog/2021-05-01-my-post/images/image4.webp)"
    );
}

#[cfg(unix)]
#[test]
fn symlinked_markdown_rewrites_the_target() {
    let dir = tempfile::tempdir().unwrap();
    let shared = dir.path().join("shared");
    let posts = dir.path().join("posts");
    fs::create_dir(&shared).unwrap();
    fs::create_dir(&posts).unwrap();
    let real = shared.join("real.txt");
    fs::write(&real, "![a](images/image1.png)").unwrap();
    std::os::unix::fs::symlink(&real, posts.join("link.md")).unwrap();

    let mut opts = options(&posts);
    opts.fail_fast = true;
    let summary = run(&opts, &ImageLinkRewriter::default(), |_| {}).unwrap();

    assert_eq!(summary.rewritten(), 1);
    assert!(fs::symlink_metadata(posts.join("link.md"))
        .unwrap()
        .file_type()
        .is_symlink());
    assert_eq!(
        fs::read_to_string(&real).unwrap(),
        "![a](https://gnoy-nus.github.io/img/in-post/2021-05-01-my-post/images/image1.png)"
    );
}
