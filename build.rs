// Stages the static site into `dist/`. The wasm bundle itself is produced by
// `wasm-pack build --target web --out-dir static/pkg`.
use std::path::Path;

use fs_extra::dir::{copy, create_all, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        return;
    }

    let out_dir = Path::new("dist");
    if let Err(e) = create_all(out_dir, true) {
        println!("cargo:warning=could not reset dist/: {e}");
        return;
    }

    let options = CopyOptions::new().content_only(true);
    if let Err(e) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=copying static/ to dist/ failed: {e}");
    }
}
