use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=CSSDICT_ROOT_HINT");

    if let Ok(raw_hint) = env::var("CSSDICT_ROOT_HINT") {
        let candidate = PathBuf::from(raw_hint);
        let canonical = candidate.canonicalize().unwrap_or(candidate);

        println!("cargo:rustc-env=CSSDICT_ROOT_HINT={}", canonical.display());
    }
}
