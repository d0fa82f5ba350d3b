use std::{env, fs, path::PathBuf};

// Generates $OUT_DIR/model_data.rs with the compiled-in model blob and
// sample input. Paths come from the environment so the model artifacts
// stay outside the source tree.
fn main() {
    println!("cargo:rerun-if-env-changed=MLP_SELFTEST_MODEL");
    println!("cargo:rerun-if-env-changed=MLP_SELFTEST_INPUT");
    println!("cargo:rerun-if-env-changed=MLP_SELFTEST_MODEL_NAME");
    println!("cargo:rerun-if-env-changed=TFLITE_GLUE_LIB_DIR");

    let name = env::var("MLP_SELFTEST_MODEL_NAME").unwrap_or_else(|_| "MLP_32x32".to_string());
    let blob = bytes_expr("MLP_SELFTEST_MODEL");
    let input = bytes_expr("MLP_SELFTEST_INPUT");

    let generated = format!(
        "pub static MODEL_NAME: &str = {name:?};\n\
         pub static MODEL_BLOB: &[u8] = {blob};\n\
         pub static SAMPLE_INPUT: &[u8] = {input};\n"
    );

    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out.join("model_data.rs"), generated).expect("write model_data.rs");

    if env::var_os("CARGO_FEATURE_TFLITE").is_some() {
        if let Some(dir) = env::var_os("TFLITE_GLUE_LIB_DIR") {
            println!("cargo:rustc-link-search=native={}", PathBuf::from(dir).display());
        }
    }
}

fn bytes_expr(var: &str) -> String {
    match env::var_os(var) {
        Some(path) => {
            let path = fs::canonicalize(&path)
                .unwrap_or_else(|e| panic!("{var}={}: {e}", PathBuf::from(&path).display()));
            println!("cargo:rerun-if-changed={}", path.display());
            format!("include_bytes!({:?})", path.display().to_string())
        }
        None => "&[]".to_string(),
    }
}
