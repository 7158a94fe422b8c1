use std::fs;

const DEFAULT_API_VERSION: &str = "2024-06-20";

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");

    let cargo_toml = fs::read_to_string("Cargo.toml").expect("Failed to read Cargo.toml");
    let cargo: toml::Table = cargo_toml.parse().expect("Failed to parse Cargo.toml");

    let api_version = cargo
        .get("package")
        .and_then(|pkg| pkg.get("metadata"))
        .and_then(|meta| meta.get("stripe"))
        .and_then(|stripe| stripe.get("api-version"))
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_API_VERSION);

    println!("cargo:rustc-env=STRIPE_API_VERSION={}", api_version);
}
