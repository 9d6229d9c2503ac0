// Build script for sagectl - embeds version at compile time

fn main() {
    // Release pipelines may set SAGE_VERSION; otherwise use Cargo.toml
    let version =
        std::env::var("SAGE_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=SAGE_VERSION={}", version);
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=SAGE_VERSION");
}
