use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    let output = Command::new("git").args(["describe", "--tags", "--long", "--always"]).output();
    let version = match output {
        Ok(output) if output.status.success() => {
            let rev = String::from_utf8(output.stdout).unwrap_or_default();
            match rev.trim() {
                "" => env!("CARGO_PKG_VERSION").to_owned(),
                rev => rev.to_owned(),
            }
        },
        _ => env!("CARGO_PKG_VERSION").to_owned(),
    };
    println!("cargo:rustc-env=ASSETS_UTILS_VERSION={}", version);
}
