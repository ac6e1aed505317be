use std::collections::HashMap;
use std::env;
use std::fmt::Write;
use std::path::PathBuf;

fn main() {
    // (Variable, Type, Default value)
    let mut configs: HashMap<&str, (&str, &str)> = HashMap::from([
        (
            "TRANSMISSION_TIMEOUT",
            ("Duration", "Duration::from_ms(500)"),
        ),
        ("MAX_PENDING_COMMANDS", ("usize", "16")),
        ("KEY_COUNTER_UNSET", ("u8", "0xff")),
    ]);

    println!("cargo:rerun-if-changed=build.rs");
    for name in configs.keys() {
        println!("cargo:rerun-if-env-changed=OSNP_{name}");
    }

    let mut data = String::new();
    writeln!(data, "use crate::time::Duration;").unwrap();

    for (var, value) in env::vars() {
        if let Some(name) = var.strip_prefix("OSNP_") {
            // Consume the setting, anything left keeps its default.
            let Some((_, (ty, _))) = configs.remove_entry(name) else {
                panic!("Wrong configuration name {name}");
            };

            writeln!(data, "pub const {name}: {ty} = {value};").unwrap();
        }
    }

    for (name, (ty, value)) in configs.iter() {
        writeln!(data, "pub const {name}: {ty} = {value};").unwrap();
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    std::fs::write(out_dir.join("config.rs"), data).unwrap();
}
