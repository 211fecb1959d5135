// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn flag(name: &'static str, short: char, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .short(short)
        .action(ArgAction::SetTrue)
        .help(help)
}

fn build_cli() -> Command {
    Command::new("drover")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Drover Contributors")
        .about("Administrative CLI for fleet-wide software package deployment")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(Arg::new("action").help("Action name or alias (run 'drover help' for the list)"))
        .arg(
            Arg::new("targets")
                .num_args(0..)
                .help("Target packages, receipts, or file paths for the action"),
        )
        .arg(flag("help", 'H', "Show usage instead of dispatching"))
        .arg(
            Arg::new("version")
                .long("version")
                .action(ArgAction::SetTrue)
                .help("Show the version banner"),
        )
        .arg(flag("quiet", 'q', "Less verbose output"))
        .arg(flag("verbose", 'v', "More verbose output"))
        .arg(flag("debug", 'd', "Maximum verbosity (implies --verbose)"))
        .arg(flag(
            "no-puppy-notification",
            'N',
            "Suppress the post-install reboot/logout notice",
        ))
        .arg(flag("puppies", 'p', "Opt into pending-reboot (\"puppy\") handling"))
        .arg(flag("force", 'f', "Bypass the backend availability cache"))
        .arg(flag("freeze", 'F', "Mark the installed package exempt from auto-update"))
        .arg(
            Arg::new("admin")
                .long("admin")
                .short('a')
                .value_name("NAME")
                .help("Explicit operator attribution (overrides auto-resolution)"),
        )
        .arg(
            Arg::new("expiration")
                .long("expiration")
                .short('e')
                .value_name("DAYS")
                .help("Custom pilot expiration in days"),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("drover.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
