// src/help.rs

//! Local usage and version rendering
//!
//! Generated from the registry, so the action list can never go stale.

use crate::registry::REGISTRY;

pub fn print_usage() {
    println!("Usage: drover <action> [target ...] [options]");
    println!();
    println!("Actions:");
    for spec in REGISTRY {
        let argument = match spec.arg_kind {
            Some(kind) => format!(" <{}>", kind),
            None => String::new(),
        };
        let alias = match spec.alias {
            Some(alias) => format!("  (alias: {})", alias),
            None => String::new(),
        };
        println!("  {:<16}{}{}", spec.name, argument, alias);
    }
    println!();
    println!("Options:");
    println!("  -H, --help                   Show this usage text");
    println!("      --version                Show the version banner");
    println!("  -q, --quiet                  Less verbose output");
    println!("  -v, --verbose                More verbose output");
    println!("  -d, --debug                  Maximum verbosity (implies --verbose)");
    println!("  -N, --no-puppy-notification  Suppress the post-install reboot/logout notice");
    println!("  -p, --puppies                Opt into pending-reboot (\"puppy\") handling");
    println!("  -f, --force                  Bypass the backend availability cache");
    println!("  -F, --freeze                 Mark the installed package exempt from auto-update");
    println!("  -a, --admin <NAME>           Explicit operator attribution");
    println!("  -e, --expiration <DAYS>      Custom pilot expiration in days");
}

pub fn print_version() {
    println!("drover {}", env!("CARGO_PKG_VERSION"));
}
