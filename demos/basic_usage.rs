// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the hexini crate.
//!
//! This example demonstrates:
//! - Loading an INI file into an application's configuration
//! - Typed values for well-known keys (bool, int, duration)
//! - Reading non-mirrored sections with and without fallbacks
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage -- path/to/app.ini
//! ```

use hexini::prelude::*;

const EMBEDDED: &str = "
[flask]
secret_key                 : 12345678
debug                      : true
permanent_session_lifetime : 100
server_name                = testserv
send_file_max_age_default  : 3600

[database]
host = localhost
url  = postgres://%(host)s/app
";

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== hexini: Basic Usage ===\n");

    let mut app = Application::new("demo");
    let mut loader = IniConfigLoader::new();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        println!("No files given, reading the embedded document.\n");
        loader.read_str(&mut app.app_context(), EMBEDDED)?;
    } else {
        let read = loader.read(&mut app.app_context(), &paths)?;
        println!("Read {} of {} file(s): {:?}\n", read.len(), paths.len(), read);
    }

    println!("--- Mirrored configuration ---");
    for (key, value) in app.config().iter() {
        println!("  {:<28} {:<9} {}", key.as_str(), value.kind(), value);
    }

    println!("\n--- Application view ---");
    println!("  debug:            {}", app.debug());
    println!("  server name:      {:?}", app.server_name());
    println!(
        "  session lifetime: {} days",
        app.permanent_session_lifetime().num_days()
    );

    println!("\n--- Other sections ---");
    for section in loader.sections() {
        if section.eq_ignore_ascii_case(loader.reserved_section()) {
            continue;
        }
        for (option, value) in loader.items(section)? {
            println!("  [{}] {} = {}", section, option, value);
        }
    }

    let pool = loader.get_int_or("database", "pool_size", 5)?;
    println!("\n  database pool size (fallback 5): {}", pool);

    match loader.get("database", "password") {
        Ok(_) => println!("  database password is set"),
        Err(e) => println!("  {}", e),
    }

    Ok(())
}
