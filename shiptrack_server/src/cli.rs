use std::{env, env::VarError};

/// There's no real CLI for the server. Any argument at all prints the help text and the current configuration.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Secrets are deliberately absent from this list
    const DISPLAY_ENVS: [&str; 17] = [
        "RUST_LOG",
        "STK_HOST",
        "STK_PORT",
        "STK_DATABASE_URL",
        "STK_RECONCILE_INTERVAL_MINS",
        "STK_BATCH_SIZE",
        "STK_WAIT_WINDOW_HOURS",
        "STK_CARRIER_CALL_INTERVAL_MS",
        "STK_TRACKING_URL_TEMPLATE",
        "STK_CARRIER_URL",
        "STK_CARRIER_NAMESPACE",
        "STK_CARRIER_USERNAME",
        "STK_CARRIER_CUSTOMER_CODE",
        "STK_CARRIER_TIMEOUT_SECS",
        "STK_CARRIER_UTC_OFFSET_MINS",
        "STK_NOTIFY_DESTINATION",
        "STK_NOTIFY_WEBHOOK_URL",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
