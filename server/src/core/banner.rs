//! Startup banner

use std::net::IpAddr;
use std::path::Path;

use super::constants::{API_PREFIX, APP_NAME};

const W: usize = 10;

/// Whether `host` binds every network interface
pub(crate) fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}

/// Print the startup banner with URLs
pub(crate) fn print_banner(host: &str, port: u16, db_path: &Path) {
    let display_host = if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    };

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m http://{}:{}{}",
        "API:", display_host, port, API_PREFIX
    );
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m http://{}:{}/api/docs",
        "Docs:", display_host, port
    );

    for url in network_urls(host, port) {
        println!("  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}", "Network:", url);
    }
    if host == "127.0.0.1" || host == "localhost" {
        println!(
            "  \x1b[90m➜  {:<W$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    }

    println!("  \x1b[90m➜  {:<W$} {}\x1b[0m", "Database:", db_path.display());
    println!();
}

/// Reachable LAN URLs for the bind address
fn network_urls(host: &str, port: u16) -> Vec<String> {
    if is_all_interfaces(host) {
        local_ip_address::list_afinet_netifas()
            .map(|interfaces| {
                interfaces
                    .into_iter()
                    .map(|(_, ip)| ip)
                    .filter(|ip| ip.is_ipv4() && !ip.is_loopback())
                    .map(|ip| format!("http://{}:{}", ip, port))
                    .collect()
            })
            .unwrap_or_default()
    } else {
        match host.parse::<IpAddr>() {
            Ok(ip) if !ip.is_loopback() => vec![format!("http://{}:{}", ip, port)],
            _ => Vec::new(),
        }
    }
}
