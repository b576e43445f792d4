//! One request/response exchange with a real terminal

use pedlink::{Terminal, TerminalConfig};

fn main() -> pedlink::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let host = std::env::var("PED_HOST").unwrap_or_else(|_| "192.168.1.50".to_string());
    let port = std::env::var("PED_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(6001);

    let config = TerminalConfig::new(host, port).with_service_name("demo-lane");
    let mut terminal = Terminal::new(config);

    terminal.connect()?;
    println!("Terminal connected!");

    // Amount-entry request; the terminal replies with a status frame
    let response = terminal.send_message(&["0200", "000000001000", "978"], true)?;
    println!("Response: {:?}", response);

    terminal.disconnect();
    println!("Done!");

    Ok(())
}
