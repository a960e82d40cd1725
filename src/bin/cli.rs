//! NimbusDB CLI Shell
//!
//! Interactive shell (and one-shot runner) for a NimbusDB server.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::Parser;
use nimbusdb_client::{Client, ClientConfig, Response, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// NimbusDB CLI
#[derive(Parser, Debug)]
#[command(name = "nimbusdb-cli")]
#[command(about = "Interactive shell for NimbusDB")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = nimbusdb_client::DEFAULT_HOST)]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = nimbusdb_client::DEFAULT_PORT)]
    port: u16,

    /// Username for the LOGIN handshake
    #[arg(short, long)]
    username: String,

    /// Password for the LOGIN handshake
    #[arg(long)]
    password: String,

    /// Socket read timeout in milliseconds (0 waits forever)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Run a single command expression and exit
    #[arg(short, long)]
    execute: Option<String>,
}

fn main() {
    // Initialize tracing/logging; logs go to stderr so piped shell output
    // stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let read_timeout = if args.read_timeout_ms > 0 {
        Some(Duration::from_millis(args.read_timeout_ms))
    } else {
        None
    };

    let config = ClientConfig::builder()
        .host(&args.host)
        .port(args.port)
        .username(&args.username)
        .password(&args.password)
        .read_timeout(read_timeout)
        .build();

    let mut client = match Client::connect(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to connect: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "NimbusDB CLI v{} connected to {}",
        nimbusdb_client::VERSION,
        client.session().peer_addr()
    );

    if let Some(expression) = args.execute.as_deref() {
        run_once(client, expression);
        return;
    }

    repl(&mut client);

    if let Err(e) = client.quit() {
        tracing::debug!("Quit failed: {}", e);
    }
}

/// Execute one expression, print the response, and exit
///
/// The process exit code reflects the server's verdict, for scripting.
fn run_once(client: Client, expression: &str) {
    match client.execute(expression) {
        Ok(response) => {
            print_response(&response);
            let succeeded = response.is_success();
            if let Err(e) = client.quit() {
                tracing::debug!("Quit failed: {}", e);
            }
            if !succeeded {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Read-eval-print loop; returns on `:quit` or stdin EOF
fn repl(client: &mut Client) {
    println!("NimbusDB shell. Type :help for commands, :quit to leave.");
    let stdin = io::stdin();

    loop {
        match client.current_database() {
            Some(db) => print!("nimbus:{}> ", db),
            None => print!("nimbus> "),
        }
        if io::stdout().flush().is_err() {
            return;
        }

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            // EOF or a dead terminal
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix(':') {
            if !shell_command(client, command) {
                return;
            }
            continue;
        }

        report(client.execute(input));
    }
}

/// Handle a `:` shell command; returns false when the shell should exit
fn shell_command(client: &mut Client, command: &str) -> bool {
    let mut parts = command.splitn(2, ' ');
    let name = parts.next().unwrap_or("");
    let arg = parts.next().map(str::trim);

    match (name, arg) {
        ("q", _) | ("quit", _) => return false,
        ("h", _) | ("help", _) => print_help(),
        ("fetch", _) => report(client.fetch()),
        ("profile", _) => report(client.server_profile()),
        ("debug", Some("on")) => report(client.set_debug(true)),
        ("debug", Some("off")) => report(client.set_debug(false)),
        ("debug", _) => println!("usage: :debug on|off"),
        ("use", Some(db)) if !db.is_empty() => report(client.use_database(db)),
        ("use", _) => println!("usage: :use <database>"),
        _ => println!("unknown command :{} (try :help)", name),
    }
    true
}

/// Print a response outcome, or the client-side error that prevented one
fn report(result: Result<Response>) {
    match result {
        Ok(response) => print_response(&response),
        Err(e) => eprintln!("error: {}", e),
    }
}

fn print_response(response: &Response) {
    match response.status.as_deref() {
        Some(status) => println!("[{}] {}", status, response.message_text()),
        None => println!("[no status] {}", response.message_text()),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  :help            show this help");
    println!("  :use <database>  select a database (tracked in the prompt)");
    println!("  :fetch           retrieve the result stored by the last query");
    println!("  :debug on|off    toggle server-side debug logging");
    println!("  :profile         show the authenticated profile");
    println!("  :quit            send QUIT and leave");
    println!();
    println!("Anything else is sent to the server as a command expression,");
    println!("e.g. database.list() or inventory.find({{}})");
}
