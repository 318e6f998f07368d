//! Lattice CLI Client
//!
//! Command-line interface for running database commands over one session.
//! Executes a single command with `--command`, or reads commands from stdin
//! until EOF or `exit`.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lattice_client::{ClientConfig, CommandOutcome, Credentials, Session};

/// Lattice CLI
#[derive(Parser, Debug)]
#[command(name = "lattice-cli")]
#[command(about = "CLI for the Lattice database server", version)]
struct Args {
    /// Server address as host:port
    #[arg(short, long, default_value = "127.0.0.1:1984")]
    server: String,

    /// Username for authentication
    #[arg(short, long, default_value = "admin")]
    username: String,

    /// Password for authentication
    #[arg(short, long, default_value = "admin")]
    password: String,

    /// Execute a single command and exit
    #[arg(short, long)]
    command: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let (host, port) = match parse_server(&args.server) {
        Ok(endpoint) => endpoint,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::FAILURE;
        }
    };

    let config = ClientConfig::builder()
        .host(host)
        .port(port)
        .credentials(Credentials::new(&args.username, &args.password))
        .build();

    let mut session = match Session::connect(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let status = match args.command {
        Some(command) => run_one(&mut session, &command),
        None => run_repl(&mut session),
    };

    session.close();
    status
}

/// Split a host:port argument
fn parse_server(server: &str) -> Result<(String, u16), String> {
    let (host, port) = server
        .rsplit_once(':')
        .ok_or_else(|| format!("invalid server address '{}': expected host:port", server))?;

    let port: u16 = port
        .parse()
        .map_err(|_| format!("invalid port in server address '{}'", server))?;

    Ok((host.to_string(), port))
}

/// Execute one command and print its outcome
///
/// Returns `Ok(true)` on success, `Ok(false)` when the server rejected the
/// command, and `Err` when the channel died.
fn dispatch(session: &mut Session, command: &str) -> lattice_client::Result<bool> {
    match session.execute(command)? {
        CommandOutcome::Success { result, info } => {
            let mut stdout = io::stdout().lock();
            let _ = stdout.write_all(&result);
            if !result.is_empty() && !result.ends_with(b"\n") {
                let _ = stdout.write_all(b"\n");
            }
            if !info.is_empty() {
                eprintln!("{}", String::from_utf8_lossy(&info).trim_end());
            }
            Ok(true)
        }
        CommandOutcome::CommandError { info } => {
            eprintln!("{}", String::from_utf8_lossy(&info).trim_end());
            Ok(false)
        }
    }
}

/// Single-command mode
fn run_one(session: &mut Session, command: &str) -> ExitCode {
    match dispatch(session, command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Interactive mode: read commands from stdin until EOF or `exit`
fn run_repl(session: &mut Session) -> ExitCode {
    eprintln!("connected to {}; type 'exit' to quit", session.peer_addr());

    let stdin = io::stdin().lock();
    for line in stdin.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        };

        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if command == "exit" || command == "quit" {
            break;
        }

        match dispatch(session, command) {
            // Command errors are recoverable; keep reading.
            Ok(_) => {}
            // A dead channel is not: every later execute would fail fast.
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
