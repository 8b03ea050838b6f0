use std::io;
use std::process;

use clap::Parser;

use reverse_listener::config::{parse_port, AddrFamily, ListenerConfig};
use reverse_listener::session::SessionEnd;
use reverse_listener::{listener, session, Error};

/// Interactive TCP listener for driving a reverse shell by hand.
#[derive(Parser, Debug)]
#[command(name = "reverse-listener", version, disable_version_flag = true)]
struct Cli {
    /// Use an IPv6 socket
    #[arg(short = '6', long = "ipv6")]
    ipv6: bool,

    /// Display version information and exit
    #[arg(
        short = 'v',
        long = "version",
        action = clap::ArgAction::Version,
        value_parser = clap::value_parser!(bool)
    )]
    version: Option<bool>,

    /// Host to listen as (accepted for parity with the companion client;
    /// the socket always binds the wildcard address)
    host: String,

    /// Port to listen on (1-65535)
    #[arg(value_parser = parse_port)]
    port: u16,
}

/// Bind, accept the single peer, run the relay loop. Both sockets close
/// when this returns, on every path.
fn serve(config: &ListenerConfig) -> Result<SessionEnd, Error> {
    let listener = listener::bind(config)?;
    let mut stream = listener::accept(&listener)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    session::run(&mut stream, &mut stdin.lock(), &mut stdout.lock())
}

fn main() {
    let cli = Cli::parse();

    let family = if cli.ipv6 {
        AddrFamily::V6
    } else {
        AddrFamily::V4
    };
    let config = ListenerConfig::new(family, cli.host, cli.port);

    match serve(&config) {
        Ok(SessionEnd::Quit) => {}
        Ok(SessionEnd::StdinClosed) | Ok(SessionEnd::SendFailed) => {
            eprintln!("Connection closed");
        }
        Err(err) => {
            eprintln!("{}", err);
            process::exit(err.exit_code());
        }
    }
}
