use clap::{Arg, ArgMatches, Command};
use itertools::Itertools;
use std::error::Error;
use std::io::Write;
use std::io::{stdin, stdout};

use crate::app::Session;
use crate::opt::*;

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Repl);
}

pub fn main(session: &mut Session) -> Result<(), Box<dyn Error>> {
    loop {
        let line = match readline()? {
            Some(line) => line,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(session, line) {
            Ok((output, quit)) => {
                writeln!(stdout(), "{output}")?;
                stdout().flush()?;
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(stdout(), "{err}")?;
                stdout().flush()?;
            }
        }
    }

    Ok(())
}

/// Runs one REPL line against the session. Returns the text to print and
/// whether the loop should stop.
pub fn respond(session: &mut Session, line: &str) -> Result<(String, bool), Box<dyn Error>> {
    let args = shlex::split(line).ok_or("error: Invalid quoting")?;
    log(format!("REPL args: {:?}", args));
    let matches = cli().try_get_matches_from(args)?;

    let output = match matches.subcommand() {
        Some(("ping", _matches)) => "Pong".to_string(),
        Some(("quit", _matches)) => return Ok(("Exiting ...".to_string(), true)),
        Some(("search", matches)) => {
            let (name, location) = search_filters(matches);
            session.search_reply(&name, &location)?
        }
        Some(("again", _matches)) => session.search_again_reply()?,
        Some(("next", _matches)) => {
            session.carousel_mut().next();
            session.current_slide()
        }
        Some(("prev", _matches)) => {
            session.carousel_mut().previous();
            session.current_slide()
        }
        Some(("jump", matches)) => {
            let position = matches
                .get_one::<usize>("position")
                .copied()
                .ok_or("error: Missing position")?;
            if position == 0 {
                return Err("error: Positions start at 1".into());
            }
            session.carousel_mut().jump_to(position - 1)?;
            session.current_slide()
        }
        Some(("show", _matches)) => session.current_slide(),
        Some((name, _matches)) => return Err(format!("error: Invalid command {name}").into()),
        None => unreachable!("subcommand required"),
    };

    Ok((output, false))
}

fn search_filters(matches: &ArgMatches) -> (String, String) {
    let name = matches
        .get_many::<String>("name")
        .map(|mut words| words.join(" "))
        .unwrap_or_default();
    let location = matches
        .get_many::<String>("location")
        .map(|mut words| words.join(" "))
        .unwrap_or_default();
    (name, location)
}

fn cli() -> Command {
    // strip out usage
    const PARSER_TEMPLATE: &str = "\
        {all-args}
    ";
    // strip out name/version
    const COMMAND_TEMPLATE: &str = "\
        {about-with-newline}\n\
        {usage-heading}\n    {usage}\n\
        \n\
        {all-args}{after-help}\
    ";

    Command::new("repl")
        .multicall(true)
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand_value_name("COMMAND")
        .subcommand_help_heading("COMMANDS")
        .help_template(PARSER_TEMPLATE)
        .subcommand(
            Command::new("ping")
                .about("Get a response")
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("search")
                .alias("s")
                .about("Search hospitals by name and/or municipality")
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .num_args(1..)
                        .help("Part of the hospital name"),
                )
                .arg(
                    Arg::new("location")
                        .short('l')
                        .long("location")
                        .num_args(1..)
                        .help("Municipality name"),
                )
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("again")
                .about("Repeat the last search")
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("next")
                .alias(">")
                .about("Show the next hospital")
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("prev")
                .alias("<")
                .about("Show the previous hospital")
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("jump")
                .about("Show the hospital at a position, starting at 1")
                .arg(
                    Arg::new("position")
                        .required(true)
                        .value_parser(clap::value_parser!(usize)),
                )
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("show")
                .about("Show the current hospital")
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("quit")
                .alias("exit")
                .alias("q")
                .alias(":q")
                .about("Quit the REPL")
                .help_template(COMMAND_TEMPLATE),
        )
}

fn readline() -> Result<Option<String>, Box<dyn Error>> {
    write!(stdout(), "> ")?;
    stdout().flush()?;
    let mut buffer = String::new();
    let read = stdin().read_line(&mut buffer)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(buffer))
}
