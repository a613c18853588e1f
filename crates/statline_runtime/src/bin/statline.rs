//! Statline CLI entry point.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use statline_foundation::{ItemCatalog, ItemId, LocationId, Stat};
use statline_runtime::{Restriction, RuntimeConfig, Session, logging, serialize};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    pages: Vec<PathBuf>,
    json: Vec<PathBuf>,
    items: Vec<(String, u32)>,
    locations: Vec<u32>,
    data_dir: Option<PathBuf>,
    mode: Option<String>,
    log_filter: Option<String>,
    restrictions: Vec<Restriction>,
    effects: Vec<String>,
    golden_mr: Option<i64>,
    toggle_optimality: Option<i64>,
    seek_birds: bool,
    restore: Option<PathBuf>,
    save: Option<PathBuf>,
    dump: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value(args: &[String], i: usize, flag: &str) -> Result<String, Box<dyn std::error::Error>> {
    args.get(i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value").into())
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--dump" => config.dump = true,
            "--seek-birds" => config.seek_birds = true,
            flag @ "--restriction" => {
                i += 1;
                config.restrictions.push(value(args, i, flag)?.parse()?);
            }
            flag @ "--effect" => {
                i += 1;
                config.effects.push(value(args, i, flag)?);
            }
            flag @ "--golden-mr" => {
                i += 1;
                let count = value(args, i, flag)?;
                config.golden_mr = Some(
                    count
                        .parse()
                        .map_err(|_| format!("invalid --golden-mr value: {count}"))?,
                );
            }
            flag @ "--toggle-optimality" => {
                i += 1;
                let level = value(args, i, flag)?;
                config.toggle_optimality = Some(
                    level
                        .parse()
                        .map_err(|_| format!("invalid --toggle-optimality value: {level}"))?,
                );
            }
            flag @ ("-d" | "--data") => {
                i += 1;
                config.data_dir = Some(PathBuf::from(value(args, i, flag)?));
            }
            flag @ ("-m" | "--mode") => {
                i += 1;
                config.mode = Some(value(args, i, flag)?);
            }
            flag @ "--log" => {
                i += 1;
                config.log_filter = Some(value(args, i, flag)?);
            }
            flag @ "--json" => {
                i += 1;
                config.json.push(PathBuf::from(value(args, i, flag)?));
            }
            flag @ "--restore" => {
                i += 1;
                config.restore = Some(PathBuf::from(value(args, i, flag)?));
            }
            flag @ "--save" => {
                i += 1;
                config.save = Some(PathBuf::from(value(args, i, flag)?));
            }
            flag @ "--item" => {
                i += 1;
                let entry = value(args, i, flag)?;
                let (name, count) = match entry.rsplit_once('=') {
                    Some((name, count)) => (
                        name.to_string(),
                        count
                            .parse()
                            .map_err(|_| format!("invalid --item count: {count}"))?,
                    ),
                    None => (entry, 1),
                };
                config.items.push((name, count));
            }
            flag @ "--location" => {
                i += 1;
                let location = value(args, i, flag)?;
                config.locations.push(
                    location
                        .parse()
                        .map_err(|_| format!("invalid --location value: {location}"))?,
                );
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.pages.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn read(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()).into())
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(&args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("statline {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = RuntimeConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(mode) = &cli.mode {
        config = config.with_mode(mode.parse()?);
    }
    if let Some(filter) = cli.log_filter {
        config = config.with_log_filter(filter);
    }
    for restriction in cli.restrictions {
        config = config.with_restriction(restriction);
    }
    for effect in cli.effects {
        config = config.with_effect(effect);
    }
    if let Some(count) = cli.golden_mr {
        config = config.with_golden_mr_accessories(count);
    }
    if let Some(level) = cli.toggle_optimality {
        config = config.with_toggle_optimality_level(level);
    }
    if cli.seek_birds {
        config = config.with_can_seek_birds(true);
    }
    logging::init(&config.log_filter)?;

    let mut session = Session::load(config)?;

    if let Some(path) = &cli.restore {
        session.restore(path)?;
    }

    for path in &cli.pages {
        let report = session.apply_status_page(&read(path)?)?;
        println!(
            "Applied {} (adventures {:+})",
            path.display(),
            report.adventures_delta
        );
        for anomaly in &report.anomalies {
            eprintln!("\x1b[33mwarning:\x1b[0m {anomaly}");
        }
    }

    for path in &cli.json {
        session.apply_status_json(&read(path)?)?;
        println!("Applied statistics from {}", path.display());
    }

    for (name, count) in &cli.items {
        let item = session
            .item_id(name)
            .ok_or_else(|| format!("unknown item: {name}"))?;
        session.set_item_count(item, *count);
    }

    for location in &cli.locations {
        if !session.seed_goals_for_location(LocationId(*location)) {
            eprintln!("\x1b[33mwarning:\x1b[0m location {location} needs no outfit");
        }
    }

    print_summary(&session);

    if cli.dump {
        println!("{}", serialize::to_json(&session.saved())?);
    }

    if let Some(path) = &cli.save {
        session.save(path)?;
        println!("Saved state to {}", path.display());
    }

    Ok(())
}

fn item_label(session: &Session, item: ItemId) -> String {
    session
        .items()
        .item_name(item)
        .map_or_else(|| item.to_string(), ToString::to_string)
}

fn print_summary(session: &Session) {
    let status = session.state().status();

    println!("\x1b[1;36m=== Character ===\x1b[0m");
    println!("Player:     #{} ({})", status.user_id, status.class_name);
    if let Some(level) = status.level {
        println!("Level:      {level}");
    }
    println!(
        "HP:         {}/{} (base {})",
        status.hp.current, status.hp.maximum, status.hp.base
    );
    println!(
        "{:<11} {}/{} (base {})",
        format!("{}:", session.context().mode),
        status.mana.current,
        status.mana.maximum,
        status.mana.base
    );
    for stat in Stat::ALL {
        let value = status.stat(stat);
        println!(
            "{:<11} {} (base {}, {} subpoints)",
            format!("{stat}:"),
            value.value,
            value.base,
            value.subpoints
        );
    }
    println!("Adventures: {}", status.adventures);
    println!("Meat:       {}", status.meat);
    println!(
        "This run:   {} turns over {} days",
        status.turns_this_run, status.days_this_run
    );
    if let Some(sign) = &status.sign {
        println!("Sign:       {sign}");
    }
    println!(
        "Skills:     {} ({} permanent)",
        status.skills.available.len(),
        status.skills.permed.len()
    );

    let outfits: Vec<String> = session
        .available_outfits()
        .filter_map(|id| session.outfits().get(id))
        .map(|outfit| {
            let worn = if session.is_worn(outfit.id) { " (worn)" } else { "" };
            format!("{}{worn}", outfit.name)
        })
        .collect();
    if outfits.is_empty() {
        println!("Outfits:    none");
    } else {
        println!("Outfits:    {}", outfits.join(", "));
    }

    let goals = session.state().goals();
    if !goals.is_empty() {
        println!("\x1b[1;36m=== Goals ===\x1b[0m");
        for item in goals {
            println!("  - {}", item_label(session, *item));
        }
    }

    println!();
}

fn print_help() {
    println!(
        "\x1b[1mStatline\x1b[0m - Character sheet scraper and outfit tracker

\x1b[1mUSAGE:\x1b[0m
    statline [OPTIONS] [PAGES...]

\x1b[1mARGUMENTS:\x1b[0m
    [PAGES...]    Saved character sheet pages to apply, in order

\x1b[1mOPTIONS:\x1b[0m
    -h, --help            Print help information
    -V, --version         Print version information
    -d, --data DIR        Directory holding items.txt, skills.txt,
                          equipment.txt, and outfits.txt (default: data)
    -m, --mode MODE       Resource mode: mana, zombie, or vampyre
    --log FILTER          Log filter directive (default: statline=info)
    --restriction NAME    Run restriction: bad-moon, axecore, liberated,
                          or recalled (repeatable)
    --effect NAME         Active effect name (repeatable)
    --golden-mr N         Golden Mr. Accessories owned
    --toggle-optimality N Toggle Optimality level
    --seek-birds          Birds can be sought this run
    --json FILE           Apply statistics from a status JSON object
    --item NAME[=COUNT]   Set an owned item count (default count: 1)
    --location ID         Add the outfit a location needs to the goals
    --restore FILE        Load saved state before applying anything
    --save FILE           Save state after applying everything
    --dump                Print the final state as JSON

\x1b[1mENVIRONMENT:\x1b[0m
    STATLINE_DATA         Same as --data
    STATLINE_MODE         Same as --mode
    STATLINE_LOG          Same as --log
    STATLINE_RESTRICTIONS Comma-separated --restriction names
    STATLINE_EFFECTS      Comma-separated --effect names
    STATLINE_GOLDEN_MR    Same as --golden-mr
    STATLINE_TOGGLE_OPTIMALITY
                          Same as --toggle-optimality
    STATLINE_SEEK_BIRDS   true or false, same as --seek-birds

\x1b[1mEXAMPLES:\x1b[0m
    statline charsheet.html                   Parse one sheet
    statline -m zombie charsheet.html         Parse a zombie master's sheet
    statline --restore me.msgpack --item \"knob goblin harem veil\" --save me.msgpack"
    );
}
